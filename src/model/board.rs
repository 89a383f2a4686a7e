use super::{Cell, Puzzle, GRID_SIZE};
use log::trace;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// What a value placement did, as a transition. The `mistake_delta` is the
/// only signal that may feed a running mistake counter: re-entering a wrong
/// digit over an existing wrong digit contributes 0, correcting a wrong digit
/// contributes -1. Re-scanning the board would lose that symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target cell is a given; nothing changed.
    RejectedGiven,
    Placed { correct: bool, mistake_delta: i8 },
}

impl MoveOutcome {
    pub fn mistake_delta(&self) -> i8 {
        match self {
            MoveOutcome::RejectedGiven => 0,
            MoveOutcome::Placed { mistake_delta, .. } => *mistake_delta,
        }
    }
}

/// The live 9x9 board for one game session. Owns its cells, shares the
/// immutable puzzle it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    puzzle: Rc<Puzzle>,
}

impl Board {
    pub fn new(puzzle: Rc<Puzzle>) -> Self {
        let cells =
            std::array::from_fn(|row| std::array::from_fn(|col| Cell::new(puzzle.givens[row][col])));
        Self { cells, puzzle }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        &self.cells[row][col]
    }

    /// Places `digit` in a non-given cell, clearing its notes and updating its
    /// validity against the solution. Given cells are left untouched.
    pub fn apply_value(&mut self, row: usize, col: usize, digit: u8) -> MoveOutcome {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        debug_assert!((1..=9).contains(&digit));
        let cell = &mut self.cells[row][col];
        if cell.is_given {
            trace!(target: "board", "Rejected move on given cell ({}, {})", row, col);
            return MoveOutcome::RejectedGiven;
        }

        let had_wrong = !cell.is_valid && cell.value != 0;
        let correct = self.puzzle.solution[row][col] == digit;

        cell.value = digit;
        cell.notes.clear();
        cell.is_valid = correct;

        let mistake_delta = match (correct, had_wrong) {
            (false, false) => 1,
            (true, true) => -1,
            _ => 0,
        };
        trace!(
            target: "board",
            "Placed {} at ({}, {}): correct={}, mistake_delta={}",
            digit, row, col, correct, mistake_delta
        );
        MoveOutcome::Placed {
            correct,
            mistake_delta,
        }
    }

    /// Toggles a candidate note. Only meaningful on an empty, editable cell;
    /// anywhere else this is a no-op.
    pub fn toggle_note(&mut self, row: usize, col: usize, digit: u8) {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        debug_assert!((1..=9).contains(&digit));
        let cell = &mut self.cells[row][col];
        if cell.is_given || !cell.is_empty() {
            return;
        }
        if !cell.notes.remove(&digit) {
            cell.notes.insert(digit);
        }
    }

    /// Explicit erase. Resets the cell to empty and valid without producing a
    /// correctness event, so it never moves a mistake counter.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        let cell = &mut self.cells[row][col];
        if cell.is_given {
            return;
        }
        cell.value = 0;
        cell.is_valid = true;
        cell.notes.clear();
    }

    /// Erase for notes mode: drops all candidate notes from an editable cell.
    pub fn clear_notes(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[row][col];
        if !cell.is_given {
            cell.notes.clear();
        }
    }

    /// Numeric completion: every cell filled and valid.
    pub fn is_complete(&self) -> bool {
        self.iter_cells().all(|cell| !cell.is_empty() && cell.is_valid)
    }

    /// True once `digit` sits correctly in all nine of its positions. Drives
    /// number-pad dimming in the UI.
    pub fn is_digit_complete(&self, digit: u8) -> bool {
        self.iter_cells()
            .filter(|cell| cell.value == digit && cell.is_valid)
            .count()
            == GRID_SIZE
    }

    fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..GRID_SIZE {
            if row % 3 == 0 && row != 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..GRID_SIZE {
                if col % 3 == 0 && col != 0 {
                    write!(f, "| ")?;
                }
                let cell = &self.cells[row][col];
                if cell.value == 0 {
                    write!(f, ". ")?;
                } else {
                    write!(f, "{} ", cell.value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
