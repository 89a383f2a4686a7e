use super::Difficulty;
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 9;

pub type Grid = [[u8; GRID_SIZE]; GRID_SIZE];

/// An immutable puzzle/solution pair from the bundled collection.
/// Zero in `givens` marks a blank cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    pub givens: Grid,
    pub solution: Grid,
}

impl Puzzle {
    pub fn solution_at(&self, row: usize, col: usize) -> u8 {
        self.solution[row][col]
    }

    pub fn given_at(&self, row: usize, col: usize) -> u8 {
        self.givens[row][col]
    }
}

/// Read-only collection of pre-generated puzzles, keyed by difficulty tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PuzzleCollection {
    easy: Vec<Puzzle>,
    medium: Vec<Puzzle>,
    hard: Vec<Puzzle>,
}

impl PuzzleCollection {
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// The collection shipped inside the crate.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../../assets/puzzles.json"))
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[Puzzle] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid_solution(grid: &Grid) {
        let expected: Vec<u8> = (1..=9).collect();
        for row in 0..GRID_SIZE {
            let mut digits: Vec<u8> = grid[row].to_vec();
            digits.sort_unstable();
            assert_eq!(digits, expected, "row {} is not a permutation", row);
        }
        for col in 0..GRID_SIZE {
            let mut digits: Vec<u8> = (0..GRID_SIZE).map(|row| grid[row][col]).collect();
            digits.sort_unstable();
            assert_eq!(digits, expected, "col {} is not a permutation", col);
        }
        for band in 0..3 {
            for stack in 0..3 {
                let mut digits: Vec<u8> = (0..3)
                    .flat_map(|r| (0..3).map(move |c| grid[band * 3 + r][stack * 3 + c]))
                    .collect();
                digits.sort_unstable();
                assert_eq!(digits, expected, "box {}/{} is not a permutation", band, stack);
            }
        }
    }

    #[test]
    fn test_empty_collection_reports_empty() {
        let collection = PuzzleCollection::default();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_bundled_collection_has_every_tier() {
        let collection = PuzzleCollection::bundled().unwrap();
        assert!(!collection.is_empty());
        assert!(collection.len() >= Difficulty::all().len());
        for difficulty in Difficulty::all() {
            assert!(
                !collection.tier(difficulty).is_empty(),
                "no bundled puzzles for {}",
                difficulty
            );
        }
    }

    #[test]
    fn test_bundled_puzzles_are_well_formed() {
        let collection = PuzzleCollection::bundled().unwrap();
        for difficulty in Difficulty::all() {
            for puzzle in collection.tier(difficulty) {
                assert_valid_solution(&puzzle.solution);
                for row in 0..GRID_SIZE {
                    for col in 0..GRID_SIZE {
                        let given = puzzle.givens[row][col];
                        assert!(given <= 9);
                        if given != 0 {
                            assert_eq!(given, puzzle.solution[row][col]);
                        }
                    }
                }
            }
        }
    }
}
