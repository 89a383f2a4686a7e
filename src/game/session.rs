use crate::model::{
    Board, Difficulty, MoveOutcome, Puzzle, SessionRecord, SessionTimer,
};
use log::trace;
use std::rc::Rc;
use uuid::Uuid;

/// Three wrong cells end the run.
pub const MISTAKE_LIMIT: u32 = 3;

/// One active playthrough: the live board plus the bookkeeping that turns
/// into a `SessionRecord` when the player finishes or walks away. Exclusively
/// owned by the driving UI context; never shared.
pub struct GameSession {
    board: Board,
    difficulty: Difficulty,
    mistake_count: u32,
    timer: SessionTimer,
    playthrough_id: Uuid,
    puzzle_id: u32,
}

impl GameSession {
    pub fn new(difficulty: Difficulty, puzzle: Rc<Puzzle>) -> Self {
        let puzzle_id = puzzle.id;
        let session = Self {
            board: Board::new(puzzle),
            difficulty,
            mistake_count: 0,
            timer: SessionTimer::start(),
            playthrough_id: Uuid::new_v4(),
            puzzle_id,
        };
        trace!(
            target: "session",
            "Started {} session {} on puzzle {}",
            difficulty, session.playthrough_id, puzzle_id
        );
        trace!(target: "session", "Starting board:\n{}", session.board);
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mistake_count(&self) -> u32 {
        self.mistake_count
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    /// Routes a digit placement to the board and folds the transition's
    /// mistake delta into the running counter.
    pub fn apply_value(&mut self, row: usize, col: usize, digit: u8) -> MoveOutcome {
        let outcome = self.board.apply_value(row, col, digit);
        self.mistake_count = self
            .mistake_count
            .saturating_add_signed(outcome.mistake_delta() as i32);
        outcome
    }

    pub fn toggle_note(&mut self, row: usize, col: usize, digit: u8) {
        self.board.toggle_note(row, col, digit);
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.board.clear_cell(row, col);
    }

    pub fn clear_notes(&mut self, row: usize, col: usize) {
        self.board.clear_notes(row, col);
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    /// The UI stops accepting moves once this is true.
    pub fn is_failed(&self) -> bool {
        self.mistake_count >= MISTAKE_LIMIT
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.resume();
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    /// Ends the session and produces the immutable history record, stamped
    /// with the session's start time.
    pub fn finish(mut self, declutter_text: impl Into<String>) -> SessionRecord {
        let started_at = self.timer.started_at();
        let duration = self.timer.stop();
        let record = SessionRecord {
            id: Uuid::new_v4(),
            timestamp: started_at.into(),
            duration_secs: duration.as_secs(),
            difficulty: self.difficulty.to_string(),
            declutter_text: declutter_text.into(),
            mistake_count: self.mistake_count,
            is_completed: self.board.is_complete(),
            puzzle_id: Some(self.puzzle_id),
        };
        trace!(
            target: "session",
            "Finished session {}: completed={}, mistakes={}, {}s",
            self.playthrough_id, record.is_completed, record.mistake_count, record.duration_secs
        );
        record
    }
}
