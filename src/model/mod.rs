mod board;
mod cell;
mod daily_usage;
mod difficulty;
mod goal;
mod preferences;
mod puzzle;
mod session_record;
mod session_timer;

pub use board::{Board, MoveOutcome};
pub use cell::Cell;
pub use daily_usage::{DailyUsageStats, FeatureLimit, UsageFeature, UserTier};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use goal::Goal;
pub use preferences::UserPreferences;
pub use puzzle::{Grid, Puzzle, PuzzleCollection, GRID_SIZE};
pub use session_record::{SessionRecord, SessionStats, SortDirection, SortKey};
pub use session_timer::SessionTimer;
