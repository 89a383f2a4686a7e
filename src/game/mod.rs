pub mod goal_store;
pub mod puzzle_engine;
pub mod session;
pub mod session_store;
pub mod usage_tracker;

pub use goal_store::GoalStore;
pub use puzzle_engine::{PuzzleEngine, PuzzleError};
pub use session::{GameSession, MISTAKE_LIMIT};
pub use session_store::SessionStore;
pub use usage_tracker::UsageTracker;
