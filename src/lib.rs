pub mod game;
pub mod model;
pub mod storage;
pub mod sync;
