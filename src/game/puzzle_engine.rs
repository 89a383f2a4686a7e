use super::session::GameSession;
use crate::model::{Difficulty, Puzzle, PuzzleCollection};
use log::trace;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The whole tier is empty. A packaging defect, not a retryable
    /// condition: there is no other puzzle to pick.
    #[error("no puzzles available for difficulty {0}")]
    Unavailable(Difficulty),
    #[error("puzzle collection failed to decode: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Owns the read-only puzzle collection and starts game sessions from it.
#[derive(Debug)]
pub struct PuzzleEngine {
    collection: PuzzleCollection,
    seed: Option<u64>,
}

impl PuzzleEngine {
    pub fn new(collection: PuzzleCollection) -> Self {
        trace!(
            target: "puzzle_engine",
            "Puzzle collection holds {} puzzles",
            collection.len()
        );
        Self {
            collection,
            seed: Self::seed_from_env(),
        }
    }

    pub fn with_bundled() -> Result<Self, PuzzleError> {
        Ok(Self::new(PuzzleCollection::bundled()?))
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse().ok())
    }

    /// Uniform random pick from the requested tier.
    pub fn load_puzzle(&self, difficulty: Difficulty) -> Result<Rc<Puzzle>, PuzzleError> {
        let tier = self.collection.tier(difficulty);
        let picked = match self.seed {
            Some(seed) => tier.choose(&mut StdRng::seed_from_u64(seed)),
            None => tier.choose(&mut rand::rng()),
        };
        let puzzle = picked
            .cloned()
            .map(Rc::new)
            .ok_or(PuzzleError::Unavailable(difficulty))?;
        trace!(
            target: "puzzle_engine",
            "Loaded puzzle {} for difficulty {} ({} in tier)",
            puzzle.id, difficulty, tier.len()
        );
        Ok(puzzle)
    }

    pub fn start_session(&self, difficulty: Difficulty) -> Result<GameSession, PuzzleError> {
        let puzzle = self.load_puzzle(difficulty)?;
        Ok(GameSession::new(difficulty, puzzle))
    }
}
