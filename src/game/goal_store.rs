use crate::model::Goal;
use crate::storage::StorageStack;
use chrono::{Days, Local, NaiveDate};
use log::{error, trace};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const GOALS_KEY: &str = "goals";

/// Daily intentions. Counting an added goal against the free-tier daily limit
/// is the caller's job (`UsageTracker::increment(Goals)` after a successful
/// add); this store only owns the records.
pub struct GoalStore {
    storage: Arc<StorageStack>,
    goals: Mutex<Vec<Goal>>,
}

impl GoalStore {
    pub fn new(storage: Arc<StorageStack>) -> Self {
        let goals: Vec<Goal> = storage.get(GOALS_KEY).unwrap_or_default();
        trace!(target: "goal_store", "Loaded {} goals", goals.len());
        Self {
            storage,
            goals: Mutex::new(goals),
        }
    }

    /// Trims the text; blank text is rejected.
    pub fn add_goal(&self, text: &str, date: NaiveDate) -> Option<Goal> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let goal = Goal::new(trimmed, date);
        let mut goals = self.lock();
        goals.push(goal.clone());
        self.persist(&goals);
        Some(goal)
    }

    pub fn delete_goal(&self, id: Uuid) {
        let mut goals = self.lock();
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() != before {
            self.persist(&goals);
        }
    }

    /// Flips completion; returns the new state, or `None` for an unknown id.
    pub fn toggle_goal(&self, id: Uuid) -> Option<bool> {
        let mut goals = self.lock();
        let completed = {
            let goal = goals.iter_mut().find(|g| g.id == id)?;
            goal.is_completed = !goal.is_completed;
            goal.is_completed
        };
        self.persist(&goals);
        Some(completed)
    }

    pub fn update_goal(&self, id: Uuid, new_text: &str) -> bool {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let mut goals = self.lock();
        match goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => {
                goal.text = trimmed.to_string();
                self.persist(&goals);
                true
            }
            None => false,
        }
    }

    pub fn goals_for(&self, date: NaiveDate) -> Vec<Goal> {
        self.lock()
            .iter()
            .filter(|g| g.date == date)
            .cloned()
            .collect()
    }

    pub fn today_goals(&self) -> Vec<Goal> {
        self.goals_for(Local::now().date_naive())
    }

    /// Drops goals older than the cutoff; returns how many were removed.
    pub fn cleanup_older_than(&self, days: u64) -> usize {
        let cutoff = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN);
        let mut goals = self.lock();
        let before = goals.len();
        goals.retain(|g| g.date >= cutoff);
        let removed = before - goals.len();
        if removed > 0 {
            trace!(target: "goal_store", "Cleaned up {} old goals", removed);
            self.persist(&goals);
        }
        removed
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Goal>> {
        self.goals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, goals: &[Goal]) {
        if let Err(e) = self.storage.put(GOALS_KEY, &goals) {
            error!(target: "goal_store", "Failed to persist goals: {}", e);
        }
    }
}
