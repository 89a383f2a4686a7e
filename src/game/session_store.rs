use crate::model::{
    SessionRecord, SessionStats, SortDirection, SortKey, UserPreferences, UserTier,
};
use crate::storage::StorageStack;
use itertools::Itertools;
use log::{error, trace};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const SESSIONS_KEY: &str = "sessions";
pub const PREFERENCES_KEY: &str = "preferences";

struct StoreState {
    sessions: Vec<SessionRecord>,
    preferences: UserPreferences,
}

/// Durable, newest-first history of play sessions plus the user preferences
/// blob. Process-wide service: the interior mutex serializes every mutation
/// with its persistence write, so no two callers can interleave and lose an
/// update.
pub struct SessionStore {
    storage: Arc<StorageStack>,
    state: Mutex<StoreState>,
}

impl SessionStore {
    /// Loads history and preferences from storage. Corrupt or absent data
    /// falls back to empty defaults; startup never fails on bad state.
    pub fn new(storage: Arc<StorageStack>) -> Self {
        let sessions: Vec<SessionRecord> = storage.get(SESSIONS_KEY).unwrap_or_default();
        let mut preferences: UserPreferences = storage.get(PREFERENCES_KEY).unwrap_or_default();
        preferences.migrate();
        trace!(
            target: "session_store",
            "Loaded {} sessions, tier {:?}",
            sessions.len(), preferences.tier
        );
        Self {
            storage,
            state: Mutex::new(StoreState {
                sessions,
                preferences,
            }),
        }
    }

    /// Prepends the record; history stays newest-first.
    pub fn record_session(&self, record: SessionRecord) {
        let mut state = self.lock();
        state.sessions.insert(0, record);
        self.persist_sessions(&state);
    }

    /// No-op when the id is unknown.
    pub fn delete_session(&self, id: Uuid) {
        let mut state = self.lock();
        let before = state.sessions.len();
        state.sessions.retain(|s| s.id != id);
        if state.sessions.len() != before {
            self.persist_sessions(&state);
        }
    }

    /// Filtered, sorted view over the history, recomputed per call. The
    /// filter is an exact case-insensitive difficulty label ("all" and `None`
    /// both mean everything). Sorting is stable, so ties keep history order.
    pub fn query(
        &self,
        difficulty_filter: Option<&str>,
        sort_key: SortKey,
        direction: SortDirection,
    ) -> Vec<SessionRecord> {
        let state = self.lock();
        state
            .sessions
            .iter()
            .filter(|record| match difficulty_filter {
                None => true,
                Some(label) if label.eq_ignore_ascii_case("all") => true,
                Some(label) => record.difficulty.eq_ignore_ascii_case(label),
            })
            .cloned()
            .sorted_by(|a, b| {
                let ord = match sort_key {
                    SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
                    SortKey::Duration => a.duration_secs.cmp(&b.duration_secs),
                };
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            })
            .collect()
    }

    pub fn stats(&self) -> SessionStats {
        let state = self.lock();
        let total = state.sessions.len();
        let completed = state.sessions.iter().filter(|s| s.is_completed).count();
        let total_duration_secs: u64 = state.sessions.iter().map(|s| s.duration_secs).sum();
        let average_duration_secs = if total > 0 {
            total_duration_secs / total as u64
        } else {
            0
        };
        SessionStats {
            total,
            completed,
            total_duration_secs,
            average_duration_secs,
        }
    }

    /// Folds records fetched from the sync backend into the history. Records
    /// whose id is already known are skipped; anything new is inserted and
    /// the whole list re-sorted newest-first. Returns how many were added.
    pub fn merge_remote(&self, remote: Vec<SessionRecord>) -> usize {
        let mut state = self.lock();
        let known: HashSet<Uuid> = state.sessions.iter().map(|s| s.id).collect();
        let mut added = 0;
        for record in remote {
            if !known.contains(&record.id) {
                state.sessions.push(record);
                added += 1;
            }
        }
        if added > 0 {
            state.sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            trace!(target: "session_store", "Merged {} remote sessions", added);
            self.persist_sessions(&state);
        }
        added
    }

    pub fn preferences(&self) -> UserPreferences {
        self.lock().preferences.clone()
    }

    pub fn update_preferences(&self, preferences: UserPreferences) {
        let mut state = self.lock();
        state.preferences = preferences;
        self.persist_preferences(&state);
    }

    pub fn update_tier(&self, tier: UserTier) {
        let mut state = self.lock();
        state.preferences.tier = tier;
        self.persist_preferences(&state);
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A failed write is logged, never surfaced mid-session; the in-memory
    /// state stands and the next mutation writes the full list again.
    fn persist_sessions(&self, state: &StoreState) {
        if let Err(e) = self.storage.put(SESSIONS_KEY, &state.sessions) {
            error!(target: "session_store", "Failed to persist sessions: {}", e);
        }
    }

    fn persist_preferences(&self, state: &StoreState) {
        if let Err(e) = self.storage.put(PREFERENCES_KEY, &state.preferences) {
            error!(target: "session_store", "Failed to persist preferences: {}", e);
        }
    }
}
