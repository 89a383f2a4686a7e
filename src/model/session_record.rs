use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SNIPPET_LEN: usize = 100;

/// One finished (completed or abandoned) play session. Immutable once
/// recorded; removed from history only by an explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: u64,
    pub difficulty: String,
    pub declutter_text: String,
    pub mistake_count: u32,
    pub is_completed: bool,
    pub puzzle_id: Option<u32>,
}

impl SessionRecord {
    /// "m:ss" for the session list.
    pub fn formatted_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }

    /// First hundred characters of the journal entry for the list view.
    pub fn declutter_snippet(&self) -> String {
        if self.declutter_text.chars().count() <= SNIPPET_LEN {
            return self.declutter_text.clone();
        }
        let mut snippet: String = self.declutter_text.chars().take(SNIPPET_LEN).collect();
        snippet.push_str("...");
        snippet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Timestamp,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Aggregates over the whole history. Average is integer-truncated and zero
/// for an empty history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub completed: usize,
    pub total_duration_secs: u64,
    pub average_duration_secs: u64,
}

impl SessionStats {
    pub fn formatted_total_duration(&self) -> String {
        let hours = self.total_duration_secs / 3600;
        let minutes = (self.total_duration_secs % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }

    pub fn formatted_average_duration(&self) -> String {
        format!(
            "{}m {}s",
            self.average_duration_secs / 60,
            self.average_duration_secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(duration_secs: u64, text: &str) -> SessionRecord {
        SessionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            duration_secs,
            difficulty: "easy".to_string(),
            declutter_text: text.to_string(),
            mistake_count: 0,
            is_completed: true,
            puzzle_id: None,
        }
    }

    #[test]
    fn test_formatted_duration() {
        assert_eq!(record(0, "").formatted_duration(), "0:00");
        assert_eq!(record(65, "").formatted_duration(), "1:05");
        assert_eq!(record(600, "").formatted_duration(), "10:00");
    }

    #[test]
    fn test_declutter_snippet_truncates_long_text() {
        let long = "x".repeat(150);
        let snippet = record(0, &long).declutter_snippet();
        assert_eq!(snippet.chars().count(), 103);
        assert!(snippet.ends_with("..."));

        let short = record(0, "calm");
        assert_eq!(short.declutter_snippet(), "calm");
    }

    #[test]
    fn test_stats_formatting() {
        let stats = SessionStats {
            total: 3,
            completed: 2,
            total_duration_secs: 3725,
            average_duration_secs: 95,
        };
        assert_eq!(stats.formatted_total_duration(), "1h 2m");
        assert_eq!(stats.formatted_average_duration(), "1m 35s");
    }
}
