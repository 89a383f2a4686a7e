use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One daily intention from the declutter ritual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub text: String,
    pub date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            date,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}
