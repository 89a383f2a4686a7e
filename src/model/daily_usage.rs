use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    Free,
    Unlimited,
}

impl Default for UserTier {
    fn default() -> Self {
        UserTier::Free
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageFeature {
    Sessions,
    Goals,
    Pomodoros,
}

/// Per-day allowance for one feature. Fixed policy, not runtime-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureLimit {
    Bounded(u32),
    Unlimited,
}

impl FeatureLimit {
    pub fn allows(&self, used: u32) -> bool {
        match self {
            FeatureLimit::Bounded(limit) => used < *limit,
            FeatureLimit::Unlimited => true,
        }
    }
}

impl UserTier {
    pub fn limit(&self, feature: UsageFeature) -> FeatureLimit {
        match (self, feature) {
            (UserTier::Unlimited, _) => FeatureLimit::Unlimited,
            (UserTier::Free, UsageFeature::Sessions) => FeatureLimit::Bounded(1),
            (UserTier::Free, UsageFeature::Goals) => FeatureLimit::Bounded(3),
            (UserTier::Free, UsageFeature::Pomodoros) => FeatureLimit::Bounded(1),
        }
    }
}

/// Counters for a single calendar date. Only ever valid for "today": any
/// accessor that finds a stale date must replace the whole record first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsageStats {
    pub date: NaiveDate,
    pub sessions_completed: u32,
    pub goals_set: u32,
    pub pomodoros_completed: u32,
}

impl Default for DailyUsageStats {
    fn default() -> Self {
        Self::fresh(Local::now().date_naive())
    }
}

impl DailyUsageStats {
    pub fn fresh(date: NaiveDate) -> Self {
        Self {
            date,
            sessions_completed: 0,
            goals_set: 0,
            pomodoros_completed: 0,
        }
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn count(&self, feature: UsageFeature) -> u32 {
        match feature {
            UsageFeature::Sessions => self.sessions_completed,
            UsageFeature::Goals => self.goals_set,
            UsageFeature::Pomodoros => self.pomodoros_completed,
        }
    }

    pub fn increment(&mut self, feature: UsageFeature) {
        match feature {
            UsageFeature::Sessions => self.sessions_completed += 1,
            UsageFeature::Goals => self.goals_set += 1,
            UsageFeature::Pomodoros => self.pomodoros_completed += 1,
        }
    }
}
