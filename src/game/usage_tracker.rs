use crate::model::{DailyUsageStats, FeatureLimit, UsageFeature, UserTier};
use crate::storage::StorageStack;
use chrono::{Local, NaiveDate};
use log::{error, trace};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DAILY_STATS_KEY: &str = "daily_stats";

/// Per-day usage counters behind the tier gates. The only state transition is
/// the lazy day rollover: every read or increment first replaces a stale-date
/// record with a fresh one for today. No midnight timer exists; a process
/// that sleeps across midnight is corrected on its next access.
pub struct UsageTracker {
    storage: Arc<StorageStack>,
    stats: Mutex<DailyUsageStats>,
    clock: fn() -> NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl UsageTracker {
    pub fn new(storage: Arc<StorageStack>) -> Self {
        Self::with_clock(storage, today)
    }

    fn with_clock(storage: Arc<StorageStack>, clock: fn() -> NaiveDate) -> Self {
        let stats = storage
            .get::<DailyUsageStats>(DAILY_STATS_KEY)
            .unwrap_or_else(|| DailyUsageStats::fresh(clock()));
        trace!(
            target: "usage_tracker",
            "Loaded daily stats for {}: sessions={}",
            stats.date, stats.sessions_completed
        );
        Self {
            storage,
            stats: Mutex::new(stats),
            clock,
        }
    }

    /// Locks the counters, rolling them over first if the stored date is no
    /// longer today. Every public operation goes through here, so rollover
    /// and the operation it precedes are atomic.
    fn current(&self) -> MutexGuard<'_, DailyUsageStats> {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        let now = (self.clock)();
        if !stats.is_for(now) {
            trace!(
                target: "usage_tracker",
                "Day rollover {} -> {}, resetting counters",
                stats.date, now
            );
            *stats = DailyUsageStats::fresh(now);
            self.persist(&stats);
        }
        stats
    }

    pub fn increment(&self, feature: UsageFeature) {
        let mut stats = self.current();
        stats.increment(feature);
        trace!(
            target: "usage_tracker",
            "{:?} count is now {}",
            feature, stats.count(feature)
        );
        self.persist(&stats);
    }

    /// Remaining allowance today, or the unlimited sentinel.
    pub fn remaining(&self, feature: UsageFeature, tier: UserTier) -> FeatureLimit {
        let stats = self.current();
        match tier.limit(feature) {
            FeatureLimit::Unlimited => FeatureLimit::Unlimited,
            FeatureLimit::Bounded(limit) => {
                FeatureLimit::Bounded(limit.saturating_sub(stats.count(feature)))
            }
        }
    }

    pub fn can_use(&self, feature: UsageFeature, tier: UserTier) -> bool {
        let stats = self.current();
        tier.limit(feature).allows(stats.count(feature))
    }

    /// "used/limit today" for the menu, or "Unlimited".
    pub fn usage_text(&self, feature: UsageFeature, tier: UserTier) -> String {
        let stats = self.current();
        match tier.limit(feature) {
            FeatureLimit::Unlimited => "Unlimited".to_string(),
            FeatureLimit::Bounded(limit) => {
                format!("{}/{} today", stats.count(feature), limit)
            }
        }
    }

    pub fn snapshot(&self) -> DailyUsageStats {
        *self.current()
    }

    fn persist(&self, stats: &DailyUsageStats) {
        if let Err(e) = self.storage.put(DAILY_STATS_KEY, stats) {
            error!(target: "usage_tracker", "Failed to persist daily stats: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn yesterday() -> NaiveDate {
        today().checked_sub_days(Days::new(1)).unwrap()
    }

    fn tracker() -> UsageTracker {
        UsageTracker::new(Arc::new(StorageStack::in_memory()))
    }

    #[test]
    fn test_free_session_allowance_is_one_per_day() {
        let tracker = tracker();
        assert_eq!(
            tracker.remaining(UsageFeature::Sessions, UserTier::Free),
            FeatureLimit::Bounded(1)
        );
        assert!(tracker.can_use(UsageFeature::Sessions, UserTier::Free));

        tracker.increment(UsageFeature::Sessions);
        assert_eq!(
            tracker.remaining(UsageFeature::Sessions, UserTier::Free),
            FeatureLimit::Bounded(0)
        );
        assert!(!tracker.can_use(UsageFeature::Sessions, UserTier::Free));
    }

    #[test]
    fn test_unlimited_tier_never_blocks() {
        let tracker = tracker();
        for _ in 0..10 {
            tracker.increment(UsageFeature::Pomodoros);
        }
        assert!(tracker.can_use(UsageFeature::Pomodoros, UserTier::Unlimited));
        assert_eq!(
            tracker.remaining(UsageFeature::Pomodoros, UserTier::Unlimited),
            FeatureLimit::Unlimited
        );
    }

    #[test]
    fn test_stale_persisted_stats_reset_on_first_access() {
        let storage = Arc::new(StorageStack::in_memory());
        let mut stale = DailyUsageStats::fresh(yesterday());
        stale.sessions_completed = 1;
        storage.put(DAILY_STATS_KEY, &stale).unwrap();

        let tracker = UsageTracker::new(storage);
        // Day D had the free allowance used up; on day D+1 the counters reset
        // before the check runs.
        assert!(tracker.can_use(UsageFeature::Sessions, UserTier::Free));
        assert_eq!(tracker.snapshot().sessions_completed, 0);
        assert_eq!(tracker.snapshot().date, today());
    }

    #[test]
    fn test_rollover_happens_between_operations() {
        let storage = Arc::new(StorageStack::in_memory());
        // Clock pinned to yesterday: counters accrue against that date.
        let tracker = UsageTracker::with_clock(storage.clone(), yesterday);
        tracker.increment(UsageFeature::Sessions);
        assert_eq!(
            tracker.remaining(UsageFeature::Sessions, UserTier::Free),
            FeatureLimit::Bounded(0)
        );

        // Same persisted state seen by a tracker whose clock reads today.
        let rolled = UsageTracker::with_clock(storage, today);
        assert_eq!(
            rolled.remaining(UsageFeature::Sessions, UserTier::Free),
            FeatureLimit::Bounded(1)
        );
        assert!(rolled.can_use(UsageFeature::Sessions, UserTier::Free));
    }

    #[test]
    fn test_rollover_persists_fresh_stats() {
        let storage = Arc::new(StorageStack::in_memory());
        let mut stale = DailyUsageStats::fresh(yesterday());
        stale.goals_set = 3;
        storage.put(DAILY_STATS_KEY, &stale).unwrap();

        let tracker = UsageTracker::new(storage.clone());
        let _ = tracker.snapshot();

        let persisted: DailyUsageStats = storage.get(DAILY_STATS_KEY).unwrap();
        assert_eq!(persisted.date, today());
        assert_eq!(persisted.goals_set, 0);
    }

    #[test]
    fn test_usage_text() {
        let tracker = tracker();
        tracker.increment(UsageFeature::Goals);
        assert_eq!(
            tracker.usage_text(UsageFeature::Goals, UserTier::Free),
            "1/3 today"
        );
        assert_eq!(
            tracker.usage_text(UsageFeature::Goals, UserTier::Unlimited),
            "Unlimited"
        );
    }

    #[test]
    fn test_corrupt_persisted_stats_fall_back_to_fresh() {
        let storage = Arc::new(StorageStack::in_memory());
        storage.write(DAILY_STATS_KEY, "not json at all").unwrap();
        let tracker = UsageTracker::new(storage);
        assert_eq!(tracker.snapshot().sessions_completed, 0);
    }
}
