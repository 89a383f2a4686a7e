use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Wall-clock timer for one focus session. Accumulates run time across
/// pauses; the accumulated total becomes the record's duration.
#[serde_as]
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SessionTimer {
    #[serde_as(as = "TimestampSeconds")]
    started_at: SystemTime,
    accumulated: Duration,
    #[serde_as(as = "Option<TimestampSeconds>")]
    running_since: Option<SystemTime>,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::start()
    }
}

impl SessionTimer {
    pub fn start() -> Self {
        let now = SystemTime::now();
        Self {
            started_at: now,
            accumulated: Duration::ZERO,
            running_since: Some(now),
        }
    }

    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    pub fn pause(&mut self) {
        self.pause_at(SystemTime::now());
    }

    pub fn pause_at(&mut self, now: SystemTime) {
        if let Some(since) = self.running_since.take() {
            self.accumulated = self
                .accumulated
                .saturating_add(now.duration_since(since).unwrap_or_default());
        }
    }

    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(SystemTime::now());
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(SystemTime::now())
    }

    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        let running = self
            .running_since
            .map(|since| now.duration_since(since).unwrap_or_default())
            .unwrap_or_default();
        self.accumulated.saturating_add(running)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Stops the clock and returns the final duration.
    pub fn stop(&mut self) -> Duration {
        self.pause();
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_while_running() {
        let now = SystemTime::now();
        let timer = SessionTimer {
            started_at: now - Duration::from_secs(5),
            accumulated: Duration::ZERO,
            running_since: Some(now - Duration::from_secs(5)),
        };
        assert!(timer.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let now = SystemTime::now();
        let mut timer = SessionTimer {
            started_at: now,
            accumulated: Duration::ZERO,
            running_since: Some(now),
        };
        timer.pause_at(now + Duration::from_secs(8));
        assert!(timer.is_paused());
        assert_eq!(
            timer.elapsed_at(now + Duration::from_secs(60)),
            Duration::from_secs(8)
        );
    }

    #[test]
    fn test_accumulates_across_pauses() {
        let now = SystemTime::now();
        let mut timer = SessionTimer {
            started_at: now,
            accumulated: Duration::from_secs(3),
            running_since: Some(now),
        };
        timer.pause_at(now + Duration::from_secs(7));
        assert_eq!(
            timer.elapsed_at(now + Duration::from_secs(100)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_stop_returns_accumulated_total() {
        let now = SystemTime::now();
        let mut timer = SessionTimer {
            started_at: now,
            accumulated: Duration::from_secs(42),
            running_since: None,
        };
        assert_eq!(timer.stop(), Duration::from_secs(42));
    }
}
