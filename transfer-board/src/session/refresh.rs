//! Bounded automatic refresh.

use std::time::Duration;

/// How often the board reloads itself, and how many times at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub interval: Duration,
    pub limit: u32,
}

impl RefreshPolicy {
    pub fn new(interval: Duration, limit: u32) -> Self {
        Self { interval, limit }
    }

    /// Seconds until the next reload, or `None` once `served` has reached
    /// the limit and the user has to refresh by hand.
    pub fn next_refresh_secs(&self, served: u32) -> Option<u64> {
        (served < self.limit).then_some(self.interval.as_secs())
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            limit: 100,
        }
    }
}
