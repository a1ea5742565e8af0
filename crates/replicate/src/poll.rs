//! Fixed-interval polling policy.
//!
//! Predictions are polled by sleeping for [`PollPolicy::interval`] and then
//! re-reading the prediction. The loop either stops at a terminal state or,
//! when `max_attempts` is set, gives up after that many status reads.

use std::time::Duration;

/// Default delay between status reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default poll budget (about two minutes at the default interval).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// How a pending prediction is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before each status read.
    pub interval: Duration,
    /// Maximum number of status reads; `None` polls until a terminal state.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl PollPolicy {
    /// Bounded policy: fail after `max_attempts` non-terminal reads.
    pub fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    /// Unbounded policy: rely on the caller's deadline.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Whether the budget allows another read after `attempts` reads.
    pub fn allows(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}
