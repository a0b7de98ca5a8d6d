//! Time source for deadline checks.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current timestamp in seconds.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A clock frozen at a settable timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(u64);

impl FixedClock {
    /// Creates a clock reading `timestamp`.
    #[must_use]
    pub const fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Moves the clock to `timestamp`.
    pub fn set(&mut self, timestamp: u64) {
        self.0 = timestamp;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
