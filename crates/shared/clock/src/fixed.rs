use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

use crate::Clock;

/// Frozen clock for deterministic tests
///
/// Time never moves on its own; it only changes through `advance` or `set_time`.
/// Unlike the mock-now override this clock is an explicit value that can be
/// handed to code under test and shared between threads.
pub struct FixedClock {
    current_time: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a fixed clock frozen at `time`
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(time),
        }
    }

    /// Advance the frozen time by `duration` (may be negative)
    pub fn advance(&self, duration: Duration) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Explicitly set the frozen time
    pub fn set_time(&self, time: DateTime<Utc>) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = time;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
