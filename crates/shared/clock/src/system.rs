use chrono::{DateTime, SubsecRound, Utc};

use crate::Clock;

/// Operating-system wall clock, read at microsecond resolution
///
/// Never consults the mock-now stack. Reach for [`crate::MockClock`] when a
/// test override should win.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
