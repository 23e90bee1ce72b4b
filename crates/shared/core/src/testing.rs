//! Mock-now helpers typed on [`Time`]
//!
//! Thin wrappers over the thread-local override in `dmc_clock`. Every test
//! thread has its own override, so tests running in parallel do not see each
//! other's mocked time; a value set on one thread is not visible on another.

use crate::values::Time;

/// Install `now` as the current time for this thread; the latest value wins
pub fn set_mock_now(now: &Time) {
    dmc_clock::set_mock_now(now.to_utc_datetime());
}

/// Remove every override for this thread
pub fn clear_mock_now() {
    dmc_clock::clear_mock_now();
}

/// The active override, if any
pub fn mock_now() -> Option<Time> {
    dmc_clock::mock_now().map(Time::from)
}

/// Run `f` with `now` installed, clearing the override afterwards even on panic
pub fn with_mock_now<T>(now: &Time, f: impl FnOnce() -> T) -> T {
    dmc_clock::with_mock_now(now.to_utc_datetime(), f)
}

/// Scoped override: set on construction, cleared on drop
#[must_use = "the override is cleared as soon as the guard is dropped"]
pub struct MockNow {
    _guard: dmc_clock::MockNow,
}

impl MockNow {
    pub fn new(now: &Time) -> Self {
        Self {
            _guard: dmc_clock::MockNow::new(now.to_utc_datetime()),
        }
    }
}
