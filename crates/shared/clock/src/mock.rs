//! Mock-now override
//!
//! A test-only replacement for the real current-time source. The override is
//! a stack where the most recently set value wins; clearing empties it.
//!
//! The stack lives in thread-local storage, so every test thread sees its own
//! override and parallel tests cannot observe each other's mocked time. The
//! flip side is that a value set on one thread is invisible to any other
//! thread: concurrent use across threads or tasks is not supported.

use chrono::{DateTime, Utc};
use log::debug;
use std::cell::RefCell;

use crate::{Clock, SystemClock};

thread_local! {
    static MOCK_NOW: RefCell<Vec<DateTime<Utc>>> = const { RefCell::new(Vec::new()) };
}

/// Push `now` onto the override stack; it shadows any earlier value
pub fn set_mock_now(now: DateTime<Utc>) {
    debug!("mock now set to {}", now);
    MOCK_NOW.with(|stack| stack.borrow_mut().push(now));
}

/// Remove every override for the calling thread
pub fn clear_mock_now() {
    debug!("mock now cleared");
    MOCK_NOW.with(|stack| stack.borrow_mut().clear());
}

/// The active override, if any
pub fn mock_now() -> Option<DateTime<Utc>> {
    MOCK_NOW.with(|stack| stack.borrow().last().copied())
}

/// Run `f` with `now` installed as the override
///
/// The override is cleared when `f` returns or unwinds.
pub fn with_mock_now<T>(now: DateTime<Utc>, f: impl FnOnce() -> T) -> T {
    let _guard = MockNow::new(now);
    f()
}

/// Scoped mock-now override
///
/// Sets the override on construction and unconditionally clears it on drop,
/// including when the scope is left through a panic.
#[must_use = "the override is cleared as soon as the guard is dropped"]
pub struct MockNow {
    _private: (),
}

impl MockNow {
    pub fn new(now: DateTime<Utc>) -> Self {
        set_mock_now(now);
        Self { _private: () }
    }
}

impl Drop for MockNow {
    fn drop(&mut self) {
        clear_mock_now();
    }
}

/// Clock that reports the mock-now override when one is set,
/// and the real system time otherwise
#[derive(Debug, Default, Clone, Copy)]
pub struct MockClock;

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        mock_now().unwrap_or_else(|| SystemClock.now())
    }

    fn name(&self) -> &str {
        "MockClock"
    }
}
