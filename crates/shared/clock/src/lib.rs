//! dmc Clock Infrastructure
//!
//! Provides the sources of "now" used by the dmc value types:
//!
//! ## Clock Sources
//!
//! ```text
//! Clock (port)
//!     │
//!     ├── SystemClock (real wall clock, UTC)
//!     ├── FixedClock  (frozen, only moves when advanced)
//!     └── MockClock   (mock-now override if set, otherwise SystemClock)
//! ```
//!
//! ## Mock Now
//!
//! Tests can replace the current time for the calling thread:
//!
//! ```
//! use dmc_clock::{MockNow, mock_now, now};
//! use chrono::{TimeZone, Utc};
//!
//! let frozen = Utc.with_ymd_and_hms(2014, 4, 18, 0, 0, 0).unwrap();
//! {
//!     let _guard = MockNow::new(frozen);
//!     assert_eq!(now(), frozen);
//! } // cleared here, even on panic
//! assert_eq!(mock_now(), None);
//! ```

mod clock;
mod fixed;
mod mock;
mod system;

pub use clock::Clock;
pub use fixed::FixedClock;
pub use mock::{MockClock, MockNow, clear_mock_now, mock_now, set_mock_now, with_mock_now};
pub use system::SystemClock;

use chrono::{DateTime, Utc};

/// Current UTC time, honouring the mock-now override of the calling thread
pub fn now() -> DateTime<Utc> {
    MockClock.now()
}
