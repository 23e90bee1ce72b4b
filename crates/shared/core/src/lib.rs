//! dmc Core
//!
//! Date and time value types, always normalized to UTC:
//!
//! - [`TimeInterval`]: signed elapsed time, whole seconds plus a non-negative
//!   microsecond remainder
//! - [`Time`]: a UTC instant with microsecond resolution
//! - [`TimeSpan`]: a pair of instants
//! - [`TimeIterator`] / [`TimeSpanIterator`]: fixed-step walks over a span
//! - [`Date`]: a calendar day, for display only
//!
//! Zone handling goes through [`ZoneRequest`] (what the caller asked for) and
//! [`Zone`] (the resolved IANA zone, the process local zone, or UTC).
//!
//! This crate contains no I/O and no shared state apart from the thread-local
//! mock clock used by [`testing`].

pub mod error;
pub mod iter;
mod parse;
pub mod testing;
pub mod values;
pub mod zone;

// Re-export commonly used types at crate root
pub use error::{TimeError, TimeResult};
pub use iter::{TimeIter, TimeIterator, TimeSpanIter, TimeSpanIterator};
pub use values::{Date, Operand, Time, TimeInterval, TimeSpan};
pub use zone::{Zone, ZoneRequest};

// Re-export the clock port for dependency-injected "now"
pub use dmc_clock::{Clock, FixedClock, MockClock, SystemClock};
