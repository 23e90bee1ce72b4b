//! dmc Humanize
//!
//! Renders instants and calendar days as short English phrases relative to
//! an explicit "now": `"3 hours ago"`, `"a minute from now"`, `"tomorrow"`.
//!
//! Every function takes its reference point as an argument. Nothing here
//! reads a clock, which keeps the output deterministic under test.

mod date;
mod delta;

pub use date::{natural_date, natural_day};
pub use delta::{natural_delta, natural_time};
