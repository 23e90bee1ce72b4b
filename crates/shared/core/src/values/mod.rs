mod date;
mod interval;
mod span;
mod time;

pub use date::Date;
pub use interval::{Operand, TimeInterval};
pub use span::TimeSpan;
pub use time::Time;

/// Microseconds in one second
pub(crate) const MICROS_PER_SECOND: i64 = 1_000_000;

/// Split fractional seconds into whole seconds (floored) and a microsecond
/// remainder rounded to the nearest microsecond
///
/// The remainder may come out as exactly `MICROS_PER_SECOND`; callers carry it.
/// Non-finite input saturates like an `as` cast, so NaN comes out as `(0, 0)`.
pub(crate) fn split_seconds(seconds: f64) -> (i64, i64) {
    let whole = seconds.floor();
    let micros = ((seconds - whole) * MICROS_PER_SECOND as f64).round();
    (whole as i64, micros as i64)
}
