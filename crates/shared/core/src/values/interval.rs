use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{MICROS_PER_SECOND, split_seconds};
use crate::error::{TimeError, TimeResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Signed elapsed time with microsecond precision
///
/// Stored as whole `seconds` (may be negative) plus `microseconds` in
/// `[0, 1_000_000)`. The sign lives entirely in `seconds`, so `-2.22s` is
/// `(-3, 780_000)`. Every constructor and every arithmetic result carries
/// excess microseconds into seconds, which makes equality and ordering a
/// plain comparison of the `(seconds, microseconds)` pair.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    seconds: i64,
    microseconds: i64,
}

/// Wire form, renormalized on the way in
#[derive(Deserialize)]
struct RawInterval {
    seconds: i64,
    #[serde(default)]
    microseconds: i64,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = TimeError;

    fn try_from(raw: RawInterval) -> TimeResult<Self> {
        Self::checked_normalized(raw.seconds, raw.microseconds)
            .ok_or_else(|| TimeError::Overflow(format!("{}s {}us", raw.seconds, raw.microseconds)))
    }
}

impl TimeInterval {
    pub const ZERO: Self = Self {
        seconds: 0,
        microseconds: 0,
    };

    /// Build an interval from additive parts
    ///
    /// `seconds` may be fractional: its floor goes to the second count and the
    /// remainder, rounded to the nearest microsecond, joins `microseconds`.
    ///
    /// A NaN `seconds` counts as zero and infinities saturate, following
    /// `as` casts. Use [`TimeInterval::checked_new`] to reject them.
    ///
    /// # Panics
    /// If the total number of seconds does not fit in an `i64`.
    pub fn new(seconds: f64, minutes: i64, hours: i64, microseconds: i64) -> Self {
        let (whole, fraction) = split_seconds(seconds);
        Self::normalized(
            whole + minutes * SECONDS_PER_MINUTE + hours * SECONDS_PER_HOUR,
            fraction + microseconds,
        )
    }

    /// Like [`TimeInterval::new`], but fails with `OutOfRange` on non-finite
    /// `seconds` and with `Overflow` when the total does not fit in an `i64`
    pub fn checked_new(
        seconds: f64,
        minutes: i64,
        hours: i64,
        microseconds: i64,
    ) -> TimeResult<Self> {
        // 2^63 is exact in f64; anything at or beyond it saturates the cast
        if !seconds.is_finite() || seconds.abs() >= 9_223_372_036_854_775_808.0 {
            return Err(TimeError::OutOfRange(format!("{} seconds", seconds)));
        }

        let (whole, fraction) = split_seconds(seconds);
        minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .zip(hours.checked_mul(SECONDS_PER_HOUR))
            .and_then(|(m, h)| whole.checked_add(m)?.checked_add(h))
            .zip(fraction.checked_add(microseconds))
            .and_then(|(total, micros)| Self::checked_normalized(total, micros))
            .ok_or_else(|| {
                TimeError::Overflow(format!(
                    "{}s {}m {}h {}us",
                    seconds, minutes, hours, microseconds
                ))
            })
    }

    pub fn from_secs_f64(seconds: f64) -> Self {
        Self::new(seconds, 0, 0, 0)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self::normalized(seconds, 0)
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::normalized(minutes * SECONDS_PER_MINUTE, 0)
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::normalized(hours * SECONDS_PER_HOUR, 0)
    }

    pub fn from_micros(microseconds: i64) -> Self {
        Self::normalized(0, microseconds)
    }

    /// Convert a days/seconds/microseconds triple, the shape most calendar
    /// libraries use for durations
    ///
    /// Fails with `Overflow` when `days` expressed in seconds does not fit in an `i64`.
    pub fn from_days(days: i64, seconds: i64, microseconds: i64) -> TimeResult<Self> {
        days.checked_mul(SECONDS_PER_DAY)
            .and_then(|day_seconds| day_seconds.checked_add(seconds))
            .and_then(|total| Self::checked_normalized(total, microseconds))
            .ok_or_else(|| TimeError::Overflow(format!("{} days does not fit in seconds", days)))
    }

    /// Convert a chrono duration, truncating below the microsecond
    pub fn from_chrono(delta: TimeDelta) -> Self {
        Self::normalized(delta.num_seconds(), i64::from(delta.subsec_nanos() / 1_000))
    }

    /// Convert to a chrono duration
    pub fn to_chrono(&self) -> TimeResult<TimeDelta> {
        TimeDelta::try_seconds(self.seconds)
            .and_then(|whole| whole.checked_add(&TimeDelta::microseconds(self.microseconds)))
            .ok_or_else(|| TimeError::OutOfRange(format!("{} exceeds chrono's range", self)))
    }

    fn normalized(seconds: i64, microseconds: i64) -> Self {
        Self {
            seconds: seconds + microseconds.div_euclid(MICROS_PER_SECOND),
            microseconds: microseconds.rem_euclid(MICROS_PER_SECOND),
        }
    }

    fn checked_normalized(seconds: i64, microseconds: i64) -> Option<Self> {
        Some(Self {
            seconds: seconds.checked_add(microseconds.div_euclid(MICROS_PER_SECOND))?,
            microseconds: microseconds.rem_euclid(MICROS_PER_SECOND),
        })
    }

    /// Whole seconds, floored (the sign carrier)
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second remainder, always in `[0, 1_000_000)`
    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.seconds as f64 + self.microseconds as f64 / MICROS_PER_SECOND as f64
    }

    /// Seconds rounded half away from zero; exact when there is no remainder
    pub fn as_secs_rounded(&self) -> i64 {
        if self.microseconds == 0 {
            self.seconds
        } else {
            self.as_secs_f64().round() as i64
        }
    }

    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// Magnitude of the interval
    pub fn abs(&self) -> Self {
        if self.is_negative() { -*self } else { *self }
    }

    pub fn checked_add(&self, rhs: impl Into<Operand>) -> Option<Self> {
        let rhs = rhs.into().to_interval();
        Self::checked_normalized(
            self.seconds.checked_add(rhs.seconds)?,
            self.microseconds + rhs.microseconds,
        )
    }

    pub fn checked_sub(&self, rhs: impl Into<Operand>) -> Option<Self> {
        let rhs = rhs.into().to_interval();
        Self::checked_normalized(
            self.seconds.checked_sub(rhs.seconds)?,
            self.microseconds - rhs.microseconds,
        )
    }

    /// Scale by `factor`
    ///
    /// The seconds and microseconds fields are scaled independently and then
    /// renormalized, so the result can differ in the last microsecond from
    /// scaling `as_secs_f64()`.
    pub fn checked_mul(&self, factor: f64) -> Option<Self> {
        self.scaled(|field| field * factor)
    }

    /// Divide by `divisor`, field by field like `checked_mul`
    pub fn checked_div(&self, divisor: f64) -> Option<Self> {
        if divisor == 0.0 {
            return None;
        }
        self.scaled(|field| field / divisor)
    }

    fn scaled(&self, scale: impl Fn(f64) -> f64) -> Option<Self> {
        let seconds = scale(self.seconds as f64);
        let microseconds = scale(self.microseconds as f64).round();
        if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 || !microseconds.is_finite() {
            return None;
        }

        let (whole, fraction) = split_seconds(seconds);
        Self::checked_normalized(whole, fraction.checked_add(microseconds as i64)?)
    }
}

impl fmt::Display for TimeInterval {
    /// `±HH:MM:SS.s`, e.g. `+01:45:21.6`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds);
        let sign = if total < 0 { '-' } else { '+' };
        let magnitude = total.unsigned_abs();

        let micros_per_second = MICROS_PER_SECOND as u128;
        let whole = magnitude / micros_per_second;
        let hours = whole / SECONDS_PER_HOUR as u128;
        let minutes = (whole % SECONDS_PER_HOUR as u128) / SECONDS_PER_MINUTE as u128;
        let seconds = (whole % SECONDS_PER_MINUTE as u128) as f64
            + (magnitude % micros_per_second) as f64 / MICROS_PER_SECOND as f64;

        write!(f, "{}{:02}:{:02}:{:04.1}", sign, hours, minutes, seconds)
    }
}

impl From<TimeDelta> for TimeInterval {
    fn from(delta: TimeDelta) -> Self {
        Self::from_chrono(delta)
    }
}

impl From<std::time::Duration> for TimeInterval {
    fn from(duration: std::time::Duration) -> Self {
        let seconds = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        Self::normalized(seconds, i64::from(duration.subsec_micros()))
    }
}

impl From<TimeInterval> for f64 {
    fn from(interval: TimeInterval) -> Self {
        interval.as_secs_f64()
    }
}

impl From<TimeInterval> for i64 {
    fn from(interval: TimeInterval) -> Self {
        interval.as_secs_rounded()
    }
}

/// Right-hand side of interval and instant arithmetic
///
/// Plain numbers are seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Interval(TimeInterval),
    Seconds(f64),
}

impl Operand {
    pub fn to_interval(self) -> TimeInterval {
        match self {
            Operand::Interval(interval) => interval,
            Operand::Seconds(seconds) => TimeInterval::from_secs_f64(seconds),
        }
    }
}

impl From<TimeInterval> for Operand {
    fn from(interval: TimeInterval) -> Self {
        Operand::Interval(interval)
    }
}

impl From<f64> for Operand {
    fn from(seconds: f64) -> Self {
        Operand::Seconds(seconds)
    }
}

impl From<i64> for Operand {
    fn from(seconds: i64) -> Self {
        Operand::Interval(TimeInterval::from_seconds(seconds))
    }
}

impl Neg for TimeInterval {
    type Output = TimeInterval;

    fn neg(self) -> TimeInterval {
        TimeInterval::normalized(-self.seconds, -self.microseconds)
    }
}

impl Add for TimeInterval {
    type Output = TimeInterval;

    fn add(self, rhs: TimeInterval) -> TimeInterval {
        self.checked_add(rhs)
            .expect("overflow when adding time intervals")
    }
}

impl Sub for TimeInterval {
    type Output = TimeInterval;

    fn sub(self, rhs: TimeInterval) -> TimeInterval {
        self.checked_sub(rhs)
            .expect("overflow when subtracting time intervals")
    }
}

/// Arithmetic with plain numbers of seconds
///
/// Addition commutes. `number - interval` yields a plain number.
macro_rules! scalar_ops {
    ($($scalar:ty),*) => {$(
        impl Add<$scalar> for TimeInterval {
            type Output = TimeInterval;

            fn add(self, rhs: $scalar) -> TimeInterval {
                self.checked_add(rhs)
                    .expect("overflow when adding seconds to a time interval")
            }
        }

        impl Add<TimeInterval> for $scalar {
            type Output = TimeInterval;

            fn add(self, rhs: TimeInterval) -> TimeInterval {
                rhs + self
            }
        }

        impl Sub<$scalar> for TimeInterval {
            type Output = TimeInterval;

            fn sub(self, rhs: $scalar) -> TimeInterval {
                self.checked_sub(rhs)
                    .expect("overflow when subtracting seconds from a time interval")
            }
        }

        impl Sub<TimeInterval> for $scalar {
            type Output = f64;

            fn sub(self, rhs: TimeInterval) -> f64 {
                self as f64 - rhs.as_secs_f64()
            }
        }

        impl Mul<$scalar> for TimeInterval {
            type Output = TimeInterval;

            fn mul(self, rhs: $scalar) -> TimeInterval {
                self.checked_mul(rhs as f64)
                    .expect("overflow when multiplying a time interval")
            }
        }

        impl Div<$scalar> for TimeInterval {
            type Output = TimeInterval;

            fn div(self, rhs: $scalar) -> TimeInterval {
                self.checked_div(rhs as f64)
                    .expect("overflow or division by zero when dividing a time interval")
            }
        }
    )*};
}

scalar_ops!(f64, i64);

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(interval: TimeInterval) -> (i64, i64) {
        (interval.seconds(), interval.microseconds())
    }

    #[test]
    fn test_whole_and_fractional_seconds() {
        assert_eq!(parts(TimeInterval::from_seconds(21)), (21, 0));
        assert_eq!(parts(TimeInterval::from_secs_f64(1.2)), (1, 200_000));
        assert_eq!(parts(TimeInterval::from_secs_f64(-2.22)), (-3, 780_000));
    }

    #[test]
    fn test_minutes_hours_micros() {
        assert_eq!(parts(TimeInterval::from_minutes(2)), (120, 0));
        assert_eq!(parts(TimeInterval::from_hours(1)), (3_600, 0));
        assert_eq!(parts(TimeInterval::from_micros(10)), (0, 10));
        assert_eq!(parts(TimeInterval::from_micros(1_200_000)), (1, 200_000));
        assert_eq!(parts(TimeInterval::from_micros(-1)), (-1, 999_999));
    }

    #[test]
    fn test_microsecond_overflow_carries() {
        let interval = TimeInterval::new(1.9, 0, 0, 200_000);
        assert_eq!(parts(interval), (2, 100_000));
    }

    #[test]
    fn test_parts_are_additive() {
        let interval = TimeInterval::new(21.0, 45, 1, 600_000);
        assert_eq!(parts(interval), (6_321, 600_000));
    }

    #[test]
    fn test_checked_new() {
        assert_eq!(
            TimeInterval::checked_new(2.22, 1, 1, 5).unwrap(),
            TimeInterval::new(2.22, 1, 1, 5)
        );
        assert!(matches!(
            TimeInterval::checked_new(f64::NAN, 0, 0, 0),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeInterval::checked_new(f64::INFINITY, 0, 0, 0),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeInterval::checked_new(1e19, 0, 0, 0),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeInterval::checked_new(0.0, 0, i64::MAX, 0),
            Err(TimeError::Overflow(_))
        ));
        assert!(matches!(
            TimeInterval::checked_new(0.0, i64::MAX / 60, i64::MAX / 3600, 0),
            Err(TimeError::Overflow(_))
        ));
    }

    #[test]
    fn test_nan_seconds_count_as_zero() {
        assert_eq!(TimeInterval::from_secs_f64(f64::NAN), TimeInterval::ZERO);
    }

    #[test]
    fn test_from_days() {
        let interval = TimeInterval::from_days(1, 10, 1_000).unwrap();
        assert_eq!(parts(interval), (86_410, 1_000));
        assert_eq!(interval.as_secs_f64(), 86_410.001);
    }

    #[test]
    fn test_from_days_overflow() {
        let err = TimeInterval::from_days(i64::MAX / 1_000, 0, 0).unwrap_err();
        assert!(matches!(err, TimeError::Overflow(_)));
    }

    #[test]
    fn test_chrono_conversion() {
        let delta = TimeDelta::seconds(-3) + TimeDelta::microseconds(780_000);
        let interval = TimeInterval::from_chrono(delta);
        assert_eq!(interval, TimeInterval::from_secs_f64(-2.22));
        assert_eq!(interval.to_chrono().unwrap(), delta);

        let std_duration = std::time::Duration::from_micros(2_500_000);
        assert_eq!(TimeInterval::from(std_duration), TimeInterval::from_secs_f64(2.5));
    }

    #[test]
    fn test_int_and_float() {
        assert_eq!(TimeInterval::from_seconds(4).as_secs_rounded(), 4);
        assert_eq!(TimeInterval::new(4.0, 0, 0, 600_000).as_secs_rounded(), 5);
        assert_eq!(TimeInterval::new(4.0, 0, 0, 400_000).as_secs_rounded(), 4);
        assert_eq!(f64::from(TimeInterval::new(4.0, 0, 0, 600_000)), 4.6);
        assert_eq!(i64::from(TimeInterval::from_secs_f64(-4.5)), -5);
    }

    #[test]
    fn test_display() {
        let interval = TimeInterval::new(21.0, 45, 1, 600_000);
        assert_eq!(interval.to_string(), "+01:45:21.6");
        assert_eq!(TimeInterval::ZERO.to_string(), "+00:00:00.0");
        assert_eq!(TimeInterval::from_secs_f64(-65.5).to_string(), "-00:01:05.5");
    }

    #[test]
    fn test_add_and_sub() {
        let one = TimeInterval::from_seconds(1);
        let two = TimeInterval::from_seconds(2);

        assert_eq!((one + one).seconds(), 2);
        assert_eq!((two - one).seconds(), 1);
        assert_eq!((one - two).seconds(), -1);
        assert_eq!(parts(TimeInterval::from_micros(1) - one), (-1, 1));
    }

    #[test]
    fn test_scalar_add_commutes() {
        let one = TimeInterval::from_seconds(1);

        assert_eq!((one + 1_i64).seconds(), 2);
        assert_eq!((1_i64 + one).seconds(), 2);
        assert_eq!(one + 0.5, 0.5 + one);
        assert_eq!(parts(one + 0.5), (1, 500_000));
    }

    #[test]
    fn test_scalar_sub() {
        let two = TimeInterval::from_seconds(2);

        assert_eq!((two - 1_i64).seconds(), 1);
        assert_eq!(1_i64 - two, -1.0);
        assert_eq!(2.5 - two, 0.5);
    }

    #[test]
    fn test_mul_and_div() {
        assert_eq!((TimeInterval::from_seconds(2) * 3_i64).as_secs_rounded(), 6);
        assert_eq!((TimeInterval::from_seconds(5) / 2_i64).as_secs_f64(), 2.5);

        let halved = TimeInterval::new(2.0, 0, 0, 22) / 2_i64;
        assert_eq!(parts(halved), (1, 11));

        let scaled = TimeInterval::new(1.0, 0, 0, 600_000) * 2.5;
        assert_eq!(parts(scaled), (4, 0));
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert_eq!(TimeInterval::from_seconds(1).checked_div(0.0), None);
        assert_eq!(TimeInterval::from_seconds(i64::MAX).checked_add(1_i64), None);
    }

    #[test]
    fn test_abs_and_neg() {
        let negative = TimeInterval::from_secs_f64(-2.22);
        assert_eq!(negative.abs(), TimeInterval::from_secs_f64(2.22));
        assert_eq!(negative.abs().as_secs_f64(), 2.22);
        assert_eq!(TimeInterval::from_secs_f64(2.22).abs().as_secs_f64(), 2.22);
        assert_eq!(-negative, TimeInterval::from_secs_f64(2.22));
    }

    #[test]
    fn test_equality_across_constructors() {
        assert_eq!(
            TimeInterval::from_secs_f64(2.22),
            TimeInterval::new(2.0, 0, 0, 220_000)
        );
        assert_eq!(TimeInterval::from_minutes(1), TimeInterval::new(0.0, 0, 0, 60_000_000));
    }

    #[test]
    fn test_ordering() {
        assert!(TimeInterval::from_secs_f64(2.22) > TimeInterval::from_secs_f64(2.20));
        assert!(TimeInterval::from_secs_f64(3.22) > TimeInterval::from_secs_f64(2.5));
        assert!(TimeInterval::ZERO < TimeInterval::from_micros(1));
        assert!(TimeInterval::from_seconds(-3) < TimeInterval::from_secs_f64(2.5));
        assert!(TimeInterval::from_secs_f64(-0.5) < TimeInterval::ZERO);
    }

    #[test]
    fn test_serde_renormalizes() {
        let json = serde_json::to_string(&TimeInterval::from_secs_f64(2.5)).unwrap();
        assert_eq!(json, r#"{"seconds":2,"microseconds":500000}"#);

        let parsed: TimeInterval =
            serde_json::from_str(r#"{"seconds":1,"microseconds":1200000}"#).unwrap();
        assert_eq!(parts(parsed), (2, 200_000));
    }
}
