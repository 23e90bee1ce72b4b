use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDateTime, SubsecRound, TimeZone, Timelike, Utc,
};
use dmc_clock::{Clock, MockClock, SystemClock};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::{MICROS_PER_SECOND, Operand, TimeInterval, split_seconds};
use crate::error::{TimeError, TimeResult};
use crate::parse::{ParsedTime, parse_iso8601, parse_with_format};
use crate::zone::{Zone, ZoneRequest};

/// An instant, always stored in UTC with microsecond resolution
///
/// Whatever zone a `Time` was built or parsed in, the stored value is the
/// equivalent UTC instant. Zone conversions happen on the way out and never
/// change the value, so two `Time`s are equal exactly when they name the same
/// microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    inner: DateTime<Utc>,
}

impl Time {
    /// Build from UTC wall-clock fields
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> TimeResult<Self> {
        Self::new_in(
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
            &ZoneRequest::utc(),
        )
    }

    /// Build from wall-clock fields read in `zone`
    ///
    /// Fails when the zone request is contradictory, or when the fields name a
    /// wall time that is ambiguous or skipped in that zone.
    #[allow(clippy::too_many_arguments)]
    pub fn new_in(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
        zone: &ZoneRequest,
    ) -> TimeResult<Self> {
        let zone = zone.resolve()?;
        let wall = chrono::NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_micro_opt(hour, minute, second, microsecond))
            .ok_or_else(|| {
                TimeError::InvalidFields(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                    year, month, day, hour, minute, second, microsecond
                ))
            })?;
        Self::from_wall(&wall, &zone)
    }

    /// Build from wall-clock fields read in the requested zone
    pub fn from_naive_in(wall: NaiveDateTime, zone: &ZoneRequest) -> TimeResult<Self> {
        Self::from_wall(&wall, &zone.resolve()?)
    }

    fn from_wall(wall: &NaiveDateTime, zone: &Zone) -> TimeResult<Self> {
        zone.to_utc(wall).map(Self::from)
    }

    /// Current time, or the mock-now override when one is set
    pub fn now() -> Self {
        Self::now_from(&MockClock)
    }

    /// Current time according to `clock`
    pub fn now_from(clock: &dyn Clock) -> Self {
        Self::from(clock.now())
    }

    /// Build from fractional seconds since the Unix epoch
    ///
    /// The fraction is kept, rounded to the nearest microsecond.
    pub fn from_timestamp(timestamp: f64) -> TimeResult<Self> {
        if !timestamp.is_finite() || timestamp.abs() >= i64::MAX as f64 {
            return Err(TimeError::OutOfRange(format!("timestamp {}", timestamp)));
        }

        let (seconds, micros) = split_seconds(timestamp);
        let seconds = seconds + micros / MICROS_PER_SECOND;
        let micros = (micros % MICROS_PER_SECOND) as u32;
        DateTime::from_timestamp(seconds, micros * 1_000)
            .map(Self::from)
            .ok_or_else(|| TimeError::OutOfRange(format!("timestamp {}", timestamp)))
    }

    /// Build from a zone-aware chrono value, converting it to UTC
    pub fn from_datetime<T: TimeZone>(dt: &DateTime<T>) -> Self {
        Self::from(dt.with_timezone(&Utc))
    }

    /// Build from a naive chrono value, which is taken to be UTC already
    pub fn from_naive(wall: NaiveDateTime) -> Self {
        Self::from(wall.and_utc())
    }

    /// Parse ISO-8601; a string without an offset is read as UTC
    pub fn parse(input: &str) -> TimeResult<Self> {
        Self::parse_with(input, None, &ZoneRequest::utc())
    }

    /// Parse with an optional strftime `format` (ISO-8601 when `None`)
    ///
    /// A string without an offset is read in `zone`. A string that carries its
    /// own offset is rejected when `zone` is explicit, since the two could disagree.
    pub fn parse_with(input: &str, format: Option<&str>, zone: &ZoneRequest) -> TimeResult<Self> {
        let resolved = zone.resolve()?;
        let parsed = match format {
            Some(format) => parse_with_format(input, format)?,
            None => parse_iso8601(input)?,
        };

        match parsed {
            ParsedTime {
                offset: Some(_), ..
            } if zone.is_explicit() => Err(TimeError::OffsetInString(input.to_string())),
            ParsedTime {
                wall,
                offset: Some(offset),
            } => offset
                .from_local_datetime(&wall)
                .single()
                .map(|dt| Self::from_datetime(&dt))
                .ok_or_else(|| TimeError::OutOfRange(input.to_string())),
            ParsedTime { wall, offset: None } => Self::from_wall(&wall, &resolved),
        }
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    pub fn microsecond(&self) -> u32 {
        self.inner.nanosecond() / 1_000
    }

    /// Wall-clock view in the requested zone; UTC by default
    pub fn to_datetime(&self, zone: &ZoneRequest) -> TimeResult<DateTime<FixedOffset>> {
        Ok(zone.resolve()?.localize(&self.inner))
    }

    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        self.inner
    }

    /// Render in the requested zone, as ISO-8601 or with a strftime `format`
    pub fn to_str(&self, format: Option<&str>, zone: &ZoneRequest) -> TimeResult<String> {
        let local = self.to_datetime(zone)?;
        match format {
            None => Ok(iso8601(&local)),
            Some(format) => {
                let mut out = String::new();
                write!(out, "{}", local.format(format))
                    .map_err(|_| TimeError::InvalidFormat(format.to_string()))?;
                Ok(out)
            }
        }
    }

    /// Fractional seconds since the Unix epoch, microseconds included
    pub fn to_timestamp(&self) -> f64 {
        self.inner.timestamp() as f64 + self.microsecond() as f64 / MICROS_PER_SECOND as f64
    }

    /// Relative phrase against the real wall clock, e.g. `"3 hours ago"`
    pub fn to_human(&self) -> String {
        self.to_human_from(&Self::now_from(&SystemClock))
    }

    /// Relative phrase against `now`
    pub fn to_human_from(&self, now: &Time) -> String {
        dmc_humanize::natural_time(self.inner.naive_utc(), now.inner.naive_utc())
    }

    pub fn checked_add(&self, rhs: impl Into<Operand>) -> TimeResult<Self> {
        let delta = rhs.into().to_interval().to_chrono()?;
        self.inner
            .checked_add_signed(delta)
            .map(Self::from)
            .ok_or_else(|| TimeError::Overflow(format!("{} + {:?}", self, delta)))
    }

    pub fn checked_sub(&self, rhs: impl Into<Operand>) -> TimeResult<Self> {
        let delta = rhs.into().to_interval().to_chrono()?;
        self.inner
            .checked_sub_signed(delta)
            .map(Self::from)
            .ok_or_else(|| TimeError::Overflow(format!("{} - {:?}", self, delta)))
    }
}

/// ISO-8601 with an explicit offset, fraction only when non-zero
fn iso8601<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: fmt::Display,
{
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            inner: dt.trunc_subsecs(6),
        }
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(time: Time) -> Self {
        time.inner
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&iso8601(&self.inner))
    }
}

impl FromStr for Time {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        Self::parse(s)
    }
}

impl PartialEq<DateTime<Utc>> for Time {
    fn eq(&self, other: &DateTime<Utc>) -> bool {
        self.inner == *other
    }
}

impl PartialOrd<DateTime<Utc>> for Time {
    fn partial_cmp(&self, other: &DateTime<Utc>) -> Option<Ordering> {
        self.inner.partial_cmp(other)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

macro_rules! time_ops {
    ($($rhs:ty),*) => {$(
        impl Add<$rhs> for Time {
            type Output = Time;

            fn add(self, rhs: $rhs) -> Time {
                self.checked_add(rhs)
                    .expect("`Time + interval` overflowed")
            }
        }

        impl Sub<$rhs> for Time {
            type Output = Time;

            fn sub(self, rhs: $rhs) -> Time {
                self.checked_sub(rhs)
                    .expect("`Time - interval` overflowed")
            }
        }
    )*};
}

time_ops!(TimeInterval, f64, i64);

impl Add<Time> for TimeInterval {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        rhs + self
    }
}

impl Sub for Time {
    type Output = TimeInterval;

    fn sub(self, rhs: Time) -> TimeInterval {
        TimeInterval::from_chrono(self.inner - rhs.inner)
    }
}
