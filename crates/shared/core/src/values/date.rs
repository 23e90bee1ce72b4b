use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};
use std::str::FromStr;

use super::Time;
use crate::error::{TimeError, TimeResult};
use crate::zone::ZoneRequest;

/// A calendar day
///
/// Days are for reading and display: which day an instant falls on in some
/// zone, and how that day reads relative to today. There is no day arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    inner: NaiveDate,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> TimeResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or_else(|| {
                TimeError::InvalidFields(format!("{:04}-{:02}-{:02}", year, month, day))
            })
    }

    /// The day `time` falls on in the requested zone
    pub fn from_time(time: &Time, zone: &ZoneRequest) -> TimeResult<Self> {
        Ok(Self::from(time.to_datetime(zone)?.date_naive()))
    }

    /// Today in the requested zone, honouring the mock-now override
    pub fn today(zone: &ZoneRequest) -> TimeResult<Self> {
        Self::from_time(&Time::now(), zone)
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

    pub fn to_naive_date(&self) -> NaiveDate {
        self.inner
    }

    /// `YYYY-MM-DD`, or the strftime `format` when given
    pub fn to_str(&self, format: Option<&str>) -> TimeResult<String> {
        let format = format.unwrap_or("%Y-%m-%d");
        let mut out = String::new();
        write!(out, "{}", self.inner.format(format))
            .map_err(|_| TimeError::InvalidFormat(format.to_string()))?;
        Ok(out)
    }

    /// `"today"`, `"tomorrow"`, `"yesterday"` or e.g. `"Apr 18"`
    ///
    /// Which day counts as today depends on the zone, so it is a parameter.
    pub fn to_human(&self, zone: &ZoneRequest) -> TimeResult<String> {
        let today = Self::today(zone)?;
        Ok(dmc_humanize::natural_date(self.inner, today.inner))
    }
}

impl From<NaiveDate> for Date {
    fn from(inner: NaiveDate) -> Self {
        Self { inner }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        Ok(Self::from(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
