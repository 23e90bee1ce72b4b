use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::trace;

use crate::error::{TimeError, TimeResult};

/// Wall-clock fields read from a string, plus the offset if the string had one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedTime {
    pub wall: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl ParsedTime {
    fn naive(wall: NaiveDateTime) -> Self {
        Self {
            wall: truncate_to_micros(wall),
            offset: None,
        }
    }

    fn aware(dt: DateTime<FixedOffset>) -> Self {
        Self {
            wall: truncate_to_micros(dt.naive_local()),
            offset: Some(*dt.offset()),
        }
    }
}

const DATE_TIME_SEPARATORS: [char; 2] = ['T', ' '];
const OFFSET_SPECIFIERS: [&str; 3] = ["%:z", "%z", "%#z"];
const TIME_PATTERNS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parse ISO-8601 with an optional UTC offset
///
/// Accepts `T` or a space between date and time, seconds and fractions are
/// optional, and the offset may be `Z`, `±HH:MM`, `±HHMM` or `±HH`.
/// A bare date means midnight.
pub(crate) fn parse_iso8601(input: &str) -> TimeResult<ParsedTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(ParsedTime::aware(dt));
    }

    let with_offset = match input.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => input.to_string(),
    };

    for separator in DATE_TIME_SEPARATORS {
        for time in TIME_PATTERNS {
            for offset in OFFSET_SPECIFIERS {
                let pattern = format!("%Y-%m-%d{}{}{}", separator, time, offset);
                if let Ok(dt) = DateTime::parse_from_str(&with_offset, &pattern) {
                    return Ok(ParsedTime::aware(dt));
                }
            }

            let pattern = format!("%Y-%m-%d{}{}", separator, time);
            if let Ok(wall) = NaiveDateTime::parse_from_str(input, &pattern) {
                return Ok(ParsedTime::naive(wall));
            }
        }
    }

    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Ok(ParsedTime::naive(date.and_time(NaiveTime::MIN))),
        Err(err) => {
            trace!("{:?} is not ISO-8601: {}", input, err);
            Err(TimeError::Parse(format!("{:?} is not an ISO-8601 date/time", input)))
        }
    }
}

/// Parse with a strftime-style `format`
///
/// The offset is read only when `format` contains an offset specifier. A
/// format without time fields yields midnight.
pub(crate) fn parse_with_format(input: &str, format: &str) -> TimeResult<ParsedTime> {
    if let Ok(dt) = DateTime::parse_from_str(input, format) {
        return Ok(ParsedTime::aware(dt));
    }

    match NaiveDateTime::parse_from_str(input, format) {
        Ok(wall) => Ok(ParsedTime::naive(wall)),
        Err(err) => {
            trace!("{:?} has no time fields for {:?}: {}", input, format, err);
            let date = NaiveDate::parse_from_str(input, format)?;
            Ok(ParsedTime::naive(date.and_time(NaiveTime::MIN)))
        }
    }
}

fn truncate_to_micros(wall: NaiveDateTime) -> NaiveDateTime {
    let nanos = wall.nanosecond() / 1_000 * 1_000;
    wall.with_nanosecond(nanos).unwrap_or(wall)
}
