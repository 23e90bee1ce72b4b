use chrono::NaiveDateTime;
use thiserror::Error;

use crate::values::TimeInterval;

/// Errors raised while building, converting or parsing time values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Either local or a specific timezone, not both")]
    ZoneConflict,

    #[error("Timezone was in string: {0}")]
    OffsetInString(String),

    #[error("Unknown timezone: {0}")]
    UnknownZone(String),

    #[error("Ambiguous local time {wall} in {zone}")]
    AmbiguousLocalTime { wall: NaiveDateTime, zone: String },

    #[error("Non-existent local time {wall} in {zone}")]
    NonExistentLocalTime { wall: NaiveDateTime, zone: String },

    #[error("Invalid date/time fields: {0}")]
    InvalidFields(String),

    #[error("Invalid format string: {0}")]
    InvalidFormat(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Step must be positive, got {0}")]
    NonPositiveStep(TimeInterval),
}

pub type TimeResult<T> = std::result::Result<T, TimeError>;

impl From<chrono::ParseError> for TimeError {
    fn from(err: chrono::ParseError) -> Self {
        TimeError::Parse(err.to_string())
    }
}
