//! Zone selection and resolution
//!
//! A [`ZoneRequest`] is what callers configure: an optional IANA name and a
//! "use the process local zone" flag. Resolving it yields a [`Zone`], which
//! converts UTC instants to wall-clock time and back.

use chrono::{DateTime, FixedOffset, Local, MappedLocalTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{TimeError, TimeResult};

/// Requested zone for constructing, parsing or rendering a time
///
/// The default is UTC. Naming a zone and asking for the local zone at the
/// same time is a configuration conflict reported by [`ZoneRequest::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRequest {
    /// IANA zone name, e.g. `America/Los_Angeles`
    #[serde(default)]
    pub timezone: Option<String>,

    /// Use the zone of the running process
    #[serde(default)]
    pub local: bool,
}

impl ZoneRequest {
    pub fn utc() -> Self {
        Self::default()
    }

    pub fn named(timezone: impl Into<String>) -> Self {
        Self {
            timezone: Some(timezone.into()),
            local: false,
        }
    }

    pub fn local() -> Self {
        Self {
            timezone: None,
            local: true,
        }
    }

    fn timezone_name(&self) -> Option<&str> {
        self.timezone.as_deref().filter(|name| !name.is_empty())
    }

    /// True when the caller asked for anything other than the UTC default
    pub fn is_explicit(&self) -> bool {
        self.timezone_name().is_some() || self.local
    }

    pub fn resolve(&self) -> TimeResult<Zone> {
        match (self.timezone_name(), self.local) {
            (Some(_), true) => Err(TimeError::ZoneConflict),
            (Some(name), false) => Zone::named(name),
            (None, true) => Ok(Zone::Local),
            (None, false) => Ok(Zone::Utc),
        }
    }
}

/// A resolved zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    Utc,
    Named(Tz),
    Local,
}

impl Zone {
    pub fn named(name: &str) -> TimeResult<Self> {
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| TimeError::UnknownZone(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Zone::Utc => "UTC",
            Zone::Named(tz) => tz.name(),
            Zone::Local => "local",
        }
    }

    /// Wall-clock view of `utc` in this zone
    pub fn localize(&self, utc: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Utc => utc.fixed_offset(),
            Zone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
            Zone::Local => utc.with_timezone(&Local).fixed_offset(),
        }
    }

    /// The UTC instant at which this zone's clocks read `wall`
    ///
    /// Resolution is strict: a wall time that occurs twice (DST fold) or never
    /// (DST gap) is an error rather than a guess.
    pub fn to_utc(&self, wall: &NaiveDateTime) -> TimeResult<DateTime<Utc>> {
        match self {
            Zone::Utc => Ok(wall.and_utc()),
            Zone::Named(tz) => self.strict(tz.from_local_datetime(wall), wall),
            Zone::Local => self.strict(Local.from_local_datetime(wall), wall),
        }
    }

    fn strict<T: TimeZone>(
        &self,
        mapped: MappedLocalTime<DateTime<T>>,
        wall: &NaiveDateTime,
    ) -> TimeResult<DateTime<Utc>> {
        match mapped {
            MappedLocalTime::Single(dt) => Ok(dt.with_timezone(&Utc)),
            MappedLocalTime::Ambiguous(earliest, latest) => {
                debug!(
                    "{} is ambiguous in {}: {} or {}",
                    wall,
                    self.name(),
                    earliest.with_timezone(&Utc),
                    latest.with_timezone(&Utc)
                );
                Err(TimeError::AmbiguousLocalTime {
                    wall: *wall,
                    zone: self.name().to_string(),
                })
            }
            MappedLocalTime::None => {
                debug!("{} does not exist in {}", wall, self.name());
                Err(TimeError::NonExistentLocalTime {
                    wall: *wall,
                    zone: self.name().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_request_resolution() {
        assert_eq!(ZoneRequest::default().resolve().unwrap(), Zone::Utc);
        assert_eq!(ZoneRequest::local().resolve().unwrap(), Zone::Local);
        assert_eq!(
            ZoneRequest::named("America/Los_Angeles").resolve().unwrap(),
            Zone::Named(chrono_tz::America::Los_Angeles)
        );
        assert!(!ZoneRequest::named("").is_explicit());
    }

    #[test]
    fn test_conflicting_request() {
        let request = ZoneRequest {
            timezone: Some("US/Pacific".to_string()),
            local: true,
        };
        assert_eq!(request.resolve().unwrap_err(), TimeError::ZoneConflict);
    }

    #[test]
    fn test_unknown_zone() {
        let err = ZoneRequest::named("Mars/Olympus_Mons").resolve().unwrap_err();
        assert_eq!(err, TimeError::UnknownZone("Mars/Olympus_Mons".to_string()));
    }

    #[test]
    fn test_round_trip_through_zone() {
        let zone = Zone::named("US/Pacific").unwrap();
        let utc = zone.to_utc(&wall(2014, 4, 18, 17, 50)).unwrap();
        assert_eq!(utc.naive_utc(), wall(2014, 4, 19, 0, 50));

        let local = zone.localize(&utc);
        assert_eq!(local.naive_local(), wall(2014, 4, 18, 17, 50));
        assert_eq!(local.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_dst_gap_is_rejected() {
        let zone = Zone::named("America/Los_Angeles").unwrap();
        let err = zone.to_utc(&wall(2014, 3, 9, 2, 30)).unwrap_err();
        assert!(matches!(err, TimeError::NonExistentLocalTime { .. }));
    }

    #[test]
    fn test_dst_fold_is_rejected() {
        let zone = Zone::named("America/Los_Angeles").unwrap();
        let err = zone.to_utc(&wall(2014, 11, 2, 1, 30)).unwrap_err();
        assert!(matches!(err, TimeError::AmbiguousLocalTime { .. }));
    }

    #[test]
    fn test_request_deserializes_from_config() {
        let request: ZoneRequest =
            serde_json::from_str(r#"{"timezone":"Europe/Berlin"}"#).unwrap();
        assert_eq!(request, ZoneRequest::named("Europe/Berlin"));

        let request: ZoneRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ZoneRequest::utc());
    }
}
