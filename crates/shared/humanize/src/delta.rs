use chrono::{NaiveDateTime, TimeDelta};

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: f64 = 30.5;

/// Describe the magnitude of `delta` without direction
///
/// Months are approximated as 30.5 days and years as 365 days.
///
/// ```
/// use chrono::TimeDelta;
/// use dmc_humanize::natural_delta;
///
/// assert_eq!(natural_delta(TimeDelta::seconds(90)), "a minute");
/// assert_eq!(natural_delta(TimeDelta::days(-400)), "1 year, 1 month");
/// ```
pub fn natural_delta(delta: TimeDelta) -> String {
    let delta = delta.abs();
    let total = delta.num_seconds();
    let seconds = total % SECONDS_PER_DAY;
    let all_days = total / SECONDS_PER_DAY;
    let years = all_days / DAYS_PER_YEAR;
    let days = all_days % DAYS_PER_YEAR;
    let months = (days as f64 / DAYS_PER_MONTH) as i64;

    if years == 0 && days == 0 {
        match seconds {
            0 => "a moment".to_string(),
            1 => "a second".to_string(),
            2..=59 => format!("{} seconds", seconds),
            60..=119 => "a minute".to_string(),
            120..=3599 => format!("{} minutes", seconds / 60),
            3600..=7199 => "an hour".to_string(),
            _ => format!("{} hours", seconds / 3600),
        }
    } else if years == 0 {
        match (days, months) {
            (1, _) => "a day".to_string(),
            (_, 0) => format!("{} days", days),
            (_, 1) => "a month".to_string(),
            _ => format!("{} months", months),
        }
    } else if years == 1 {
        match (days, months) {
            (0, 0) => "a year".to_string(),
            (_, 0) => format!("1 year, {} days", days),
            (_, 1) => "1 year, 1 month".to_string(),
            _ => format!("1 year, {} months", months),
        }
    } else {
        format!("{} years", years)
    }
}

/// Describe `value` relative to `now`: `"2 hours ago"`, `"a day from now"`, `"now"`
pub fn natural_time(value: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = now - value;
    let phrase = natural_delta(delta);
    if phrase == "a moment" {
        return "now".to_string();
    }

    let direction = if delta < TimeDelta::zero() {
        "from now"
    } else {
        "ago"
    };
    format!("{} {}", phrase, direction)
}
