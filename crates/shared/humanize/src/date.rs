use chrono::NaiveDate;

/// Name `value` relative to `today`
///
/// Returns `"today"`, `"tomorrow"` or `"yesterday"` when the day is adjacent,
/// otherwise `value` rendered with the strftime `format`.
pub fn natural_day(value: NaiveDate, today: NaiveDate, format: &str) -> String {
    match (value - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => value.format(format).to_string(),
    }
}

/// Like `natural_day` with `"%b %d"`, but adds the year once `value`
/// is a year or more away from `today`
pub fn natural_date(value: NaiveDate, today: NaiveDate) -> String {
    if (value - today).num_days().abs() >= 365 {
        natural_day(value, today, "%b %d %Y")
    } else {
        natural_day(value, today, "%b %d")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_adjacent_days() {
        let today = day(2014, 4, 18);
        assert_eq!(natural_day(day(2014, 4, 18), today, "%b %d"), "today");
        assert_eq!(natural_day(day(2014, 4, 19), today, "%b %d"), "tomorrow");
        assert_eq!(natural_day(day(2014, 4, 17), today, "%b %d"), "yesterday");
    }

    #[test]
    fn test_other_days_use_format() {
        let today = day(2014, 4, 18);
        assert_eq!(natural_day(day(2014, 5, 2), today, "%m/%d"), "05/02");
        assert_eq!(natural_date(day(2014, 4, 25), today), "Apr 25");
    }

    #[test]
    fn test_distant_dates_carry_year() {
        let today = day(2014, 4, 18);
        assert_eq!(natural_date(day(2012, 4, 18), today), "Apr 18 2012");
        assert_eq!(natural_date(day(2016, 1, 2), today), "Jan 02 2016");
    }
}
