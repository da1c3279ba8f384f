//! Loose date parsing and the en-US display formats used across the site.
//!
//! All values are naive: the site shows capture and release times exactly as
//! written in the data, without converting between time zones.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse the date strings found in the JSON documents. Returns `None` for
/// blank or unrecognised input.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|date| date.naive_utc())
}

/// 1970-01-01 00:00:00, the fallback for undatable entries.
pub fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

pub fn to_millis(date: NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

/// `Jan 5, 2024`
pub fn format_short_date(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2024, 03:04 PM`
pub fn format_short_datetime(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `January 5, 2024 at 03:04 PM`
pub fn format_long_datetime(date: NaiveDateTime) -> String {
    date.format("%B %-d, %Y at %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        epoch, format_long_datetime, format_short_date, format_short_datetime, from_millis,
        parse_date, to_millis,
    };

    #[test]
    fn parses_plain_dates_and_datetimes() {
        let date = parse_date("2024-01-05").unwrap();
        assert_eq!(format_short_date(date), "Jan 5, 2024");

        let datetime = parse_date("2024-01-05T15:04:09").unwrap();
        assert_eq!(format_short_datetime(datetime), "Jan 5, 2024, 03:04 PM");

        let zoned = parse_date("2024-01-05T15:04:09Z").unwrap();
        assert_eq!(zoned, datetime);
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("soon").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }

    #[test]
    fn long_format_uses_full_month_name() {
        let date = parse_date("2023-11-30 08:15:00").unwrap();
        assert_eq!(format_long_datetime(date), "November 30, 2023 at 08:15 AM");
    }

    #[test]
    fn millis_round_trip_through_epoch() {
        assert_eq!(from_millis(0), Some(epoch()));
        let date = parse_date("2024-01-05").unwrap();
        assert_eq!(from_millis(to_millis(date)), Some(date));
    }
}
