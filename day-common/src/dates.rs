//! Permissive date parsing for indexed hit dates
//!
//! CMS date fields arrive in a handful of shapes: full RFC 3339 instants,
//! offset-less wall-clock times, bare calendar dates, reduced-precision
//! ISO 8601 dates (`2021`, `2021-06`), and the odd RFC 2822 string from older
//! imports. Anything else is treated as "no date".

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Offset-less date-time layouts, tried in order
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a raw date field into an instant in `tz`
///
/// Returns `None` for empty, malformed, or unrepresentable values. Offset-less
/// inputs are read as wall-clock time in `tz`; a bare date is midnight in `tz`,
/// and a bare year or year-month is the first midnight of that period.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, FixedOffset, Timelike};
/// use day_common::dates::parse_hit_date;
///
/// let tz = FixedOffset::west_opt(5 * 3600).unwrap();
///
/// let dt = parse_hit_date("2024-01-01T03:00:00Z", &tz).unwrap();
/// assert_eq!(dt.year(), 2023); // 22:00 on Dec 31 in UTC-5
///
/// let dt = parse_hit_date("2024-06-01T09:30:00", &tz).unwrap();
/// assert_eq!(dt.hour(), 9);
///
/// assert!(parse_hit_date("next tuesday", &tz).is_none());
/// ```
pub fn parse_hit_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    if let Some(date) = parse_calendar_date(raw) {
        return date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| tz.from_local_datetime(&midnight).earliest());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }

    None
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, each resolved to its first day
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    if raw.len() == 7 && raw.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(&format!("{raw}-01"), DATE_FORMAT).ok();
    }

    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let year = raw.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Calendar day containing `now` in its own zone
pub fn local_day<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}
