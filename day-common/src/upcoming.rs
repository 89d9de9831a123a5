//! "Upcoming" classification for event hits
//!
//! An event is upcoming when its date falls on or after the start of the
//! current local day. The check is evaluated per render with the caller's
//! clock; nothing here caches "today".

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::dates::{local_day, parse_hit_date};
use crate::hits::HitRecord;

/// Classify a raw date against the calendar day `today` in `tz`
///
/// Only the date part is compared: anything from 00:00 of `today` onward is
/// upcoming. Missing or unparseable dates are never upcoming.
pub fn is_upcoming_on<Tz: TimeZone>(raw_date: Option<&str>, today: NaiveDate, tz: &Tz) -> bool {
    raw_date
        .and_then(|raw| parse_hit_date(raw, tz))
        .map(|dt| dt.date_naive() >= today)
        .unwrap_or(false)
}

/// Classify a hit against the day containing `now`
pub fn is_upcoming<H: HitRecord, Tz: TimeZone>(hit: &H, now: &DateTime<Tz>) -> bool {
    is_upcoming_on(hit.raw_date(), local_day(now), &now.timezone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hits::Hit;
    use chrono::FixedOffset;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn start_of_june_first() -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_same_day_later_time_is_upcoming() {
        let hit = Hit::new("a", Some("2024-06-01T09:00:00"));
        assert!(is_upcoming(&hit, &start_of_june_first()));
    }

    #[test]
    fn test_previous_day_last_second_is_not_upcoming() {
        let hit = Hit::new("b", Some("2024-05-31T23:59:59"));
        assert!(!is_upcoming(&hit, &start_of_june_first()));
    }

    #[test]
    fn test_time_of_now_is_ignored() {
        // Late in the day, an event earlier the same day still counts
        let now = tz().with_ymd_and_hms(2024, 6, 1, 22, 15, 0).unwrap();
        let hit = Hit::new("c", Some("2024-06-01T08:00:00"));
        assert!(is_upcoming(&hit, &now));
    }

    #[test]
    fn test_offset_dates_compared_in_local_zone() {
        // 23:30 UTC on May 31 is 01:30 on June 1 at UTC+2
        let hit = Hit::new("d", Some("2024-05-31T23:30:00Z"));
        assert!(is_upcoming(&hit, &start_of_june_first()));
    }

    #[test]
    fn test_missing_and_malformed_dates() {
        let now = start_of_june_first();
        assert!(!is_upcoming(&Hit::new("e", None), &now));
        assert!(!is_upcoming(&Hit::new("f", Some("soon")), &now));
    }

    #[test]
    fn test_future_years() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(is_upcoming_on(Some("2031-01-01"), today, &tz()));
        assert!(!is_upcoming_on(Some("1999-12-31"), today, &tz()));
    }
}
