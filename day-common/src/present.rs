//! Presentation state for grouped event listings
//!
//! Turns ordered year groups into the view model the listing template
//! consumes: a heading per year with an event count, and per hit the
//! derived flags and labels (upcoming badge, formatted date, promo alt text).

use std::borrow::Cow;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::dates::{local_day, parse_hit_date};
use crate::grouping::{YearGroup, YearKey};
use crate::hits::Hit;
use crate::upcoming::is_upcoming_on;

/// en-US "long" date with "short" time, e.g. `June 1, 2024 at 9:00 AM`
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

/// Keys [`HitView`] adds next to the hit's own fields
const VIEW_KEYS: &[&str] = &["upcoming", "display_date", "promo_alt", "show_design_tags"];

/// One rendered year section
#[derive(Debug, Clone, Serialize)]
pub struct GroupView<'a> {
    pub year: YearKey,
    pub count_label: String,
    pub hits: Vec<HitView<'a>>,
}

/// One rendered event card
///
/// The hit's fields are serialized inline. Extra CMS fields sharing a name
/// with a view field are dropped so each key appears once.
#[derive(Debug, Clone, Serialize)]
pub struct HitView<'a> {
    #[serde(flatten)]
    pub hit: Cow<'a, Hit>,
    pub upcoming: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
    pub promo_alt: String,
    pub show_design_tags: bool,
}

/// `"1 event"` / `"N events"`
pub fn count_label(count: usize) -> String {
    format!("{} event{}", count, if count == 1 { "" } else { "s" })
}

/// Human-readable date for a raw hit date, in `tz`
pub fn display_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    parse_hit_date(raw, tz).map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Build the view for a single hit against the day containing `now`
pub fn render_hit<'a, Tz: TimeZone>(hit: &'a Hit, now: &DateTime<Tz>) -> HitView<'a>
where
    Tz::Offset: std::fmt::Display,
{
    let tz = now.timezone();
    let raw = hit.date.as_deref();

    HitView {
        hit: without_view_keys(hit),
        upcoming: is_upcoming_on(raw, local_day(now), &tz),
        display_date: raw.and_then(|r| display_date(r, &tz)),
        promo_alt: format!("Promo for event {}", hit.title.as_deref().unwrap_or_default()),
        show_design_tags: hit.design_tags.as_ref().is_some_and(|tags| !tags.is_empty()),
    }
}

fn without_view_keys(hit: &Hit) -> Cow<'_, Hit> {
    if !VIEW_KEYS.iter().any(|key| hit.extra.contains_key(*key)) {
        return Cow::Borrowed(hit);
    }

    let mut owned = hit.clone();
    for key in VIEW_KEYS {
        owned.extra.remove(*key);
    }
    Cow::Owned(owned)
}

/// Build the listing view from ordered groups
///
/// Group order and hit order are taken as given; `now` only affects the
/// per-hit upcoming flag.
pub fn render_groups<'a, Tz: TimeZone>(
    groups: &'a [YearGroup<Hit>],
    now: &DateTime<Tz>,
) -> Vec<GroupView<'a>>
where
    Tz::Offset: std::fmt::Display,
{
    groups
        .iter()
        .map(|group| GroupView {
            year: group.key,
            count_label: count_label(group.len()),
            hits: group.hits.iter().map(|hit| render_hit(hit, now)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_and_sort;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 events");
        assert_eq!(count_label(1), "1 event");
        assert_eq!(count_label(12), "12 events");
    }

    #[test]
    fn test_display_date_format() {
        assert_eq!(
            display_date("2024-06-01T09:00:00", &Utc).as_deref(),
            Some("June 1, 2024 at 9:00 AM")
        );
        assert_eq!(
            display_date("2023-11-17T18:30:00Z", &Utc).as_deref(),
            Some("November 17, 2023 at 6:30 PM")
        );
        assert_eq!(display_date("nope", &Utc), None);
    }

    #[test]
    fn test_render_hit_fields() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let mut hit = Hit::new("e1", Some("2024-06-01T09:00:00")).with_title("Crit Night");
        hit.design_tags = Some(vec![json!({"_ref": "t1"})]);

        let view = render_hit(&hit, &now);
        assert!(view.upcoming);
        assert_eq!(view.display_date.as_deref(), Some("June 1, 2024 at 9:00 AM"));
        assert_eq!(view.promo_alt, "Promo for event Crit Night");
        assert!(view.show_design_tags);
    }

    #[test]
    fn test_render_hit_without_date_or_tags() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut hit = Hit::new("e2", None);
        hit.design_tags = Some(vec![]);

        let view = render_hit(&hit, &now);
        assert!(!view.upcoming);
        assert!(view.display_date.is_none());
        assert_eq!(view.promo_alt, "Promo for event ");
        assert!(!view.show_design_tags);
    }

    #[test]
    fn test_render_groups_serializes_flat_hits() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let hits = vec![
            Hit::new("a", Some("2024-07-04T17:00:00Z")).with_title("Picnic"),
            Hit::new("b", None),
            Hit::new("c", Some("2024-01-15T17:00:00Z")),
        ];
        let groups = group_and_sort(hits, &Utc);

        let views = render_groups(&groups, &now);
        let value = serde_json::to_value(&views).unwrap();

        assert_eq!(value[0]["year"], "Unknown");
        assert_eq!(value[0]["count_label"], "1 event");
        assert_eq!(value[1]["year"], "2024");
        assert_eq!(value[1]["count_label"], "2 events");
        assert_eq!(value[1]["hits"][0]["_id"], "a");
        assert_eq!(value[1]["hits"][0]["title"], "Picnic");
        assert_eq!(value[1]["hits"][0]["upcoming"], true);
        assert_eq!(value[1]["hits"][1]["_id"], "c");
        assert_eq!(value[1]["hits"][1]["upcoming"], false);
    }

    #[test]
    fn test_extra_fields_do_not_shadow_view_keys() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut hit = Hit::new("e3", Some("2020-02-02T10:00:00Z")).with_title("Reprint");
        hit.extra.insert("upcoming".to_string(), json!("yes"));
        hit.extra.insert("promo_alt".to_string(), json!("stale"));
        hit.extra.insert("venue".to_string(), json!("Hall B"));

        let view = render_hit(&hit, &now);
        let text = serde_json::to_string(&view).unwrap();
        assert_eq!(text.matches("\"upcoming\"").count(), 1);
        assert_eq!(text.matches("\"promo_alt\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["upcoming"], false);
        assert_eq!(value["promo_alt"], "Promo for event Reprint");
        assert_eq!(value["venue"], "Hall B");

        // The source hit is untouched
        assert!(hit.extra.contains_key("upcoming"));
    }

    #[test]
    fn test_plain_hit_is_borrowed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let hit = Hit::new("e4", None);
        assert!(matches!(render_hit(&hit, &now).hit, Cow::Borrowed(_)));
    }
}
