//! End-to-end tests for the grouping pipeline
//!
//! Hits go in as they arrive from the index; ordered, rendered groups come out.

use chrono::{FixedOffset, TimeZone, Utc};
use day_common::grouping::{group_and_sort, group_by_year, sort_groups, YearKey};
use day_common::hits::Hit;
use day_common::memo::GroupingMemo;
use day_common::present::render_groups;
use day_common::upcoming::is_upcoming;

fn event(id: &str, date: Option<&str>) -> Hit {
    Hit::new(id, date).with_title(format!("Event {}", id))
}

#[test]
fn test_key_order_example() {
    let hits = vec![
        event("a", Some("2021-01-01")),
        event("b", None),
        event("c", Some("2019-01-01")),
        event("d", Some("2023-01-01")),
    ];

    let keys: Vec<String> = sort_groups(group_by_year(hits, &Utc))
        .into_iter()
        .map(|g| g.key.to_string())
        .collect();
    assert_eq!(keys, ["Unknown", "2019", "2021", "2023"]);
}

#[test]
fn test_pipeline_with_pagination_growth() {
    let tz = FixedOffset::east_opt(0).unwrap();
    let mut memo = GroupingMemo::new();

    let mut loaded = vec![event("p1", Some("2022-03-01")), event("p2", None)];
    let first = memo.get_or_compute(&loaded, &tz);
    assert_eq!(first.len(), 2);

    // Next page arrives; groups grow without reordering earlier hits
    loaded.extend([event("p3", Some("2022-01-01")), event("p4", Some("2020-05-05"))]);
    let second = memo.get_or_compute(&loaded, &tz);

    let keys: Vec<YearKey> = second.iter().map(|g| g.key).collect();
    assert_eq!(keys, [YearKey::Unknown, YearKey::Year(2020), YearKey::Year(2022)]);

    let ids_2022: Vec<&str> = second[2].hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids_2022, ["p1", "p3"]);
}

#[test]
fn test_upcoming_boundary_at_local_midnight() {
    let tz = FixedOffset::west_opt(4 * 3600).unwrap();
    let today = tz.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    assert!(is_upcoming(&event("in", Some("2024-06-01T09:00:00")), &today));
    assert!(!is_upcoming(&event("out", Some("2024-05-31T23:59:59")), &today));
}

#[test]
fn test_render_does_not_reorder() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let hits = vec![
        event("late", Some("2024-12-01T10:00:00Z")),
        event("early", Some("2024-02-01T10:00:00Z")),
    ];
    let groups = group_and_sort(hits, &Utc);
    let views = render_groups(&groups, &now);

    assert_eq!(views.len(), 1);
    let order: Vec<&str> = views[0].hits.iter().map(|v| v.hit.id.as_str()).collect();
    assert_eq!(order, ["late", "early"]);
    assert!(views[0].hits[0].upcoming);
    assert!(!views[0].hits[1].upcoming);
}

#[test]
fn test_empty_pipeline() {
    let groups = group_and_sort(Vec::<Hit>::new(), &Utc);
    let views = render_groups(&groups, &Utc::now());
    assert!(views.is_empty());
}
