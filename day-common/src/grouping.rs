//! Year grouping and ordering of search hits
//!
//! Two steps, kept separate so each can be tested on its own:
//!
//! 1. [`group_by_year`] partitions hits into per-year buckets in a single
//!    pass, appending to each bucket in input order.
//! 2. [`sort_groups`] turns the buckets into a display list: the
//!    [`YearKey::Unknown`] bucket first, then years ascending.
//!
//! [`group_and_sort`] runs both.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, TimeZone};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::dates::parse_hit_date;
use crate::hits::HitRecord;

/// Label of the bucket holding hits without a usable date
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Grouping key derived from a hit's date
///
/// The variant order is the display order: `Unknown` sorts before every
/// year, and years compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearKey {
    /// Date missing or unparseable
    Unknown,
    /// Calendar year of the date in the rendering zone
    Year(i32),
}

impl YearKey {
    /// Key for a hit, using `tz` to decide which calendar year an instant
    /// falls in
    pub fn for_hit<H: HitRecord, Tz: TimeZone>(hit: &H, tz: &Tz) -> Self {
        let Some(raw) = hit.raw_date() else {
            return YearKey::Unknown;
        };

        match parse_hit_date(raw, tz) {
            Some(dt) => YearKey::Year(dt.year()),
            None => {
                warn!(
                    hit_id = %hit.object_id(),
                    date = %raw,
                    "Unparseable hit date, grouping under {}",
                    UNKNOWN_LABEL
                );
                YearKey::Unknown
            }
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, YearKey::Unknown)
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Unknown => f.write_str(UNKNOWN_LABEL),
            YearKey::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for YearKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One year's worth of hits, in fetch order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup<H> {
    pub key: YearKey,
    pub hits: Vec<H>,
}

impl<H> YearGroup<H> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Unordered result of [`group_by_year`]
///
/// Every bucket holds at least one hit.
#[derive(Debug, Clone)]
pub struct YearBuckets<H> {
    buckets: HashMap<YearKey, Vec<H>>,
}

impl<H> YearBuckets<H> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, key: &YearKey) -> Option<&[H]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &YearKey> {
        self.buckets.keys()
    }

    /// Total number of hits across all buckets
    pub fn hit_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Partition hits into per-year buckets
///
/// Stable: within a bucket, hits keep their input order. No hit is dropped
/// or duplicated.
pub fn group_by_year<I, H, Tz>(hits: I, tz: &Tz) -> YearBuckets<H>
where
    I: IntoIterator<Item = H>,
    H: HitRecord,
    Tz: TimeZone,
{
    let mut buckets: HashMap<YearKey, Vec<H>> = HashMap::new();
    for hit in hits {
        let key = YearKey::for_hit(&hit, tz);
        buckets.entry(key).or_default().push(hit);
    }
    YearBuckets { buckets }
}

/// Order buckets for display: `Unknown` first, then years ascending
pub fn sort_groups<H>(buckets: YearBuckets<H>) -> Vec<YearGroup<H>> {
    let mut groups: Vec<YearGroup<H>> = buckets
        .buckets
        .into_iter()
        .map(|(key, hits)| YearGroup { key, hits })
        .collect();
    // Keys are unique per bucket, so no tie-break is needed
    groups.sort_unstable_by_key(|group| group.key);
    groups
}

/// Group then sort in one call
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use day_common::grouping::{group_and_sort, YearKey};
/// use day_common::hits::Hit;
///
/// let hits = vec![
///     Hit::new("a", Some("2021-05-01")),
///     Hit::new("b", Some("2021-06-01")),
///     Hit::new("c", None),
/// ];
///
/// let groups = group_and_sort(hits, &Utc);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].key, YearKey::Unknown);
/// assert_eq!(groups[1].key, YearKey::Year(2021));
/// assert_eq!(groups[1].hits.len(), 2);
/// ```
pub fn group_and_sort<I, H, Tz>(hits: I, tz: &Tz) -> Vec<YearGroup<H>>
where
    I: IntoIterator<Item = H>,
    H: HitRecord,
    Tz: TimeZone,
{
    sort_groups(group_by_year(hits, tz))
}
