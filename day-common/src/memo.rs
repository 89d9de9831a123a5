//! Memoized grouping
//!
//! Renders repeat far more often than the hit set changes. [`GroupingMemo`]
//! keeps the last ordered group list together with a SHA-256 fingerprint of
//! the hits it was built from, and hands back the cached list while the
//! fingerprint still matches.

use std::sync::Arc;

use chrono::TimeZone;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::grouping::{group_and_sort, YearGroup};
use crate::hits::{Hit, HitRecord};

/// Content fingerprint of a hit sequence
pub type Fingerprint = [u8; 32];

/// Fingerprint a hit sequence by content and order
///
/// Returns `None` if a hit cannot be serialized; such sequences are simply
/// not cached.
pub fn fingerprint<H: Serialize>(hits: &[H]) -> Option<Fingerprint> {
    let mut hasher = Sha256::new();
    hasher.update((hits.len() as u64).to_le_bytes());
    for hit in hits {
        let bytes = serde_json::to_vec(hit).ok()?;
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    Some(hasher.finalize().into())
}

/// Single-entry cache of the last grouped hit sequence
///
/// A memo instance assumes one rendering zone; use a separate memo per zone.
#[derive(Debug)]
pub struct GroupingMemo<H = Hit> {
    last: Option<(Fingerprint, Arc<Vec<YearGroup<H>>>)>,
    hits: u64,
    misses: u64,
}

impl<H> Default for GroupingMemo<H> {
    fn default() -> Self {
        Self {
            last: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<H> GroupingMemo<H>
where
    H: HitRecord + Serialize + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered groups for `hits`, recomputed only when the content changed
    pub fn get_or_compute<Tz: TimeZone>(&mut self, hits: &[H], tz: &Tz) -> Arc<Vec<YearGroup<H>>> {
        let print = fingerprint(hits);

        if let (Some(print), Some((cached_print, groups))) = (print, &self.last) {
            if print == *cached_print {
                self.hits += 1;
                return Arc::clone(groups);
            }
        }

        self.misses += 1;
        let groups = Arc::new(group_and_sort(hits.iter().cloned(), tz));
        debug!(
            hit_count = hits.len(),
            group_count = groups.len(),
            "Recomputed year groups"
        );

        self.last = print.map(|p| (p, Arc::clone(&groups)));
        groups
    }

    /// Drop the cached entry
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Number of lookups served from the cache
    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that had to recompute
    pub fn cache_misses(&self) -> u64 {
        self.misses
    }
}
