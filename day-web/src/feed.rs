//! Infinite-scroll hit accumulator
//!
//! Loads search pages one after another for a fixed query and keeps every
//! hit seen so far, in fetch order. The grouped view is memoized, so asking
//! for it repeatedly between page loads costs a fingerprint, not a regroup.

use std::sync::Arc;

use chrono::TimeZone;
use day_common::{GroupingMemo, Hit, YearGroup};
use tracing::debug;

use crate::search::{SearchError, SearchIndex, SearchRequest};

/// Accumulated results of a paginated search
pub struct InfiniteHits<S: ?Sized> {
    index: Arc<S>,
    request: SearchRequest,
    hits: Vec<Hit>,
    next_page: u32,
    nb_pages: Option<u32>,
    nb_hits: u64,
    memo: GroupingMemo,
}

impl<S: SearchIndex + ?Sized> InfiniteHits<S> {
    /// Start an empty accumulator; `request.page` is ignored
    pub fn new(index: Arc<S>, request: SearchRequest) -> Self {
        Self {
            index,
            request,
            hits: Vec::new(),
            next_page: 0,
            nb_pages: None,
            nb_hits: 0,
            memo: GroupingMemo::new(),
        }
    }

    /// Fetch the next page and append its hits
    ///
    /// Returns the number of hits added. Once the last page is loaded this
    /// is a no-op returning 0.
    pub async fn show_more(&mut self) -> Result<usize, SearchError> {
        if self.is_last_page() {
            return Ok(0);
        }

        let request = self.request.for_page(self.next_page);
        let page = self.index.search(&request).await?;

        let added = page.hits.len();
        debug!(
            index = %self.index.name(),
            page = self.next_page,
            added,
            nb_pages = page.nb_pages,
            "Loaded search page"
        );

        self.hits.extend(page.hits);
        self.nb_pages = Some(page.nb_pages);
        self.nb_hits = page.nb_hits;
        self.next_page += 1;

        // An empty page means the index has nothing further, whatever it reports
        if added == 0 {
            self.nb_pages = Some(self.next_page.min(page.nb_pages));
        }

        Ok(added)
    }

    /// Replace the query and drop everything loaded so far
    pub fn refine(&mut self, query: impl Into<String>) {
        self.request.query = query.into();
        self.hits.clear();
        self.next_page = 0;
        self.nb_pages = None;
        self.nb_hits = 0;
    }

    /// Whether every page for the query has been loaded
    pub fn is_last_page(&self) -> bool {
        self.nb_pages.is_some_and(|n| self.next_page >= n)
    }

    /// Hits loaded so far, in fetch order
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn pages_loaded(&self) -> u32 {
        self.next_page
    }

    /// Total hits the index reports for the query
    pub fn nb_hits(&self) -> u64 {
        self.nb_hits
    }

    pub fn query(&self) -> &str {
        &self.request.query
    }

    /// Loaded hits grouped by year, ordered for display
    pub fn grouped<Tz: TimeZone>(&mut self, tz: &Tz) -> Arc<Vec<YearGroup<Hit>>> {
        self.memo.get_or_compute(&self.hits, tz)
    }

    /// Memo statistics as (cache hits, cache misses)
    pub fn memo_stats(&self) -> (u64, u64) {
        (self.memo.cache_hits(), self.memo.cache_misses())
    }
}
