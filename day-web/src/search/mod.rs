//! Search index access
//!
//! The event listing reads hits from a hosted search index. [`SearchIndex`]
//! is the seam: [`HostedSearchIndex`] talks to the hosted service over HTTP,
//! [`InMemoryIndex`] serves a fixed hit list (tests, and deployments with no
//! index configured).

use async_trait::async_trait;
use day_common::Hit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod hosted;
pub mod memory;

pub use hosted::HostedSearchIndex;
pub use memory::InMemoryIndex;

/// Default page size when a request does not specify one
pub const DEFAULT_HITS_PER_PAGE: u32 = 20;

/// Search errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One page request against an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query; empty matches everything
    pub query: String,
    /// Page number (0-indexed)
    pub page: u32,
    pub hits_per_page: u32,
    /// `attribute:value` filters, all of which must match
    pub facet_filters: Vec<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 0,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            facet_filters: Vec::new(),
        }
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }

    pub fn with_facet_filters(mut self, filters: Vec<String>) -> Self {
        self.facet_filters = filters;
        self
    }

    /// Same request for another page
    pub fn for_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitsPage {
    pub hits: Vec<Hit>,
    /// Page number (0-indexed)
    #[serde(default)]
    pub page: u32,
    /// Total pages for the query
    #[serde(default)]
    pub nb_pages: u32,
    /// Total hits for the query
    #[serde(default)]
    pub nb_hits: u64,
}

/// Source of paginated search hits
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Index identifier for logging
    fn name(&self) -> &str;

    /// Fetch one page of hits matching `request`
    ///
    /// A page past the end returns an empty hit list, not an error.
    async fn search(&self, request: &SearchRequest) -> Result<HitsPage, SearchError>;
}

/// Parse a comma-separated `attribute:value` filter list
///
/// Blank entries are skipped.
pub fn parse_facet_filters(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
