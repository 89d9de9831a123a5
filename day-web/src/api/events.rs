//! Grouped event listing
//!
//! Loads one or more search pages for a query, groups the hits by year and
//! returns the listing view: year sections ("Unknown" first, then oldest to
//! newest), each with its event count and per-event display state.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use day_common::present::{render_groups, GroupView};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::feed::InfiniteHits;
use crate::search::{parse_facet_filters, SearchError, SearchRequest};
use crate::AppState;

/// Most pages a single request may load
pub const MAX_PAGES: u32 = 50;

/// Query parameters for the listing
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Free-text query
    #[serde(default)]
    pub query: String,

    /// Number of pages to load, as an infinite-scroll client would have
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Comma-separated `attribute:value` facet filters
    #[serde(alias = "facet")]
    pub facets: Option<String>,
}

fn default_pages() -> u32 {
    1
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct EventsResponse<'a> {
    pub query: &'a str,
    pub nb_hits: u64,
    pub pages_loaded: u32,
    pub is_last_page: bool,
    pub groups: Vec<GroupView<'a>>,
}

/// GET /api/events?query=&pages=1&facets=
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Response, EventsError> {
    let request = SearchRequest::new(query.query)
        .with_hits_per_page(state.hits_per_page)
        .with_facet_filters(parse_facet_filters(query.facets.as_deref()));
    let pages = query.pages.clamp(1, MAX_PAGES);

    let mut feed = InfiniteHits::new(state.search.clone(), request);
    for _ in 0..pages {
        if feed.is_last_page() {
            break;
        }
        feed.show_more().await.map_err(|e| {
            error!(index = %state.search.name(), "Search failed: {}", e);
            EventsError::Search(e)
        })?;
    }

    let groups = {
        let mut memo = state.memo.lock().await;
        memo.get_or_compute(feed.hits(), &Local)
    };
    debug!(
        hits = feed.hits().len(),
        groups = groups.len(),
        "Rendering event listing"
    );

    let now = Local::now();
    let response = EventsResponse {
        query: feed.query(),
        nb_hits: feed.nb_hits(),
        pages_loaded: feed.pages_loaded(),
        is_last_page: feed.is_last_page(),
        groups: render_groups(&groups, &now),
    };

    Ok(Json(response).into_response())
}

/// Listing errors
#[derive(Debug)]
pub enum EventsError {
    Search(SearchError),
}

impl IntoResponse for EventsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            EventsError::Search(e) => (StatusCode::BAD_GATEWAY, format!("Search error: {}", e)),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
