//! day-web library - site backend service
//!
//! Serves the grouped event listing fed by the search index, and the
//! secret-protected sketch record routes.

use std::sync::Arc;

use axum::Router;
use day_common::GroupingMemo;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod feed;
pub mod pagination;
pub mod search;

use search::{SearchIndex, DEFAULT_HITS_PER_PAGE};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Shared secret for the sketch routes; `None` rejects every request
    pub backend_secret: Option<Arc<str>>,
    /// Event search index
    pub search: Arc<dyn SearchIndex>,
    /// Page size used for listing requests
    pub hits_per_page: u32,
    /// Last grouped listing, reused while the hit set is unchanged
    pub memo: Arc<Mutex<GroupingMemo>>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, backend_secret: Option<String>, search: Arc<dyn SearchIndex>) -> Self {
        Self {
            db,
            backend_secret: backend_secret.map(Arc::from),
            search,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            memo: Arc::new(Mutex::new(GroupingMemo::new())),
        }
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }
}

/// Build application router
///
/// Sketch routes require the backend secret; health and the event listing
/// are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    // Protected routes (require the shared secret)
    let protected = Router::new()
        .route(
            "/api/sketches/:sketch_id",
            get(api::get_sketch).delete(api::delete_sketch),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes
    let public = Router::new()
        .route("/api/events", get(api::list_events))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
