//! Sketch record routes
//!
//! GET returns the matching rows as JSON objects; DELETE removes the row and
//! reports how many were deleted. Both sit behind the shared-secret
//! middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use day_common::db;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::AppState;

/// One entry of the DELETE response
///
/// The count is a string, matching what the site's clients already parse.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    #[serde(rename = "numDeletedRows")]
    pub num_deleted_rows: String,
}

/// GET /api/sketches/:sketch_id
///
/// An id with no leading digits matches nothing and yields `[]`.
pub async fn get_sketch(
    State(state): State<AppState>,
    Path(sketch_id): Path<String>,
) -> Result<Json<Vec<Map<String, Value>>>, SketchError> {
    let Some(id) = db::parse_sketch_id(&sketch_id) else {
        return Ok(Json(Vec::new()));
    };

    let rows = db::fetch_sketch_rows(&state.db, id).await.map_err(|e| {
        error!(sketch_id = id, "Failed to fetch sketch: {}", e);
        SketchError::Database(e.to_string())
    })?;

    Ok(Json(rows))
}

/// DELETE /api/sketches/:sketch_id
pub async fn delete_sketch(
    State(state): State<AppState>,
    Path(sketch_id): Path<String>,
) -> Result<Json<Vec<DeleteResult>>, SketchError> {
    let deleted = match db::parse_sketch_id(&sketch_id) {
        Some(id) => {
            let deleted = db::delete_sketch(&state.db, id).await.map_err(|e| {
                error!(sketch_id = id, "Failed to delete sketch: {}", e);
                SketchError::Database(e.to_string())
            })?;
            info!(sketch_id = id, deleted, "Deleted sketch");
            deleted
        }
        None => 0,
    };

    Ok(Json(vec![DeleteResult {
        num_deleted_rows: deleted.to_string(),
    }]))
}

/// Sketch route errors
#[derive(Debug)]
pub enum SketchError {
    Database(String),
}

impl IntoResponse for SketchError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SketchError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
