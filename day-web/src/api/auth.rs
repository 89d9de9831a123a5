//! Shared-secret middleware for backend routes
//!
//! Requests must carry `?SECRET=<backend secret>`. Failures get
//! `401 {"success": false}` and never reach the handler.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use day_common::api::{check_secret, ApiAuthError, AuthFailureResponse, SecretQuery};
use tracing::warn;

use crate::AppState;

/// Authentication middleware
///
/// Applied to the sketch routes only; `/health` and the public event
/// listing do not use it.
pub async fn auth_middleware(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    check_secret(state.backend_secret.as_deref(), query.secret.as_deref()).map_err(|e| {
        warn!(path = %request.uri().path(), "Rejected backend request: {}", e);
        AuthError(e)
    })?;

    Ok(next.run(request).await)
}

/// Authentication failure
#[derive(Debug)]
pub struct AuthError(pub ApiAuthError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(AuthFailureResponse::new())).into_response()
    }
}
