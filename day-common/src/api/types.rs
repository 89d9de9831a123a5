//! Shared API request/response types

use serde::{Deserialize, Serialize};

/// Query string carrying the backend shared secret
///
/// ```
/// // GET /api/sketches/12?SECRET=hunter2
/// use day_common::api::types::SecretQuery;
///
/// let query: SecretQuery = serde_json::from_str(r#"{"SECRET": "hunter2"}"#).unwrap();
/// assert_eq!(query.secret.as_deref(), Some("hunter2"));
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecretQuery {
    #[serde(rename = "SECRET", default)]
    pub secret: Option<String>,
}

/// Body returned with 401 responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthFailureResponse {
    pub success: bool,
}

impl AuthFailureResponse {
    pub fn new() -> Self {
        Self { success: false }
    }
}

impl Default for AuthFailureResponse {
    fn default() -> Self {
        Self::new()
    }
}
