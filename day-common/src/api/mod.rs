//! Shared HTTP API pieces
//!
//! Pure functions and shared types only; the axum wiring lives in day-web.

pub mod auth;
pub mod types;

pub use auth::{check_secret, ApiAuthError};
pub use types::{AuthFailureResponse, SecretQuery};
