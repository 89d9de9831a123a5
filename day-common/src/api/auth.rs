//! Static shared-secret check for backend routes
//!
//! Backend routes carry the secret in a `SECRET` query parameter. The
//! request passes only when a secret is configured, one is supplied, and the
//! two match. Values are compared through their SHA-256 digests so the
//! comparison time does not depend on where the strings first differ.

use sha2::{Digest, Sha256};

/// Why a request failed the secret check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthError {
    /// The service has no backend secret configured
    NotConfigured,

    /// Request did not include a secret
    MissingSecret,

    /// Supplied secret does not match
    InvalidSecret,
}

impl std::fmt::Display for ApiAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuthError::NotConfigured => write!(f, "Backend secret not configured"),
            ApiAuthError::MissingSecret => write!(f, "Missing SECRET parameter"),
            ApiAuthError::InvalidSecret => write!(f, "Invalid SECRET parameter"),
        }
    }
}

impl std::error::Error for ApiAuthError {}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check a supplied secret against the configured one
///
/// # Examples
///
/// ```
/// use day_common::api::auth::{check_secret, ApiAuthError};
///
/// assert!(check_secret(Some("hunter2"), Some("hunter2")).is_ok());
/// assert_eq!(check_secret(Some("hunter2"), None), Err(ApiAuthError::MissingSecret));
/// assert_eq!(check_secret(None, Some("anything")), Err(ApiAuthError::NotConfigured));
/// ```
pub fn check_secret(configured: Option<&str>, supplied: Option<&str>) -> Result<(), ApiAuthError> {
    let configured = configured
        .filter(|s| !s.is_empty())
        .ok_or(ApiAuthError::NotConfigured)?;
    let supplied = supplied
        .filter(|s| !s.is_empty())
        .ok_or(ApiAuthError::MissingSecret)?;

    if digests_equal(&digest(configured), &digest(supplied)) {
        Ok(())
    } else {
        Err(ApiAuthError::InvalidSecret)
    }
}
