//! Admin authentication.
//!
//! Admin routes take a bearer token compared against `TVPG_ADMIN_TOKEN`.
//! The comparison runs over SHA-256 digests of both sides so it is
//! constant-time with respect to the token contents.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}

/// Compare a presented token against the configured one.
pub fn token_matches(presented: &str, expected: &str) -> bool {
    digest(presented) == digest(expected)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authorize an admin request or return 401.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        warn!("Admin request rejected: no admin token configured");
        return Err(ApiError::unauthorized("Admin API is not configured"));
    };

    match bearer_token(headers) {
        Some(presented) if token_matches(presented, expected) => Ok(()),
        Some(_) => {
            warn!("Admin request rejected: token mismatch");
            Err(ApiError::unauthorized("Invalid admin token"))
        }
        None => Err(ApiError::unauthorized("Missing bearer token")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches() {
        assert!(token_matches("secret", "secret"));
        assert!(!token_matches("secret", "other"));
        assert!(!token_matches("", "other"));
    }

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc123".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some("abc123"));

        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, "Basic xyz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
