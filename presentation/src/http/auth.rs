//! Admin bearer-token guard

use super::error::ApiError;
use super::AppState;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Require the configured admin token on a mutating request.
///
/// A server without a configured token rejects every write; that is the safe
/// default for a fresh install.
pub(crate) fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state.admin_token.as_deref().ok_or(ApiError::Unauthorized)?;
    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}
