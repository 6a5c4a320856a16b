//! Service token authentication for the function routes.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::state::AppState;

/// Alternate header accepted alongside `Authorization: Bearer`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Guards `/functions/v1/*`. The expected token comes from configuration;
/// callers present it either as a bearer token or in `x-api-key`.
pub async fn require_service_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = state.config.service_auth_token.as_str();

    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        if constant_time_compare(token, expected) {
            return next.run(request).await;
        }
        return AppError::Unauthorized.into_response();
    }

    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    match api_key {
        Some(key) if constant_time_compare(key, expected) => next.run(request).await,
        _ => AppError::Unauthorized.into_response(),
    }
}

/// Constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
