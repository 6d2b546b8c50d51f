//! Authentication gate
//!
//! Request-level interceptor layered over the whole router (fallback
//! included). The token-issuance path passes through unconditionally; every
//! other path requires a present, unexpired, correctly signed bearer token
//! or the request is short-circuited with a bare 401 before any handler
//! runs. The gate deliberately does not tell the caller whether the token
//! was missing, malformed, or expired — that distinction only reaches logs
//! and the `auth_rejections_total` counter.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

/// The only unauthenticated path (prefix-segment match).
const TOKEN_PATH: &str = "/api/token";

fn is_token_path(path: &str) -> bool {
    path == TOKEN_PATH || path.starts_with("/api/token/")
}

/// Extract the bearer token from an Authorization header value.
fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_token_path(path) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        return reject(path, "missing");
    };

    match calc_auth::verify(&state.signing_key, token) {
        Ok(_) => next.run(request).await,
        Err(calc_auth::Error::InvalidToken(reason)) => reject(path, reason.label()),
        Err(_) => reject(path, "invalid"),
    }
}

fn reject(path: &str, reason: &'static str) -> Response {
    debug!(path, reason, "request rejected by authentication gate");
    metrics::record_auth_rejection(reason);
    ApiError::Unauthenticated.into_response()
}
