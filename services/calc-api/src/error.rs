//! Request-level error taxonomy and HTTP mapping
//!
//! Every error is converted into a status + body at the handler or gate
//! boundary; nothing propagates past the request cycle and nothing here is
//! fatal to the process. The Display strings double as the plaintext
//! response bodies, so the exact wording is part of the API contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Wrong client id/secret at token issuance
    #[error("Invalid client credentials.")]
    InvalidCredentials,

    /// Missing/malformed/expired token on a protected path. The caller
    /// gets a bare 401 with no body; the distinction between the reasons
    /// lives only in logs and metrics.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Operation header absent or empty
    #[error("Operation header is missing.")]
    MissingOperation,

    /// Operation header present but not one of the four operations
    #[error("Invalid operation.")]
    UnknownOperation,

    /// Divide with a zero divisor
    #[error("Cannot divide by zero.")]
    DivisionByZero,

    /// Unexpected failure inside the service (token signing)
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Uniform 401 with no body, regardless of rejection reason
            ApiError::Unauthenticated => self.status().into_response(),
            other => (other.status(), other.to_string()).into_response(),
        }
    }
}
