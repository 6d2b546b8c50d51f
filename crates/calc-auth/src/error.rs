//! Error types for token and credential operations

use std::fmt;

/// Why a presented token was rejected.
///
/// The HTTP layer collapses all of these into a uniform 401; the reason
/// exists for logs and metrics labels only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Token's `exp` claim has passed
    Expired,
    /// Signature does not verify under the current process key
    BadSignature,
    /// Not a parseable token at all (wrong segment count, bad base64, ...)
    Malformed,
}

impl RejectReason {
    /// Stable label for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::Expired => "expired",
            RejectReason::BadSignature => "bad_signature",
            RejectReason::Malformed => "malformed",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from token and credential operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid client credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(RejectReason),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
