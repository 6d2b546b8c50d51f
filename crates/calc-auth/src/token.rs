//! HS256 token issuance and verification
//!
//! Tokens carry a single claim: `exp`, the absolute expiry as unix seconds.
//! No subject, issuer, or audience — the token proves only that the holder
//! exchanged valid credentials with this process instance, recently enough.
//!
//! Verification enforces the signature and the expiry with zero leeway, so
//! "unexpired" means exactly `now < exp`.

use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation, get_current_timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, RejectReason, Result};
use crate::key::SigningKey;

/// Token claims. Expiry only, per the stateless bearer pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry as unix timestamp in seconds
    pub exp: u64,
}

/// Issue a token expiring `ttl` from now.
pub fn issue(key: &SigningKey, ttl: Duration) -> Result<String> {
    issue_with_expiry(key, get_current_timestamp() + ttl.as_secs())
}

/// Issue a token with an explicit expiry timestamp (unix seconds).
///
/// `issue` delegates here; calling this directly with a past timestamp
/// produces an already-expired token, which is how the expiry path is
/// exercised without waiting on the wall clock.
pub fn issue_with_expiry(key: &SigningKey, expires_at: u64) -> Result<String> {
    let claims = Claims { exp: expires_at };
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, key.encoding())
        .map_err(|e| Error::Signing(e.to_string()))
}

/// Verify a token under the current process key.
///
/// Accepts iff the HS256 signature verifies AND `exp` has not passed.
/// Every failure mode maps to `Error::InvalidToken`; the embedded reason
/// is for observability, never for the HTTP response.
pub fn verify(key: &SigningKey, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Default leeway is 60s; the expiry contract is exact
    validation.leeway = 0;

    match jsonwebtoken::decode::<Claims>(token, key.decoding(), &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => RejectReason::Expired,
                ErrorKind::InvalidSignature => RejectReason::BadSignature,
                _ => RejectReason::Malformed,
            };
            debug!(reason = reason.label(), "token rejected");
            Err(Error::InvalidToken(reason))
        }
    }
}
