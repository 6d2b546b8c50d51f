//! Token issuance and verification for the calculator API
//!
//! Provides the symmetric signing key, client credential check, and
//! HMAC-SHA256 token operations used by the service binary. This crate is
//! a standalone library with no dependency on the HTTP layer — it can be
//! tested and used independently.
//!
//! Token flow:
//! 1. Service generates a `SigningKey` once at startup
//! 2. Client posts credentials, checked via `ClientCredentials::verify()`
//! 3. Service mints a token via `token::issue()` (expiry-only claims)
//! 4. Every authenticated request is checked via `token::verify()`
//!
//! The key lives only in process memory. Restarting the process generates
//! a fresh key, which invalidates every previously issued token.

pub mod credentials;
pub mod error;
pub mod key;
pub mod token;

pub use credentials::ClientCredentials;
pub use error::{Error, RejectReason, Result};
pub use key::SigningKey;
pub use token::{Claims, issue, issue_with_expiry, verify};
