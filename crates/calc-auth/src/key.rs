//! Process-lifetime symmetric signing key
//!
//! The key is generated once at startup and shared (read-only) between the
//! token issuance handler and the authentication gate. It is never persisted
//! or rotated: a restart produces a new key and every token signed by the
//! previous process instance stops verifying.

use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::RngExt;
use zeroize::Zeroize;

/// Key length in bytes. 256 bits, matching the HMAC-SHA256 block strength.
const KEY_LEN: usize = 32;

/// Symmetric key material for HS256 signing and verification.
///
/// Holds the pre-built `jsonwebtoken` key pair so the raw bytes don't need
/// to be kept around after construction.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Generate a fresh random key. Called exactly once per process start.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill(&mut bytes);
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Build a key from explicit bytes. Exists so tests can construct two
    /// distinct keys deterministically; production code uses `generate()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs
        write!(f, "SigningKey([REDACTED])")
    }
}
