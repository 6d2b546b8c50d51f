//! Static client credential pair
//!
//! A single configured client-id/client-secret pair stands in for a real
//! credential store. The pair is injected from configuration so the source
//! is swappable without touching issuance logic.

use common::Secret;

use crate::error::{Error, Result};

/// The one credential pair the token endpoint accepts.
pub struct ClientCredentials {
    client_id: String,
    client_secret: Secret<String>,
}

impl ClientCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret: Secret::new(client_secret),
        }
    }

    /// Check a presented pair against the configured one.
    pub fn matches(&self, client_id: &str, client_secret: &str) -> bool {
        client_id == self.client_id && client_secret == self.client_secret.expose()
    }

    /// Validate a presented pair, failing with `InvalidCredentials` on mismatch.
    pub fn verify(&self, client_id: &str, client_secret: &str) -> Result<()> {
        if self.matches(client_id, client_secret) {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .finish()
    }
}
