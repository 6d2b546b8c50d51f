//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use calc_auth::{ClientCredentials, SigningKey};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;

/// State shared across all handlers and the authentication gate.
///
/// The signing key is generated once here and is read-only afterwards, so
/// plain `Arc` sharing suffices — there is no writer after initialization.
#[derive(Clone)]
pub struct AppState {
    pub signing_key: Arc<SigningKey>,
    pub credentials: Arc<ClientCredentials>,
    pub token_ttl: Duration,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(config: &Config, prometheus: PrometheusHandle) -> Self {
        Self {
            signing_key: Arc::new(SigningKey::generate()),
            credentials: Arc::new(config.auth.credentials()),
            token_ttl: config.auth.token_ttl(),
            prometheus,
        }
    }
}
