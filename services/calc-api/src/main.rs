//! Authenticated calculator API
//!
//! Single-binary service that:
//! 1. Generates a process-lifetime HMAC-SHA256 signing key at startup
//! 2. Exchanges static client credentials for short-lived tokens (/api/token)
//! 3. Gates every other path behind bearer-token verification
//! 4. Performs header-selected arithmetic on two operands (/api/calculate)

mod auth;
mod calculator;
mod config;
mod error;
mod handlers;
mod metrics;
mod state;

use anyhow::{Context, Result};
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

/// Build the axum router with all routes and shared state.
///
/// Layer order matters: the authentication gate wraps every route and the
/// fallback, so unknown paths are rejected with 401 before routing decides
/// they are 404s. Request metrics sit outside the gate so rejections are
/// counted too.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/token", post(handlers::issue_token))
        .route("/api/calculate", post(handlers::calculate))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
        .layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("starting calculator-api");

    // Install Prometheus metrics recorder before any metrics are emitted
    let prometheus_handle = metrics::install_recorder();

    // CLI: simple --config flag parsing
    let args: Vec<String> = std::env::args().collect();
    let cli_config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config_path = Config::resolve_path(cli_config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        listen_addr = %config.server.listen_addr,
        client_id = %config.auth.client_id,
        token_ttl_secs = config.auth.token_ttl_secs,
        "configuration loaded"
    );

    // The signing key lives for exactly this process: tokens issued by a
    // previous instance stop verifying after a restart.
    let state = AppState::new(&config, prometheus_handle);
    let app = build_router(state);

    let listen_addr = config.server.listen_addr;
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind to {listen_addr}"))?;

    info!(addr = %listen_addr, "accepting requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
