//! Prometheus metrics exposition
//!
//! Metrics exposed on the (authenticated) `/metrics` endpoint:
//!
//! - `calc_requests_total` (counter): labels `status`, `path`
//! - `calc_request_duration_seconds` (histogram): label `status`
//! - `auth_rejections_total` (counter): label `reason`

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
///
/// Configures `calc_request_duration_seconds` with explicit buckets so it
/// renders as a histogram rather than the default summary. All handlers are
/// in-memory, so the buckets skew small.
pub fn install_recorder() -> PrometheusHandle {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            metrics_exporter_prometheus::Matcher::Full(
                "calc_request_duration_seconds".to_string(),
            ),
            &[0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )
        .expect("failed to set histogram buckets")
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Record a completed request with status and route labels.
pub fn record_request(status: u16, path: &str, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!("calc_requests_total", "status" => status_str.clone(), "path" => path.to_string())
        .increment(1);
    metrics::histogram!("calc_request_duration_seconds", "status" => status_str)
        .record(duration_secs);
}

/// Record a request rejected by the authentication gate.
pub fn record_auth_rejection(reason: &'static str) {
    metrics::counter!("auth_rejections_total", "reason" => reason).increment(1);
}

/// Outermost middleware: times every request (including gate rejections)
/// and records it under a bounded route label.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let route = route_label(request.uri().path());
    let start = Instant::now();
    let response = next.run(request).await;
    record_request(
        response.status().as_u16(),
        route,
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Collapse unmatched paths into one label to keep cardinality bounded.
fn route_label(path: &str) -> &'static str {
    match path {
        "/api/token" => "/api/token",
        "/api/calculate" => "/api/calculate",
        "/metrics" => "/metrics",
        _ => "other",
    }
}
