//! HTTP handlers for the token, calculate, and metrics endpoints

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculator::{self, Operation};
use crate::error::ApiError;
use crate::state::AppState;

/// Form fields posted to /api/token. Missing fields default to empty
/// strings so they fail the credential check with 400 rather than
/// surfacing a framework rejection.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    #[serde(rename = "clientId", default)]
    pub client_id: String,
    #[serde(rename = "clientSecret", default)]
    pub client_secret: String,
}

/// Two operands for /api/calculate. Field names are PascalCase on the
/// wire; lowercase spellings are accepted as aliases.
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    #[serde(rename = "Number1", alias = "number1")]
    pub number1: f64,
    #[serde(rename = "Number2", alias = "number2")]
    pub number2: f64,
}

/// Explicit result schema: a single numeric field.
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub result: f64,
}

/// POST /api/token — exchange client credentials for a short-lived token.
///
/// Issuance is stateless: no record of the token is kept anywhere.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<String, ApiError> {
    let request_id = format!("req_{}", uuid::Uuid::new_v4().as_simple());

    state
        .credentials
        .verify(&form.client_id, &form.client_secret)
        .map_err(|_| {
            info!(request_id, client_id = %form.client_id, "credential check failed");
            ApiError::InvalidCredentials
        })?;

    let token = calc_auth::issue(&state.signing_key, state.token_ttl).map_err(|e| {
        warn!(request_id, error = %e, "token signing failed");
        ApiError::Internal
    })?;

    info!(
        request_id,
        ttl_secs = state.token_ttl.as_secs(),
        "token issued"
    );
    Ok(token)
}

/// POST /api/calculate — apply the header-selected operation to the operands.
pub async fn calculate(
    headers: HeaderMap,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let request_id = format!("req_{}", uuid::Uuid::new_v4().as_simple());

    let selector = headers
        .get("Operation")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if selector.is_empty() {
        return Err(ApiError::MissingOperation);
    }

    let op: Operation = selector.parse()?;
    let result = calculator::calculate(op, request.number1, request.number2)?;

    info!(request_id, operation = op.label(), result, "calculated");
    Ok(Json(CalculationResponse { result }))
}

/// GET /metrics — Prometheus text exposition. Sits behind the gate like
/// every non-token path.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.prometheus.render(),
    )
}

/// Any path the router doesn't know. Reached only with a valid token.
pub async fn fallback() -> StatusCode {
    StatusCode::NOT_FOUND
}
