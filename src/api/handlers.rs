use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

use crate::counting::{CountError, VisitorCounter};

pub struct AppState {
    pub counter: Arc<VisitorCounter>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Deserialize)]
pub struct IncrementRequest {
    pub ip_addr: String,
}

#[derive(Serialize)]
pub struct VisitorCountsResponse {
    pub visitor_counts: HashMap<String, i64>,
}

/// Record one visit
pub async fn increment_visitor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IncrementRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.counter.increment(&payload.ip_addr).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(reject(e)),
    }
}

/// Per-bucket visitor totals over the current and previous month
pub async fn get_visitor_counts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VisitorCountsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.counter.counts().await {
        Ok(visitor_counts) => Ok(Json(VisitorCountsResponse { visitor_counts })),
        Err(e) => Err(reject(e)),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Log the failure once, then translate it to the caller-visible result.
///
/// Validation failures keep their fixed message; operational failures carry
/// the full underlying description in the response body.
fn reject(err: CountError) -> (StatusCode, Json<ErrorResponse>) {
    let message = format!("{err:#}");
    error!("Request aborted: {}", message);

    let status = match err {
        CountError::InvalidIdentifier => StatusCode::BAD_REQUEST,
        CountError::Operational(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: message }))
}
