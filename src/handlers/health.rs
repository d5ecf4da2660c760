//! Health endpoint.
//!
//! `GET /health` sits outside the protected prefix, so load balancers can
//! probe it without an API key.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// Always returns 200 OK. The catalog lives in memory, so there is no
/// backing dependency that could leave the service degraded.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "products": 3,
///   "uptime_seconds": 42,
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let products = state.catalog.read().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        products,
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
