//! Liveness and readiness probes for the back-office API

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

fn respond(status: &'static str) -> HealthResponse {
    HealthResponse {
        status,
        service: "glassdesk-api",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Liveness probe, answers as long as the process is up
pub async fn health_check() -> Json<HealthResponse> {
    Json(respond("healthy"))
}

/// Readiness probe, also requires the accident database to answer
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(respond("ready")))
}
