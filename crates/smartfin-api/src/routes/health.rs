//! Health check endpoint

use crate::routes::timestamp;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// Health payload. Its fields sit at the top level next to `success`,
/// not under `data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    /// Seconds since the server state was built
    pub uptime: f64,
    pub timestamp: String,
    pub dataset_size: usize,
}

pub async fn api_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset_size = state.dataset.read().await.len();
    Json(HealthResponse {
        success: true,
        status: "healthy",
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: timestamp(),
        dataset_size,
    })
}
