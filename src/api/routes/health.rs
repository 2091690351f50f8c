//! Health Routes
//!
//! Health check endpoints for monitoring.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status with cycle counters

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::dashboard::CycleStats;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cycles = state.controller.stats();

    Json(HealthResponse {
        status: overall_status(&cycles).to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cycles,
        charts: state.charts.stats().await,
        toasts: state.toasts.counts(),
        scheduler: state.scheduler.as_ref().map(|s| s.stats()),
    })
}

/// "starting" until the first cycle, "degraded" until one succeeds
fn overall_status(cycles: &CycleStats) -> &'static str {
    if cycles.refreshed > 0 {
        "healthy"
    } else if cycles.started == 0 {
        "starting"
    } else {
        "degraded"
    }
}
