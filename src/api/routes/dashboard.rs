//! Dashboard Routes
//!
//! Read-only views of the headless document.
//!
//! - GET /api/dashboard - Metric texts, live charts, visible toasts
//! - GET /api/dashboard/charts/:slot - One live chart

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartView, DashboardSnapshot};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::charts::SlotKind;

/// GET /api/dashboard
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.snapshot().await)
}

/// GET /api/dashboard/charts/:slot
///
/// `slot` is one of `sector`, `asset_class`, `performance`, `risk`.
pub async fn chart(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<String>,
) -> ApiResult<Json<ChartView>> {
    let kind = SlotKind::from_name(&slot).ok_or(ApiError::UnknownSlot(slot))?;

    let view = state
        .chart(kind)
        .await
        .ok_or(ApiError::EmptySlot(kind))?;

    Ok(Json(view))
}
