//! Data Transfer Objects
//!
//! JSON bodies returned by the snapshot server.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::charts::{ChartConfig, ChartStats, LiveChart, SlotKind};
use crate::dashboard::CycleStats;
use crate::notify::{Toast, ToastCounts};
use crate::scheduler::SchedulerStats;

/// Full dashboard state
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    /// Metric element id to displayed text
    pub metrics: BTreeMap<String, String>,
    /// Live charts in render order
    pub charts: Vec<ChartView>,
    pub toasts: Vec<Toast>,
    pub cycles: CycleStats,
}

/// One live chart and the slot that owns it
#[derive(Debug, Serialize)]
pub struct ChartView {
    pub slot: SlotKind,
    pub canvas: String,
    pub chart_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub config: ChartConfig,
}

impl ChartView {
    pub fn new(slot: SlotKind, live: LiveChart) -> Self {
        Self {
            slot,
            canvas: live.canvas,
            chart_id: live.id,
            created_at: live.created_at,
            config: live.config,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub cycles: CycleStats,
    pub charts: ChartStats,
    pub toasts: ToastCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerStats>,
}
