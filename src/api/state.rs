//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::dto::{ChartView, DashboardSnapshot};
use crate::charts::{ChartRegistry, SlotKind};
use crate::config::ApiConfig;
use crate::dashboard::DashboardController;
use crate::notify::ToastBoard;
use crate::scheduler::RefreshScheduler;
use crate::view::MemoryDocument;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Text elements and canvases written by the controller
    pub document: Arc<MemoryDocument>,
    /// Live chart instances
    pub charts: Arc<ChartRegistry>,
    /// Visible toasts
    pub toasts: Arc<ToastBoard>,
    pub controller: Arc<DashboardController>,
    /// Present when cycles are scheduled (not in one-shot mode)
    pub scheduler: Option<Arc<RefreshScheduler>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        document: Arc<MemoryDocument>,
        charts: Arc<ChartRegistry>,
        toasts: Arc<ToastBoard>,
        controller: Arc<DashboardController>,
        config: ApiConfig,
    ) -> Self {
        Self {
            document,
            charts,
            toasts,
            controller,
            scheduler: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Attach the scheduler whose counters `/health` reports
    pub fn with_scheduler(mut self, scheduler: Arc<RefreshScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Live chart of one slot
    pub async fn chart(&self, kind: SlotKind) -> Option<ChartView> {
        self.charts
            .live(kind.canvas())
            .await
            .map(|live| ChartView::new(kind, live))
    }

    /// Everything currently on the dashboard
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let mut charts = Vec::with_capacity(SlotKind::ALL.len());
        for kind in SlotKind::ALL {
            if let Some(view) = self.chart(kind).await {
                charts.push(view);
            }
        }

        DashboardSnapshot {
            metrics: self.document.texts().await,
            charts,
            toasts: self.toasts.visible().await,
            cycles: self.controller.stats(),
        }
    }
}
