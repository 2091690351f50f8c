//! Chart backends
//!
//! A backend turns a [`ChartConfig`] into a live chart bound to a canvas.
//! A canvas holds at most one live chart; binding a second one fails.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{ChartConfig, ChartType};
use crate::view::ViewError;

/// Reference to a live chart instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartHandle {
    pub id: Uuid,
    pub canvas: String,
    pub chart_type: ChartType,
}

/// Charting capability of the target environment
#[async_trait]
pub trait ChartBackend: Send + Sync {
    /// Bind a new chart to `canvas`
    async fn create(&self, canvas: &str, config: ChartConfig) -> ChartResult<ChartHandle>;

    /// Tear down a chart and release its canvas
    async fn destroy(&self, handle: &ChartHandle) -> ChartResult<()>;
}

/// A chart currently bound to a canvas
#[derive(Debug, Clone, Serialize)]
pub struct LiveChart {
    pub id: Uuid,
    pub canvas: String,
    pub created_at: DateTime<Utc>,
    pub config: ChartConfig,
}

/// Lifetime counters of a registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartStats {
    pub created: u64,
    pub destroyed: u64,
    pub live: usize,
}

/// In-memory chart backend keyed by canvas id
#[derive(Default)]
pub struct ChartRegistry {
    charts: RwLock<HashMap<String, LiveChart>>,
    created: AtomicU64,
    destroyed: AtomicU64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chart bound to `canvas`, if any
    pub async fn live(&self, canvas: &str) -> Option<LiveChart> {
        self.charts.read().await.get(canvas).cloned()
    }

    /// Every live chart
    pub async fn all(&self) -> Vec<LiveChart> {
        let mut charts: Vec<_> = self.charts.read().await.values().cloned().collect();
        charts.sort_by(|a, b| a.canvas.cmp(&b.canvas));
        charts
    }

    pub async fn stats(&self) -> ChartStats {
        ChartStats {
            created: self.created.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
            live: self.charts.read().await.len(),
        }
    }
}

#[async_trait]
impl ChartBackend for ChartRegistry {
    async fn create(&self, canvas: &str, config: ChartConfig) -> ChartResult<ChartHandle> {
        let mut charts = self.charts.write().await;
        if charts.contains_key(canvas) {
            return Err(ChartError::CanvasInUse(canvas.to_string()));
        }

        let handle = ChartHandle {
            id: Uuid::new_v4(),
            canvas: canvas.to_string(),
            chart_type: config.chart_type,
        };

        charts.insert(
            canvas.to_string(),
            LiveChart {
                id: handle.id,
                canvas: canvas.to_string(),
                created_at: Utc::now(),
                config,
            },
        );
        self.created.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(canvas, chart_id = %handle.id, chart_type = %handle.chart_type, "Chart created");
        Ok(handle)
    }

    async fn destroy(&self, handle: &ChartHandle) -> ChartResult<()> {
        let mut charts = self.charts.write().await;
        match charts.get(&handle.canvas) {
            Some(live) if live.id == handle.id => {
                charts.remove(&handle.canvas);
                self.destroyed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(canvas = %handle.canvas, chart_id = %handle.id, "Chart destroyed");
                Ok(())
            }
            _ => Err(ChartError::UnknownChart(handle.id)),
        }
    }
}

/// Chart errors
#[derive(Debug, Error)]
pub enum ChartError {
    /// Canvas is missing from the document
    #[error(transparent)]
    View(#[from] ViewError),

    #[error("Canvas is already in use: {0}")]
    CanvasInUse(String),

    #[error("Chart not found: {0}")]
    UnknownChart(Uuid),

    #[error("Chart backend error: {0}")]
    Backend(String),
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::payload_fixture;
    use crate::charts::renderers;

    #[tokio::test]
    async fn test_create_binds_canvas_once() {
        let registry = ChartRegistry::new();
        let payload = payload_fixture();
        let config = renderers::sector_allocation(&payload.sector_allocation);

        let handle = registry.create("sectorAllocationChart", config.clone()).await.unwrap();
        assert_eq!(handle.chart_type, ChartType::Doughnut);

        let err = registry.create("sectorAllocationChart", config).await.unwrap_err();
        assert!(matches!(err, ChartError::CanvasInUse(_)));

        let live = registry.live("sectorAllocationChart").await.unwrap();
        assert_eq!(live.id, handle.id);
    }

    #[tokio::test]
    async fn test_destroy_releases_canvas() {
        let registry = ChartRegistry::new();
        let payload = payload_fixture();
        let config = renderers::risk_metrics(&payload.risk_metrics);

        let handle = registry.create("riskMetricsChart", config.clone()).await.unwrap();
        registry.destroy(&handle).await.unwrap();
        assert!(registry.live("riskMetricsChart").await.is_none());

        registry.create("riskMetricsChart", config).await.unwrap();
        assert_eq!(
            registry.stats().await,
            ChartStats {
                created: 2,
                destroyed: 1,
                live: 1
            }
        );
    }

    #[tokio::test]
    async fn test_destroy_stale_handle_fails() {
        let registry = ChartRegistry::new();
        let payload = payload_fixture();
        let config = renderers::performance(&payload.performance);

        let first = registry.create("performanceChart", config.clone()).await.unwrap();
        registry.destroy(&first).await.unwrap();
        registry.create("performanceChart", config).await.unwrap();

        let err = registry.destroy(&first).await.unwrap_err();
        assert!(matches!(err, ChartError::UnknownChart(id) if id == first.id));
    }
}
