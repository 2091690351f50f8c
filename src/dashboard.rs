//! Dashboard Controller
//!
//! Owns the four chart slots and runs one fetch-and-render cycle per
//! [`DashboardController::refresh`] call.
//!
//! ## Cycle
//!
//! 1. Fetch the analytics payload
//! 2. Animate the metric elements
//! 3. Render sector, asset class, performance and risk charts, in that order
//! 4. Show the success toast
//!
//! A fetch failure skips steps 2-4 and shows one error toast instead.
//! A fault inside steps 2-3 (missing element, chart backend error) stops
//! the cycle, shows the same error toast and is returned to the caller.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::analytics::{
    AllocationSeries, AnalyticsPayload, AnalyticsSource, PerformanceSeries, PortfolioMetrics,
    RiskMetrics,
};
use crate::animation::{AnimationConfig, AnimationHandle, Animator, FrameClock};
use crate::charts::{renderers, ChartBackend, ChartConfig, ChartError, ChartHandle, ChartSlot, SlotKind};
use crate::format::{format_currency, format_fixed2, Formatter};
use crate::notify::{Notifier, ToastKind};
use crate::view::{Document, ViewError, BETA, DAILY_PNL, SHARPE_RATIO, TOTAL_VALUE};

pub const REFRESH_SUCCEEDED: &str = "Data refreshed successfully";
pub const REFRESH_FAILED: &str = "Error refreshing data";

/// Metric elements with their formatters, in update order
const METRIC_FIELDS: [(&str, Formatter); 4] = [
    (TOTAL_VALUE, format_currency),
    (DAILY_PNL, format_currency),
    (SHARPE_RATIO, format_fixed2),
    (BETA, format_fixed2),
];

/// How a cycle ended
#[derive(Debug)]
pub enum CycleOutcome {
    /// All five updates ran; the metric animations may still be in flight
    Refreshed { animations: Vec<AnimationHandle> },
    /// The payload could not be fetched; nothing was updated
    FetchFailed,
}

/// Lifetime cycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    pub started: u64,
    pub refreshed: u64,
    pub fetch_failed: u64,
    pub faulted: u64,
}

#[derive(Default)]
struct CycleCounters {
    started: AtomicU64,
    refreshed: AtomicU64,
    fetch_failed: AtomicU64,
    faulted: AtomicU64,
}

/// Dashboard controller: constructed once, refreshed on every cycle
pub struct DashboardController {
    source: Arc<dyn AnalyticsSource>,
    document: Arc<dyn Document>,
    backend: Arc<dyn ChartBackend>,
    notifier: Arc<dyn Notifier>,
    animator: Animator,
    slots: [ChartSlot; 4],
    counters: CycleCounters,
}

impl DashboardController {
    pub fn new(
        source: Arc<dyn AnalyticsSource>,
        document: Arc<dyn Document>,
        backend: Arc<dyn ChartBackend>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn FrameClock>,
        animation: AnimationConfig,
    ) -> Self {
        let animator = Animator::new(Arc::clone(&document), clock, animation);

        Self {
            source,
            document,
            backend,
            notifier,
            animator,
            slots: SlotKind::ALL.map(ChartSlot::new),
            counters: CycleCounters::default(),
        }
    }

    /// Run one fetch-and-render cycle
    pub async fn refresh(&self) -> DashboardResult<CycleOutcome> {
        let cycle = self.counters.started.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(cycle, "Refreshing portfolio analytics");

        let payload = match self.source.fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(cycle, "Error fetching portfolio analytics: {}", e);
                self.counters.fetch_failed.fetch_add(1, Ordering::Relaxed);
                self.notifier.show(REFRESH_FAILED, ToastKind::Error).await;
                return Ok(CycleOutcome::FetchFailed);
            }
        };

        for issue in payload.alignment_issues() {
            tracing::warn!(cycle, "Misaligned dataset, rendering as-is: {}", issue);
        }

        match self.apply(&payload).await {
            Ok(animations) => {
                self.counters.refreshed.fetch_add(1, Ordering::Relaxed);
                self.notifier.show(REFRESH_SUCCEEDED, ToastKind::Success).await;
                tracing::info!(cycle, "Dashboard refreshed");
                Ok(CycleOutcome::Refreshed { animations })
            }
            Err(e) => {
                tracing::error!(cycle, "Error applying portfolio analytics: {}", e);
                self.counters.faulted.fetch_add(1, Ordering::Relaxed);
                self.notifier.show(REFRESH_FAILED, ToastKind::Error).await;
                Err(e)
            }
        }
    }

    async fn apply(&self, payload: &AnalyticsPayload) -> DashboardResult<Vec<AnimationHandle>> {
        let animations = self.update_metrics(&payload.metrics).await?;
        self.render_sector_allocation(&payload.sector_allocation).await?;
        self.render_asset_class_distribution(&payload.asset_class_distribution)
            .await?;
        self.render_performance(&payload.performance).await?;
        self.render_risk_metrics(&payload.risk_metrics).await?;
        Ok(animations)
    }

    /// Start one animation per metric element
    pub async fn update_metrics(
        &self,
        metrics: &PortfolioMetrics,
    ) -> DashboardResult<Vec<AnimationHandle>> {
        let targets = [
            metrics.total_value,
            metrics.daily_pnl,
            metrics.sharpe_ratio,
            metrics.beta,
        ];

        let mut animations = Vec::with_capacity(targets.len());
        for ((element, formatter), target) in METRIC_FIELDS.into_iter().zip(targets) {
            animations.push(self.animator.animate(element, target, formatter).await?);
        }
        Ok(animations)
    }

    pub async fn render_sector_allocation(
        &self,
        series: &AllocationSeries,
    ) -> DashboardResult<ChartHandle> {
        self.render(SlotKind::Sector, renderers::sector_allocation(series))
            .await
    }

    pub async fn render_asset_class_distribution(
        &self,
        series: &AllocationSeries,
    ) -> DashboardResult<ChartHandle> {
        self.render(SlotKind::AssetClass, renderers::asset_class_distribution(series))
            .await
    }

    pub async fn render_performance(
        &self,
        series: &PerformanceSeries,
    ) -> DashboardResult<ChartHandle> {
        self.render(SlotKind::Performance, renderers::performance(series))
            .await
    }

    pub async fn render_risk_metrics(&self, risk: &RiskMetrics) -> DashboardResult<ChartHandle> {
        self.render(SlotKind::Risk, renderers::risk_metrics(risk)).await
    }

    async fn render(&self, kind: SlotKind, config: ChartConfig) -> DashboardResult<ChartHandle> {
        let handle = self
            .slot(kind)
            .render(self.document.as_ref(), self.backend.as_ref(), config)
            .await?;
        Ok(handle)
    }

    /// The slot owning charts of `kind`
    pub fn slot(&self, kind: SlotKind) -> &ChartSlot {
        let index = match kind {
            SlotKind::Sector => 0,
            SlotKind::AssetClass => 1,
            SlotKind::Performance => 2,
            SlotKind::Risk => 3,
        };
        &self.slots[index]
    }

    pub fn stats(&self) -> CycleStats {
        CycleStats {
            started: self.counters.started.load(Ordering::Relaxed),
            refreshed: self.counters.refreshed.load(Ordering::Relaxed),
            fetch_failed: self.counters.fetch_failed.load(Ordering::Relaxed),
            faulted: self.counters.faulted.load(Ordering::Relaxed),
        }
    }
}

/// Faults raised while applying a payload
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::analytics::{payload_fixture, AnalyticsError, AnalyticsResult};
    use crate::animation::TickerClock;
    use crate::charts::ChartRegistry;
    use crate::notify::ToastBoard;
    use crate::view::MemoryDocument;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    /// Source returning the fixture payload, or failing on demand
    #[derive(Default)]
    pub struct StubSource {
        pub fail: AtomicBool,
        pub fetches: AtomicU64,
    }

    #[async_trait]
    impl AnalyticsSource for StubSource {
        async fn fetch(&self) -> AnalyticsResult<AnalyticsPayload> {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            if self.fail.load(Ordering::Relaxed) {
                Err(AnalyticsError::Unavailable("stub".to_string()))
            } else {
                Ok(payload_fixture())
            }
        }
    }

    pub struct Fixture {
        pub source: Arc<StubSource>,
        pub document: Arc<MemoryDocument>,
        pub registry: Arc<ChartRegistry>,
        pub toasts: Arc<ToastBoard>,
        pub controller: Arc<DashboardController>,
    }

    /// Controller over a fresh in-memory dashboard fed by `source`
    pub fn controller_with(source: Arc<dyn AnalyticsSource>) -> Arc<DashboardController> {
        Arc::new(DashboardController::new(
            source,
            Arc::new(MemoryDocument::dashboard()),
            Arc::new(ChartRegistry::new()),
            Arc::new(ToastBoard::default()),
            Arc::new(TickerClock::default()),
            AnimationConfig::default(),
        ))
    }

    pub fn fixture() -> Fixture {
        let source = Arc::new(StubSource::default());
        let document = Arc::new(MemoryDocument::dashboard());
        let registry = Arc::new(ChartRegistry::new());
        let toasts = Arc::new(ToastBoard::new(Duration::from_millis(5000)));

        let controller = Arc::new(DashboardController::new(
            source.clone(),
            document.clone(),
            registry.clone(),
            toasts.clone(),
            Arc::new(TickerClock::default()),
            AnimationConfig::default(),
        ));

        Fixture {
            source,
            document,
            registry,
            toasts,
            controller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::analytics::{payload_fixture, AnalyticsError, AnalyticsResult};
    use crate::animation::TickerClock;
    use crate::charts::{ChartRegistry, ChartResult, ChartStats};
    use crate::notify::ToastCounts;
    use crate::view::{MemoryDocument, ViewResult, CHART_CANVASES, METRIC_ELEMENTS};
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    async fn settle(outcome: CycleOutcome) {
        if let CycleOutcome::Refreshed { animations } = outcome {
            for animation in animations {
                animation.wait().await.unwrap();
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_cycle_updates_everything() {
        let f = fixture();

        let outcome = f.controller.refresh().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Refreshed { .. }));
        settle(outcome).await;

        assert_eq!(f.document.text(TOTAL_VALUE).await.unwrap(), "₹12,34,567");
        assert_eq!(f.document.text(DAILY_PNL).await.unwrap(), "-₹4,522");
        assert_eq!(f.document.text(SHARPE_RATIO).await.unwrap(), "1.42");
        assert_eq!(f.document.text(BETA).await.unwrap(), "0.87");

        for canvas in CHART_CANVASES {
            assert!(f.registry.live(canvas).await.is_some(), "{} not rendered", canvas);
        }

        assert_eq!(
            f.toasts.counts(),
            ToastCounts {
                info: 0,
                success: 1,
                error: 0
            }
        );
        assert_eq!(f.controller.stats().refreshed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_cycles_keep_one_chart_per_slot() {
        let f = fixture();

        for _ in 0..3 {
            settle(f.controller.refresh().await.unwrap()).await;
        }

        assert_eq!(
            f.registry.stats().await,
            ChartStats {
                created: 12,
                destroyed: 8,
                live: 4
            }
        );
        for kind in SlotKind::ALL {
            let owned = f.controller.slot(kind).current().await.unwrap();
            let live = f.registry.live(kind.canvas()).await.unwrap();
            assert_eq!(owned.id, live.id);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_changes_nothing() {
        let f = fixture();
        f.source.fail.store(true, Ordering::Relaxed);

        let outcome = f.controller.refresh().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::FetchFailed));

        assert_eq!(f.registry.stats().await, ChartStats::default());
        for element in METRIC_ELEMENTS {
            assert_eq!(f.document.text(element).await.unwrap(), "");
        }
        assert_eq!(
            f.toasts.counts(),
            ToastCounts {
                info: 0,
                success: 0,
                error: 1
            }
        );
        assert_eq!(f.toasts.visible().await[0].message, REFRESH_FAILED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_keeps_previous_charts() {
        let f = fixture();
        settle(f.controller.refresh().await.unwrap()).await;
        let before = f.registry.stats().await;

        f.source.fail.store(true, Ordering::Relaxed);
        f.controller.refresh().await.unwrap();

        assert_eq!(f.registry.stats().await, before);
        assert_eq!(f.document.text(BETA).await.unwrap(), "0.87");
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_canvas_stops_cycle_with_error_toast() {
        let f = fixture();
        f.document.remove("performanceChart").await;

        let err = f.controller.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Chart(ChartError::View(ViewError::MissingElement(ref id))) if id == "performanceChart"
        ));

        assert!(f.registry.live("sectorAllocationChart").await.is_some());
        assert!(f.registry.live("assetClassChart").await.is_some());
        assert!(f.registry.live("riskMetricsChart").await.is_none());
        assert_eq!(
            f.toasts.counts(),
            ToastCounts {
                info: 0,
                success: 0,
                error: 1
            }
        );
        assert_eq!(f.toasts.visible().await[0].message, REFRESH_FAILED);
        assert_eq!(f.controller.stats().faulted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_metric_element_stops_before_charts() {
        let f = fixture();
        f.document.remove(SHARPE_RATIO).await;

        let err = f.controller.refresh().await.unwrap_err();
        assert!(matches!(err, DashboardError::View(ViewError::MissingElement(_))));
        assert_eq!(f.registry.stats().await.created, 0);
        assert_eq!(f.toasts.counts().error, 1);
        assert_eq!(f.toasts.counts().success, 0);
    }

    /// Shared event log for ordering checks
    type Log = Arc<Mutex<Vec<String>>>;

    struct LoggingDocument {
        inner: MemoryDocument,
        log: Log,
    }

    #[async_trait]
    impl Document for LoggingDocument {
        async fn text(&self, id: &str) -> ViewResult<String> {
            self.log.lock().await.push(format!("read:{}", id));
            self.inner.text(id).await
        }

        async fn set_text(&self, id: &str, text: String) -> ViewResult<()> {
            self.inner.set_text(id, text).await
        }

        async fn has_canvas(&self, id: &str) -> bool {
            self.inner.has_canvas(id).await
        }
    }

    struct LoggingBackend {
        inner: ChartRegistry,
        log: Log,
    }

    #[async_trait]
    impl ChartBackend for LoggingBackend {
        async fn create(&self, canvas: &str, config: ChartConfig) -> ChartResult<ChartHandle> {
            self.log.lock().await.push(format!("create:{}", canvas));
            self.inner.create(canvas, config).await
        }

        async fn destroy(&self, handle: &ChartHandle) -> ChartResult<()> {
            self.log.lock().await.push(format!("destroy:{}", handle.canvas));
            self.inner.destroy(handle).await
        }
    }

    struct LoggingNotifier {
        log: Log,
    }

    #[async_trait]
    impl Notifier for LoggingNotifier {
        async fn show(&self, message: &str, kind: ToastKind) -> Uuid {
            self.log.lock().await.push(format!("toast:{:?}:{}", kind, message));
            Uuid::new_v4()
        }
    }

    struct PayloadSource;

    #[async_trait]
    impl AnalyticsSource for PayloadSource {
        async fn fetch(&self) -> AnalyticsResult<AnalyticsPayload> {
            Ok(payload_fixture())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl AnalyticsSource for FailingSource {
        async fn fetch(&self) -> AnalyticsResult<AnalyticsPayload> {
            Err(AnalyticsError::Timeout)
        }
    }

    fn logging_controller(source: Arc<dyn AnalyticsSource>, log: &Log) -> DashboardController {
        DashboardController::new(
            source,
            Arc::new(LoggingDocument {
                inner: MemoryDocument::dashboard(),
                log: log.clone(),
            }),
            Arc::new(LoggingBackend {
                inner: ChartRegistry::new(),
                log: log.clone(),
            }),
            Arc::new(LoggingNotifier { log: log.clone() }),
            Arc::new(TickerClock::default()),
            AnimationConfig::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_order_and_single_success_toast() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let controller = logging_controller(Arc::new(PayloadSource), &log);

        settle(controller.refresh().await.unwrap()).await;

        let events = log.lock().await.clone();
        assert_eq!(
            events,
            vec![
                "read:totalValue",
                "read:dailyPnL",
                "read:sharpeRatio",
                "read:beta",
                "create:sectorAllocationChart",
                "create:assetClassChart",
                "create:performanceChart",
                "create:riskMetricsChart",
                "toast:Success:Data refreshed successfully",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_cycle_destroys_before_create() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let controller = logging_controller(Arc::new(PayloadSource), &log);

        settle(controller.refresh().await.unwrap()).await;
        log.lock().await.clear();
        settle(controller.refresh().await.unwrap()).await;

        let events = log.lock().await.clone();
        let charts: Vec<_> = events
            .iter()
            .filter(|e| e.starts_with("create:") || e.starts_with("destroy:"))
            .cloned()
            .collect();
        assert_eq!(
            charts,
            vec![
                "destroy:sectorAllocationChart",
                "create:sectorAllocationChart",
                "destroy:assetClassChart",
                "create:assetClassChart",
                "destroy:performanceChart",
                "create:performanceChart",
                "destroy:riskMetricsChart",
                "create:riskMetricsChart",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_emits_exactly_one_error_toast() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let controller = logging_controller(Arc::new(FailingSource), &log);

        let outcome = controller.refresh().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::FetchFailed));
        assert_eq!(
            log.lock().await.clone(),
            vec!["toast:Error:Error refreshing data"]
        );
    }
}
