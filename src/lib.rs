//! # Portfolio Pulse
//!
//! Headless portfolio analytics dashboard. A controller polls a single
//! analytics endpoint on a timer, animates the headline metrics into text
//! elements, rebuilds four chart configurations and raises toasts for the
//! outcome of each cycle.
//!
//! ## Modules
//!
//! - [`analytics`]: payload model and HTTP fetcher
//! - [`animation`]: frame-driven interpolation of metric texts
//! - [`charts`]: chart configurations, slots and the in-memory backend
//! - [`notify`]: self-dismissing toasts
//! - [`dashboard`]: one fetch-and-render cycle
//! - [`scheduler`]: runs cycles on a fixed interval
//! - [`api`]: read-only snapshot server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portfolio_pulse::analytics::{AnalyticsConfig, HttpAnalyticsClient};
//! use portfolio_pulse::animation::{AnimationConfig, TickerClock};
//! use portfolio_pulse::charts::ChartRegistry;
//! use portfolio_pulse::dashboard::DashboardController;
//! use portfolio_pulse::notify::ToastBoard;
//! use portfolio_pulse::scheduler::{RefreshScheduler, ScheduleConfig};
//! use portfolio_pulse::view::MemoryDocument;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpAnalyticsClient::new(AnalyticsConfig::default())?;
//!
//!     let controller = Arc::new(DashboardController::new(
//!         Arc::new(source),
//!         Arc::new(MemoryDocument::dashboard()),
//!         Arc::new(ChartRegistry::new()),
//!         Arc::new(ToastBoard::default()),
//!         Arc::new(TickerClock::default()),
//!         AnimationConfig::default(),
//!     ));
//!
//!     // First cycle now, then every five minutes
//!     let scheduler = Arc::new(RefreshScheduler::new(controller, ScheduleConfig::default()));
//!     scheduler.clone().start().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod animation;
pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod logging;
pub mod notify;
pub mod scheduler;
pub mod view;

// Re-export top-level types for convenience
pub use analytics::{
    AnalyticsConfig, AnalyticsError, AnalyticsPayload, AnalyticsResult, AnalyticsSource,
    HttpAnalyticsClient,
};

pub use animation::{AnimationConfig, AnimationMode, Animator, FrameClock, TickerClock};

pub use charts::{ChartBackend, ChartConfig, ChartError, ChartRegistry, ChartSlot, SlotKind};

pub use dashboard::{CycleOutcome, DashboardController, DashboardError, DashboardResult};

pub use format::{format_currency, format_fixed2, format_percent};

pub use notify::{Notifier, Toast, ToastBoard, ToastKind};

pub use scheduler::{RefreshScheduler, ScheduleConfig};

pub use view::{Document, MemoryDocument, ViewError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
