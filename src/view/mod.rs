//! Dashboard Document
//!
//! The headless stand-in for the page: text elements and chart canvases
//! addressed by id.
//!
//! A missing element is reported as [`ViewError::MissingElement`]; callers
//! decide whether that aborts their update.

mod document;

pub use document::{Document, MemoryDocument, ViewError, ViewResult};

/// Text element showing the total portfolio value
pub const TOTAL_VALUE: &str = "totalValue";
/// Text element showing the daily profit and loss
pub const DAILY_PNL: &str = "dailyPnL";
/// Text element showing the Sharpe ratio
pub const SHARPE_RATIO: &str = "sharpeRatio";
/// Text element showing portfolio beta
pub const BETA: &str = "beta";

/// Every metric text element, in update order
pub const METRIC_ELEMENTS: [&str; 4] = [TOTAL_VALUE, DAILY_PNL, SHARPE_RATIO, BETA];

pub const SECTOR_CANVAS: &str = "sectorAllocationChart";
pub const ASSET_CLASS_CANVAS: &str = "assetClassChart";
pub const PERFORMANCE_CANVAS: &str = "performanceChart";
pub const RISK_CANVAS: &str = "riskMetricsChart";

/// Every chart canvas, in render order
pub const CHART_CANVASES: [&str; 4] = [
    SECTOR_CANVAS,
    ASSET_CLASS_CANVAS,
    PERFORMANCE_CANVAS,
    RISK_CANVAS,
];
