//! Dashboard Charts
//!
//! Declarative chart configurations and the slots that own live chart
//! instances.
//!
//! ## Architecture
//!
//! - **Model**: Chart.js-compatible configuration plus pure tooltip formatters
//! - **Renderers**: build one configuration per slot from a payload slice
//! - **Backend**: creates/destroys chart instances bound to canvases
//! - **Slot**: holds at most one live handle; replaces it on every render
//!
//! Pixel rendering is the backend's concern. [`ChartRegistry`] is the
//! in-memory backend used by the snapshot server and tests.

mod backend;
mod model;
pub mod renderers;
mod slot;

pub use backend::{
    ChartBackend, ChartError, ChartHandle, ChartRegistry, ChartResult, ChartStats, LiveChart,
};
pub use model::{
    ChartConfig, ChartData, ChartType, ColorSpec, Dataset, LabelSource, TooltipContext,
    TooltipFormat, ValueFormat, PALETTE,
};
pub use slot::{ChartSlot, SlotKind};
