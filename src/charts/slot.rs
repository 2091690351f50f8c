//! Chart slots

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::backend::{ChartBackend, ChartHandle, ChartResult};
use super::model::ChartConfig;
use crate::view::{
    Document, ViewError, ASSET_CLASS_CANVAS, PERFORMANCE_CANVAS, RISK_CANVAS, SECTOR_CANVAS,
};

/// The four fixed chart positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Sector,
    AssetClass,
    Performance,
    Risk,
}

impl SlotKind {
    /// Every slot, in render order
    pub const ALL: [SlotKind; 4] = [
        SlotKind::Sector,
        SlotKind::AssetClass,
        SlotKind::Performance,
        SlotKind::Risk,
    ];

    /// Canvas this slot draws on
    pub fn canvas(&self) -> &'static str {
        match self {
            SlotKind::Sector => SECTOR_CANVAS,
            SlotKind::AssetClass => ASSET_CLASS_CANVAS,
            SlotKind::Performance => PERFORMANCE_CANVAS,
            SlotKind::Risk => RISK_CANVAS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SlotKind::Sector => "sector",
            SlotKind::AssetClass => "asset_class",
            SlotKind::Performance => "performance",
            SlotKind::Risk => "risk",
        }
    }

    /// Parse a slot from its name
    pub fn from_name(name: &str) -> Option<SlotKind> {
        SlotKind::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner of the live chart in one slot
pub struct ChartSlot {
    kind: SlotKind,
    handle: Mutex<Option<ChartHandle>>,
}

impl ChartSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            handle: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Handle of the chart this slot currently owns
    pub async fn current(&self) -> Option<ChartHandle> {
        self.handle.lock().await.clone()
    }

    /// Replace this slot's chart with one built from `config`.
    ///
    /// The previous chart is destroyed before the new one is created; a live
    /// chart is never updated in place. A missing canvas fails before
    /// anything is destroyed, and a failed destroy leaves the slot owning
    /// its previous chart so the next render retries it.
    pub async fn render(
        &self,
        document: &dyn Document,
        backend: &dyn ChartBackend,
        config: ChartConfig,
    ) -> ChartResult<ChartHandle> {
        let canvas = self.kind.canvas();
        if !document.has_canvas(canvas).await {
            return Err(ViewError::MissingElement(canvas.to_string()).into());
        }

        let mut current = self.handle.lock().await;
        // Forget the previous chart only once the backend released it
        if let Some(previous) = current.as_ref() {
            backend.destroy(previous).await?;
        }
        *current = None;

        let handle = backend.create(canvas, config).await?;
        *current = Some(handle.clone());

        tracing::debug!(slot = %self.kind, chart_id = %handle.id, "Slot rendered");
        Ok(handle)
    }
}
