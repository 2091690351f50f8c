//! In-memory document implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tokio::sync::RwLock;

use super::{CHART_CANVASES, METRIC_ELEMENTS};

/// Text nodes and canvases the dashboard writes to
#[async_trait]
pub trait Document: Send + Sync {
    /// Current text of an element
    async fn text(&self, id: &str) -> ViewResult<String>;

    /// Replace the text of an element
    async fn set_text(&self, id: &str, text: String) -> ViewResult<()>;

    /// Whether a canvas with this id is attached
    async fn has_canvas(&self, id: &str) -> bool;
}

/// Document held entirely in memory
#[derive(Default)]
pub struct MemoryDocument {
    texts: RwLock<BTreeMap<String, String>>,
    canvases: RwLock<HashSet<String>>,
}

impl MemoryDocument {
    /// Create an empty document with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document carrying every element the dashboard needs.
    ///
    /// Metric elements start empty, which parses as zero.
    pub fn dashboard() -> Self {
        let texts = METRIC_ELEMENTS
            .iter()
            .map(|id| (id.to_string(), String::new()))
            .collect();
        let canvases = CHART_CANVASES.iter().map(|id| id.to_string()).collect();

        Self {
            texts: RwLock::new(texts),
            canvases: RwLock::new(canvases),
        }
    }

    /// Attach a text element with initial content
    pub async fn insert_text(&self, id: impl Into<String>, text: impl Into<String>) {
        self.texts.write().await.insert(id.into(), text.into());
    }

    /// Attach a canvas
    pub async fn insert_canvas(&self, id: impl Into<String>) {
        self.canvases.write().await.insert(id.into());
    }

    /// Detach any element with this id
    pub async fn remove(&self, id: &str) {
        self.texts.write().await.remove(id);
        self.canvases.write().await.remove(id);
    }

    /// Snapshot of every text element
    pub async fn texts(&self) -> BTreeMap<String, String> {
        self.texts.read().await.clone()
    }
}

#[async_trait]
impl Document for MemoryDocument {
    async fn text(&self, id: &str) -> ViewResult<String> {
        self.texts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    async fn set_text(&self, id: &str, text: String) -> ViewResult<()> {
        let mut texts = self.texts.write().await;
        let slot = texts
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))?;
        *slot = text;
        Ok(())
    }

    async fn has_canvas(&self, id: &str) -> bool {
        self.canvases.read().await.contains(id)
    }
}

/// Document errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Element not found: {0}")]
    MissingElement(String),
}

/// Result type alias for document operations
pub type ViewResult<T> = Result<T, ViewError>;
