//! Toast Notifications
//!
//! Short-lived, self-removing notifications for cycle success and failure.
//! Every call creates an independent toast: no queueing, no dedup, no cap.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Toast styling variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Icon and background class for this variant
    pub fn style(&self) -> (&'static str, &'static str) {
        match self {
            ToastKind::Info => ("ℹ", "bg-info"),
            ToastKind::Success => ("✓", "bg-success"),
            ToastKind::Error => ("✕", "bg-danger"),
        }
    }
}

/// One visible toast
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub icon: &'static str,
    pub class: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        let (icon, bg_class) = kind.style();
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            icon,
            class: format!("toast align-items-center text-white {} border-0", bg_class),
            created_at: Utc::now(),
        }
    }
}

/// Sink for user-visible notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a toast and return its id
    async fn show(&self, message: &str, kind: ToastKind) -> Uuid;
}

/// Per-kind emission counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToastCounts {
    pub info: u64,
    pub success: u64,
    pub error: u64,
}

/// In-memory toast container with timed dismissal
pub struct ToastBoard {
    toasts: Arc<RwLock<Vec<Toast>>>,
    display: Duration,
    info: AtomicU64,
    success: AtomicU64,
    error: AtomicU64,
}

impl ToastBoard {
    /// Create a board whose toasts hide themselves after `display`
    pub fn new(display: Duration) -> Self {
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
            display,
            info: AtomicU64::new(0),
            success: AtomicU64::new(0),
            error: AtomicU64::new(0),
        }
    }

    /// Toasts currently attached, oldest first
    pub async fn visible(&self) -> Vec<Toast> {
        self.toasts.read().await.clone()
    }

    /// Remove a toast; returns whether it was still attached
    pub async fn dismiss(&self, id: Uuid) -> bool {
        remove_toast(&self.toasts, id).await
    }

    /// Number of toasts ever shown, per kind
    pub fn counts(&self) -> ToastCounts {
        ToastCounts {
            info: self.info.load(Ordering::Relaxed),
            success: self.success.load(Ordering::Relaxed),
            error: self.error.load(Ordering::Relaxed),
        }
    }

    fn counter(&self, kind: ToastKind) -> &AtomicU64 {
        match kind {
            ToastKind::Info => &self.info,
            ToastKind::Success => &self.success,
            ToastKind::Error => &self.error,
        }
    }
}

impl Default for ToastBoard {
    /// Five second display, matching the usual toast auto-hide delay
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

#[async_trait]
impl Notifier for ToastBoard {
    async fn show(&self, message: &str, kind: ToastKind) -> Uuid {
        let toast = Toast::new(message, kind);
        let id = toast.id;

        match kind {
            ToastKind::Error => tracing::warn!(toast_id = %id, "Toast: {}", message),
            _ => tracing::info!(toast_id = %id, kind = ?kind, "Toast: {}", message),
        }

        self.toasts.write().await.push(toast);
        self.counter(kind).fetch_add(1, Ordering::Relaxed);

        // Dismissal fires on its own; the toast removes itself when it does
        let toasts = Arc::clone(&self.toasts);
        let display = self.display;
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            remove_toast(&toasts, id).await;
        });

        id
    }
}

async fn remove_toast(toasts: &RwLock<Vec<Toast>>, id: Uuid) -> bool {
    let mut toasts = toasts.write().await;
    let before = toasts.len();
    toasts.retain(|t| t.id != id);
    toasts.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_styling() {
        let toast = Toast::new("Data refreshed successfully", ToastKind::Success);
        assert_eq!(toast.icon, "✓");
        assert!(toast.class.contains("bg-success"));
        assert_eq!(ToastKind::default(), ToastKind::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_removes_itself_after_display() {
        let board = ToastBoard::new(Duration::from_millis(5000));
        board.show("Data refreshed successfully", ToastKind::Success).await;
        assert_eq!(board.visible().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(board.visible().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(board.visible().await.is_empty());
        assert_eq!(board.counts().success, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_toasts_are_independent() {
        let board = ToastBoard::default();
        let first = board.show("Error refreshing data", ToastKind::Error).await;
        board.show("Error refreshing data", ToastKind::Error).await;
        assert_eq!(board.visible().await.len(), 2);

        assert!(board.dismiss(first).await);
        assert!(!board.dismiss(first).await);
        assert_eq!(board.visible().await.len(), 1);
        assert_eq!(
            board.counts(),
            ToastCounts {
                info: 0,
                success: 0,
                error: 2
            }
        );
    }
}
