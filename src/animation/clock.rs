//! Frame clocks

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Source of animation frames
#[async_trait]
pub trait FrameClock: Send + Sync {
    /// Wait for the next frame and return its timestamp
    async fn next_frame(&self) -> Instant;
}

/// Frame clock backed by a fixed tokio sleep per frame
#[derive(Debug, Clone)]
pub struct TickerClock {
    frame: Duration,
}

impl TickerClock {
    /// Create a clock that fires every `frame`
    pub fn new(frame: Duration) -> Self {
        Self { frame }
    }

    /// Frame interval of this clock
    pub fn frame(&self) -> Duration {
        self.frame
    }
}

impl Default for TickerClock {
    /// Roughly 60 frames per second
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

#[async_trait]
impl FrameClock for TickerClock {
    async fn next_frame(&self) -> Instant {
        tokio::time::sleep(self.frame).await;
        Instant::now()
    }
}
