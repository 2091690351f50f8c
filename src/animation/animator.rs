//! Animator and animation state

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::clock::FrameClock;
use crate::format::Formatter;
use crate::view::{Document, ViewResult};

/// What happens when an element is animated while a previous animation is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    /// Both animations keep writing; the last write of each frame wins
    #[default]
    Race,
    /// The older animation stops at its next frame
    Supersede,
}

/// Animator configuration
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Time from start value to end value
    pub duration: Duration,
    pub mode: AnimationMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            mode: AnimationMode::Race,
        }
    }
}

/// One linear interpolation from `start` to `end`
#[derive(Debug, Clone, Copy)]
pub struct AnimationState {
    pub start: f64,
    pub end: f64,
    pub started_at: Instant,
    pub duration: Duration,
}

impl AnimationState {
    pub fn new(start: f64, end: f64, started_at: Instant, duration: Duration) -> Self {
        Self {
            start,
            end,
            started_at,
            duration,
        }
    }

    /// Elapsed fraction at `now`, clamped to `[0, 1]`
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at a given progress
    pub fn value_at(&self, progress: f64) -> f64 {
        self.start + (self.end - self.start) * progress
    }
}

/// How an animation task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Superseded,
}

/// Handle to a running animation task
#[derive(Debug)]
pub struct AnimationHandle {
    element: String,
    task: JoinHandle<ViewResult<AnimationOutcome>>,
}

impl AnimationHandle {
    /// Element this animation writes to
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Wait for the frame loop to finish
    pub async fn wait(self) -> ViewResult<AnimationOutcome> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(AnimationOutcome::Superseded),
            Err(e) => {
                tracing::error!(element = %self.element, "Animation task failed: {}", e);
                Ok(AnimationOutcome::Superseded)
            }
        }
    }

    /// Abort the frame loop without a final write
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Drives metric animations against a document
#[derive(Clone)]
pub struct Animator {
    document: Arc<dyn Document>,
    clock: Arc<dyn FrameClock>,
    config: AnimationConfig,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl Animator {
    pub fn new(
        document: Arc<dyn Document>,
        clock: Arc<dyn FrameClock>,
        config: AnimationConfig,
    ) -> Self {
        Self {
            document,
            clock,
            config,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Animate `element` from its displayed value to `end`.
    ///
    /// The start value is read before this returns, so a missing element
    /// fails here rather than inside the frame loop.
    pub async fn animate(
        &self,
        element: &str,
        end: f64,
        formatter: Formatter,
    ) -> ViewResult<AnimationHandle> {
        let shown = self.document.text(element).await?;
        let start = parse_display_value(&shown);
        let state = AnimationState::new(start, end, Instant::now(), self.config.duration);

        let generation = {
            let mut generations = self.generations.lock().await;
            let counter = generations.entry(element.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };

        tracing::trace!(element, start, end, "Starting value animation");

        let task = tokio::spawn(run_frames(
            element.to_string(),
            state,
            formatter,
            generation,
            self.config.mode,
            Arc::clone(&self.document),
            Arc::clone(&self.clock),
            Arc::clone(&self.generations),
        ));

        Ok(AnimationHandle {
            element: element.to_string(),
            task,
        })
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_frames(
    element: String,
    state: AnimationState,
    formatter: Formatter,
    generation: u64,
    mode: AnimationMode,
    document: Arc<dyn Document>,
    clock: Arc<dyn FrameClock>,
    generations: Arc<Mutex<HashMap<String, u64>>>,
) -> ViewResult<AnimationOutcome> {
    loop {
        let now = clock.next_frame().await;

        if mode == AnimationMode::Supersede {
            let latest = generations.lock().await.get(&element).copied();
            if latest != Some(generation) {
                tracing::trace!(element = %element, "Animation superseded");
                return Ok(AnimationOutcome::Superseded);
            }
        }

        let progress = state.progress_at(now);
        let current = state.value_at(progress);

        if let Err(e) = document.set_text(&element, formatter(current)).await {
            tracing::warn!(element = %element, "Animation stopped: {}", e);
            return Err(e);
        }

        if progress >= 1.0 {
            return Ok(AnimationOutcome::Completed);
        }
    }
}

fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.\-]+").expect("valid regex"))
}

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("valid regex"))
}

/// Parse the number shown in a display string.
///
/// Everything except digits, `.` and `-` is dropped, then the longest
/// leading decimal is parsed. Unparseable text reads as zero.
pub fn parse_display_value(text: &str) -> f64 {
    let stripped = non_numeric().replace_all(text, "");
    leading_number()
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
