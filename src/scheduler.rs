//! Refresh Scheduler
//!
//! Runs a dashboard cycle once at startup and then on a fixed interval for
//! the lifetime of the process.
//!
//! Cycles are spawned fire-and-forget, so a slow cycle does not delay the
//! next tick and two cycles may overlap. With `overlap_guard` set, a tick
//! that finds a cycle still in flight is skipped instead.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::dashboard::DashboardController;

/// Scheduling parameters
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Time between cycle starts
    pub interval: Duration,
    /// Skip a tick while the previous cycle is still running
    pub overlap_guard: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300_000),
            overlap_guard: false,
        }
    }
}

/// Tick counters of a scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    pub dispatched: u64,
    pub skipped: u64,
}

/// Drives [`DashboardController::refresh`] on a timer
pub struct RefreshScheduler {
    controller: Arc<DashboardController>,
    config: ScheduleConfig,
    running: AtomicBool,
    in_flight: Arc<AtomicBool>,
    dispatched: AtomicU64,
    skipped: AtomicU64,
}

impl RefreshScheduler {
    pub fn new(controller: Arc<DashboardController>, config: ScheduleConfig) -> Self {
        Self {
            controller,
            config,
            running: AtomicBool::new(false),
            in_flight: Arc::new(AtomicBool::new(false)),
            dispatched: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Start the scheduler background task.
    ///
    /// The first cycle is dispatched immediately.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        self.running.store(true, Ordering::Release);
        let scheduler = self.clone();

        tokio::spawn(async move {
            tracing::info!(
                interval_ms = scheduler.config.interval.as_millis() as u64,
                overlap_guard = scheduler.config.overlap_guard,
                "Refresh scheduler started"
            );

            // First tick completes immediately
            let mut interval = tokio::time::interval(scheduler.config.interval);

            loop {
                interval.tick().await;

                if !scheduler.running.load(Ordering::Acquire) {
                    break;
                }

                scheduler.dispatch();
            }

            tracing::info!("Refresh scheduler stopped");
        })
    }

    /// Stop the scheduler; cycles already in flight run to completion
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Spawn one cycle, unless the overlap guard holds it back
    fn dispatch(&self) {
        let guard = self.config.overlap_guard;

        if guard && self.in_flight.swap(true, Ordering::AcqRel) {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Previous refresh still running, skipping this tick");
            return;
        }

        self.dispatched.fetch_add(1, Ordering::Relaxed);
        let controller = Arc::clone(&self.controller);
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            // Fetch failures are handled inside the cycle
            if let Err(e) = controller.refresh().await {
                tracing::error!("Dashboard cycle aborted: {}", e);
            }

            if guard {
                in_flight.store(false, Ordering::Release);
            }
        });
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}
