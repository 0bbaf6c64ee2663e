//! ReconcileScheduler - Runs the expiry reconciler on a fixed interval.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1h | Time between sweeps |
//! | `run_on_startup` | true | Sweep immediately instead of waiting one interval |
//!
//! ## Graceful Shutdown
//!
//! The loop exits when the watch channel flips to `true`. A sweep in
//! progress finishes first; no final sweep is run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::application::handlers::reconcile::{ExpiryReconciler, ReconcileReport};

/// Configuration for the ReconcileScheduler.
#[derive(Debug, Clone)]
pub struct ReconcileSchedulerConfig {
    pub interval: Duration,
    pub run_on_startup: bool,
}

impl Default for ReconcileSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            run_on_startup: true,
        }
    }
}

impl ReconcileSchedulerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_run_on_startup(mut self, run_on_startup: bool) -> Self {
        self.run_on_startup = run_on_startup;
        self
    }
}

/// Periodic driver for [`ExpiryReconciler`].
pub struct ReconcileScheduler {
    reconciler: Arc<ExpiryReconciler>,
    config: ReconcileSchedulerConfig,
}

impl ReconcileScheduler {
    pub fn new(reconciler: Arc<ExpiryReconciler>, config: ReconcileSchedulerConfig) -> Self {
        Self { reconciler, config }
    }

    /// Runs sweeps until `shutdown` signals `true`. Returns the number of
    /// sweeps that completed.
    ///
    /// A failed sweep is logged and the loop keeps going.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !self.config.run_on_startup {
            // The first tick completes immediately.
            interval.tick().await;
        }

        info!(
            interval_secs = self.config.interval.as_secs(),
            run_on_startup = self.config.run_on_startup,
            "Reconcile scheduler started"
        );

        let mut sweeps = 0;
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!(sweeps, "Reconcile scheduler stopped");
                        return sweeps;
                    }
                }

                _ = interval.tick() => {
                    if self.sweep_once().await.is_some() {
                        sweeps += 1;
                    }
                }
            }
        }
    }

    /// One sweep. `None` when the scan itself failed.
    pub async fn sweep_once(&self) -> Option<ReconcileReport> {
        match self.reconciler.handle().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Reconcile sweep failed");
                None
            }
        }
    }
}
