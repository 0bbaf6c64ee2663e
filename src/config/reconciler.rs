//! Expiry reconciler schedule

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    /// Seconds between sweeps
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Sweep once immediately at startup
    #[serde(default = "default_run_on_startup")]
    pub run_on_startup: bool,
}

impl ReconcilerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 {
            return Err(ValidationError::InvalidReconcileInterval);
        }
        Ok(())
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            run_on_startup: default_run_on_startup(),
        }
    }
}

fn default_interval() -> u64 {
    3600
}

fn default_run_on_startup() -> bool {
    true
}
