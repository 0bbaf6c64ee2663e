//! Background tasks.

mod reconcile_scheduler;

pub use reconcile_scheduler::{ReconcileScheduler, ReconcileSchedulerConfig};
