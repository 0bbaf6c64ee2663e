//! Expiry reconciliation.

mod expiry_reconciler;

pub use expiry_reconciler::{ExpiryReconciler, ReconcileReport};
