//! Clock port.
//!
//! Lifecycle transitions and reconciliation read the current time only
//! through this trait, so tests can pin "now" to a fixed instant.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
