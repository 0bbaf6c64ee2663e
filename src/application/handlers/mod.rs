//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! Handlers that write a member re-read and replay on a version conflict,
//! up to [`MAX_WRITE_ATTEMPTS`] times, before surfacing `Conflict`.

pub mod membership;
pub mod operator;
pub mod payment;
pub mod plan;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

/// Attempts per member write before a version conflict is surfaced.
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 3;
