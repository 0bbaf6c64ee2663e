//! Renewal strategy for subscription windows.
//!
//! Decides what window a member gets when a plan is (re)applied, either at
//! registration, on a paid payment, or on plan reassignment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{compute_end_date, PlanDuration};

/// A subscription's start and end instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Computes the window that follows a renewal event.
pub trait RenewalPolicy: Send + Sync {
    /// `current` is the member's window before the event, if any.
    fn renew(
        &self,
        now: Timestamp,
        duration: PlanDuration,
        current: Option<SubscriptionWindow>,
    ) -> SubscriptionWindow;
}

/// Every renewal restarts the window at `now`.
///
/// Remaining time on the previous window is discarded: paying early
/// does not stack, and there is no proration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetFromNow;

impl RenewalPolicy for ResetFromNow {
    fn renew(
        &self,
        now: Timestamp,
        duration: PlanDuration,
        _current: Option<SubscriptionWindow>,
    ) -> SubscriptionWindow {
        SubscriptionWindow {
            start: now,
            end: compute_end_date(now, duration),
        }
    }
}
