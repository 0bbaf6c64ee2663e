//! Member aggregate: the subject of the subscription lifecycle.
//!
//! Only the methods on this type change `status`, `start_date` and
//! `end_date`. Every transition takes `now` from the caller so that the
//! rules can be exercised with fixed instants.
//!
//! # Consistency caveat
//!
//! `status` is only as fresh as the last write. Between reconciler sweeps
//! an Active member may already be past `end_date`; callers that need an
//! up-to-the-second answer use [`Member::effective_status`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MemberId, PlanId, StateMachine, Timestamp, ValidationError,
};

use super::{MemberStatus, MembershipError, Plan, RenewalPolicy, SubscriptionWindow};

/// Contact details of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub first_name: String,
    pub last_name: String,
    /// Always lower-case; unique across members.
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl MemberProfile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into().trim().to_string();
        if first_name.is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        Ok(Self {
            first_name,
            last_name: last_name.into().trim().to_string(),
            email: normalize_email(&email.into())?,
            phone: non_blank(phone),
            address: non_blank(address),
        })
    }
}

/// Partial profile edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Lower-cases and validates an email address.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::invalid_format("email", "expected name@domain")),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A subscribing member.
///
/// # Invariants
///
/// - `status == Active` implies `end_date.is_some()`
/// - when a window is set, `start_date <= end_date`
/// - `version` increases by one with every persisted write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub profile: MemberProfile,
    pub current_plan: Option<PlanId>,
    pub status: MemberStatus,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    /// Optimistic concurrency token, owned by the repository.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Registers a new member on `plan`, opening a window at `now`.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the plan has been deactivated.
    pub fn register(
        id: MemberId,
        profile: MemberProfile,
        plan: &Plan,
        now: Timestamp,
        policy: &dyn RenewalPolicy,
    ) -> Result<Self, MembershipError> {
        ensure_assignable(plan)?;
        let window = policy.renew(now, plan.duration, None);
        Ok(Self {
            id,
            profile,
            current_plan: Some(plan.id),
            status: MemberStatus::Active,
            start_date: Some(window.start),
            end_date: Some(window.end),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Current window, if both dates are set.
    pub fn window(&self) -> Option<SubscriptionWindow> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(SubscriptionWindow { start, end }),
            _ => None,
        }
    }

    /// Reactivates the member after a Paid payment for `plan`.
    ///
    /// Applies from any status. The payment's plan becomes the current plan,
    /// even if it has since been deactivated.
    pub fn apply_paid_payment(
        &mut self,
        plan: &Plan,
        now: Timestamp,
        policy: &dyn RenewalPolicy,
    ) -> Result<(), MembershipError> {
        self.status = self.status.transition_to(MemberStatus::Active)?;
        self.current_plan = Some(plan.id);
        self.set_window(policy.renew(now, plan.duration, self.window()));
        self.updated_at = now;
        Ok(())
    }

    /// Moves the member onto another plan and restarts the window.
    ///
    /// Status is left as it is.
    pub fn reassign_plan(
        &mut self,
        plan: &Plan,
        now: Timestamp,
        policy: &dyn RenewalPolicy,
    ) -> Result<(), MembershipError> {
        ensure_assignable(plan)?;
        self.current_plan = Some(plan.id);
        self.set_window(policy.renew(now, plan.duration, self.window()));
        self.updated_at = now;
        Ok(())
    }

    /// Manual status edit. Dates are never touched.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` when setting Active on a member without an end date.
    pub fn set_status(&mut self, target: MemberStatus, now: Timestamp) -> Result<(), MembershipError> {
        if target == MemberStatus::Active && self.end_date.is_none() {
            return Err(MembershipError::validation(
                "status",
                "cannot activate a member without a subscription window",
            ));
        }
        self.status = self.status.transition_to(target)?;
        self.updated_at = now;
        Ok(())
    }

    /// True when the stored status is Active but the window has elapsed.
    pub fn is_lapsed(&self, now: Timestamp) -> bool {
        self.status == MemberStatus::Active
            && self.end_date.map(|end| end.is_before(&now)).unwrap_or(false)
    }

    /// Time-passage transition. Returns whether the member was expired.
    pub fn expire_if_elapsed(&mut self, now: Timestamp) -> bool {
        if !self.is_lapsed(now) {
            return false;
        }
        self.status = MemberStatus::Expired;
        self.updated_at = now;
        true
    }

    /// Status as it would read after a sweep at `now`.
    pub fn effective_status(&self, now: Timestamp) -> MemberStatus {
        if self.is_lapsed(now) {
            MemberStatus::Expired
        } else {
            self.status
        }
    }

    /// Active and ending somewhere in `[from, until]`.
    pub fn expires_between(&self, from: Timestamp, until: Timestamp) -> bool {
        self.status == MemberStatus::Active
            && self
                .end_date
                .is_some_and(|end| !end.is_before(&from) && !end.is_after(&until))
    }

    /// Merges contact changes.
    pub fn update_profile(&mut self, changes: ProfileChanges, now: Timestamp) -> Result<(), ValidationError> {
        if changes.is_empty() {
            return Ok(());
        }
        let current = &self.profile;
        self.profile = MemberProfile::new(
            changes.first_name.unwrap_or_else(|| current.first_name.clone()),
            changes.last_name.unwrap_or_else(|| current.last_name.clone()),
            changes.email.unwrap_or_else(|| current.email.clone()),
            changes.phone.or_else(|| current.phone.clone()),
            changes.address.or_else(|| current.address.clone()),
        )?;
        self.updated_at = now;
        Ok(())
    }

    fn set_window(&mut self, window: SubscriptionWindow) {
        self.start_date = Some(window.start);
        self.end_date = Some(window.end);
    }
}

fn ensure_assignable(plan: &Plan) -> Result<(), MembershipError> {
    if !plan.is_active {
        return Err(MembershipError::validation(
            "plan_id",
            format!("plan '{}' is no longer offered", plan.name),
        ));
    }
    Ok(())
}
