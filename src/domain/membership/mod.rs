//! Membership domain module.
//!
//! Plans, members, and the rules that move a member's subscription
//! between Active, Expired and Suspended.
//!
//! # Module Structure
//!
//! - `duration` - Billing periods and end-date arithmetic
//! - `status` - MemberStatus state machine
//! - `plan` - Plan catalogue entry
//! - `renewal` - RenewalPolicy strategy
//! - `member` - Member aggregate and lifecycle transitions
//! - `errors` - Error taxonomy shared by handlers

mod duration;
mod errors;
mod member;
mod plan;
mod renewal;
mod status;

pub use duration::{compute_end_date, PlanDuration};
pub use errors::MembershipError;
pub use member::{normalize_email, Member, MemberProfile, ProfileChanges};
pub use plan::{Plan, PlanChanges};
pub use renewal::{RenewalPolicy, ResetFromNow, SubscriptionWindow};
pub use status::MemberStatus;
