//! Member subscription status state machine.
//!
//! The machine has no absorbing state: every status can move to every
//! other one, through a paid payment, a manual edit, or (Active only)
//! the passage of time.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subscription status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    /// Subscription window is open (as of the last write).
    Active,

    /// Window has elapsed; set by the reconciler or by hand.
    Expired,

    /// Administratively paused. Dates are kept as they were.
    Suspended,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Active,
        MemberStatus::Expired,
        MemberStatus::Suspended,
    ];

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Expired => "expired",
            MemberStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemberStatus::Active => "Active",
            MemberStatus::Expired => "Expired",
            MemberStatus::Suspended => "Suspended",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MemberStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "expired" => Ok(MemberStatus::Expired),
            "suspended" => Ok(MemberStatus::Suspended),
            _ => Err(ValidationError::invalid_format(
                "status",
                format!("unknown member status '{}'", s),
            )),
        }
    }
}

impl StateMachine for MemberStatus {
    fn can_transition_to(&self, _target: &Self) -> bool {
        true
    }

    fn valid_transitions(&self) -> Vec<Self> {
        MemberStatus::ALL.to_vec()
    }
}
