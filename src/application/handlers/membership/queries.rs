//! Member read-side queries.
//!
//! Every view carries `effective_status`, the status as of now, next to
//! the stored status, which may be stale until the next reconciler sweep.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{Member, MemberStatus, MembershipError};
use crate::ports::{Clock, MemberRepository};

/// Default look-ahead for the expiring-soon list.
pub const DEFAULT_EXPIRING_DAYS: u32 = 7;

/// Widest expiring-soon window a caller may ask for, in days.
pub const MAX_EXPIRING_DAYS: u32 = 3650;

/// Member with its real-time status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    pub effective_status: MemberStatus,
}

impl MemberView {
    pub fn at(member: Member, now: Timestamp) -> Self {
        let effective_status = member.effective_status(now);
        Self {
            member,
            effective_status,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Get
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl GetMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<MemberView, MembershipError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound(query.member_id))?;
        Ok(MemberView::at(member, self.clock.now()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// List
// ════════════════════════════════════════════════════════════════════════════

pub struct ListMembersHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl ListMembersHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    pub async fn handle(&self) -> Result<Vec<MemberView>, MembershipError> {
        let now = self.clock.now();
        Ok(self
            .members
            .list()
            .await?
            .into_iter()
            .map(|m| MemberView::at(m, now))
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Expiring soon
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ListExpiringMembersQuery {
    pub within_days: u32,
}

impl Default for ListExpiringMembersQuery {
    fn default() -> Self {
        Self {
            within_days: DEFAULT_EXPIRING_DAYS,
        }
    }
}

pub struct ListExpiringMembersHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl ListExpiringMembersHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    pub async fn handle(&self, query: ListExpiringMembersQuery) -> Result<Vec<MemberView>, MembershipError> {
        if query.within_days > MAX_EXPIRING_DAYS {
            return Err(MembershipError::validation(
                "days",
                format!("days must be at most {}", MAX_EXPIRING_DAYS),
            ));
        }
        let now = self.clock.now();
        let until = now.add_days(i64::from(query.within_days));
        Ok(self
            .members
            .list_expiring(now, until)
            .await?
            .into_iter()
            .map(|m| MemberView::at(m, now))
            .collect())
    }
}
