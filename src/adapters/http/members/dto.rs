//! Request bodies for member endpoints.

use serde::Deserialize;

use crate::application::handlers::membership::{EditMemberCommand, ListExpiringMembersQuery, RegisterMemberCommand};
use crate::domain::foundation::{MemberId, PlanId};
use crate::domain::membership::{MemberStatus, ProfileChanges};

/// POST /api/members
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub plan_id: PlanId,
}

impl From<RegisterMemberRequest> for RegisterMemberCommand {
    fn from(req: RegisterMemberRequest) -> Self {
        RegisterMemberCommand {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            plan_id: req.plan_id,
        }
    }
}

/// PATCH /api/members/:id - every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub plan_id: Option<PlanId>,
    pub status: Option<MemberStatus>,
}

impl EditMemberRequest {
    pub fn into_command(self, member_id: MemberId) -> EditMemberCommand {
        EditMemberCommand {
            member_id,
            profile: ProfileChanges {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
                address: self.address,
            },
            plan_id: self.plan_id,
            status: self.status,
        }
    }
}

/// GET /api/members/expiring?days=N
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpiringParams {
    pub days: Option<u32>,
}

impl From<ExpiringParams> for ListExpiringMembersQuery {
    fn from(params: ExpiringParams) -> Self {
        match params.days {
            Some(within_days) => ListExpiringMembersQuery { within_days },
            None => ListExpiringMembersQuery::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_request_accepts_partial_body() {
        let req: EditMemberRequest = serde_json::from_str(r#"{"status":"Suspended"}"#).unwrap();
        let cmd = req.into_command(MemberId::new());
        assert_eq!(cmd.status, Some(MemberStatus::Suspended));
        assert!(cmd.profile.is_empty());
        assert!(cmd.plan_id.is_none());
    }

    #[test]
    fn expiring_defaults_to_seven_days() {
        let query: ListExpiringMembersQuery = ExpiringParams::default().into();
        assert_eq!(query.within_days, 7);
    }
}
