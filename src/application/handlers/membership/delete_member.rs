//! DeleteMemberHandler - Command handler for removing a member.
//!
//! Ledger rows for the member are kept; payments are history.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::MemberId;
use crate::domain::membership::MembershipError;
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub member_id: MemberId,
}

pub struct DeleteMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl DeleteMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: DeleteMemberCommand) -> Result<(), MembershipError> {
        if !self.members.delete(&cmd.member_id).await? {
            return Err(MembershipError::MemberNotFound(cmd.member_id));
        }
        info!(member_id = %cmd.member_id, "Member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::membership::PlanDuration;

    #[tokio::test]
    async fn deletes_existing_member() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let handler = DeleteMemberHandler::new(fx.store.clone());

        handler
            .handle(DeleteMemberCommand { member_id: member.id })
            .await
            .unwrap();

        let found = MemberRepository::find_by_id(fx.store.as_ref(), &member.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let handler = DeleteMemberHandler::new(fx.store.clone());

        handler.handle(DeleteMemberCommand { member_id: member.id }).await.unwrap();
        let result = handler.handle(DeleteMemberCommand { member_id: member.id }).await;

        assert_eq!(result.unwrap_err(), MembershipError::MemberNotFound(member.id));
    }
}
