//! RegisterMemberHandler - Command handler for enrolling a new member on a plan.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{MemberId, PlanId};
use crate::domain::membership::{Member, MemberProfile, MembershipError, RenewalPolicy};
use crate::ports::{Clock, MemberRepository, PlanRepository};

/// Command to register a member.
#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub plan_id: PlanId,
}

/// Handler for member registration.
pub struct RegisterMemberHandler {
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
    renewal: Arc<dyn RenewalPolicy>,
}

impl RegisterMemberHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        plans: Arc<dyn PlanRepository>,
        clock: Arc<dyn Clock>,
        renewal: Arc<dyn RenewalPolicy>,
    ) -> Self {
        Self {
            members,
            plans,
            clock,
            renewal,
        }
    }

    pub async fn handle(&self, cmd: RegisterMemberCommand) -> Result<Member, MembershipError> {
        let profile = MemberProfile::new(cmd.first_name, cmd.last_name, cmd.email, cmd.phone, cmd.address)?;

        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or(MembershipError::PlanNotFound(cmd.plan_id))?;

        if self.members.find_by_email(&profile.email).await?.is_some() {
            return Err(MembershipError::DuplicateEmail(profile.email));
        }

        let member = Member::register(
            MemberId::new(),
            profile,
            &plan,
            self.clock.now(),
            self.renewal.as_ref(),
        )?;
        self.members.insert(&member).await?;

        info!(
            member_id = %member.id,
            plan_id = %plan.id,
            end_date = ?member.end_date,
            "Member registered"
        );
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::membership::{MemberStatus, PlanDuration, ResetFromNow};

    fn handler(fx: &Fixture) -> RegisterMemberHandler {
        RegisterMemberHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            Arc::new(ResetFromNow),
        )
    }

    fn command(email: &str, plan_id: PlanId) -> RegisterMemberCommand {
        RegisterMemberCommand {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: email.into(),
            phone: Some("555-0199".into()),
            address: None,
            plan_id,
        }
    }

    #[tokio::test]
    async fn registers_active_member_with_window() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;

        let member = handler(&fx).handle(command("grace@example.com", plan.id)).await.unwrap();

        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.start_date, Some(ts(2024, 1, 15)));
        assert_eq!(member.end_date, Some(ts(2024, 2, 15)));
        assert_eq!(fx.reload(&member.id).await, member);
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let missing = PlanId::new();

        let result = handler(&fx).handle(command("grace@example.com", missing)).await;

        assert_eq!(result.unwrap_err(), MembershipError::PlanNotFound(missing));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        handler(&fx).handle(command("grace@example.com", plan.id)).await.unwrap();

        let result = handler(&fx).handle(command("GRACE@example.com", plan.id)).await;

        assert!(matches!(result, Err(MembershipError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn deactivated_plan_cannot_be_assigned() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let mut plan = fx.plan("Old Plan", PlanDuration::Monthly, 1000).await;
        plan.deactivate(ts(2024, 1, 15));
        PlanRepository::update(fx.store.as_ref(), &plan).await.unwrap();

        let result = handler(&fx).handle(command("grace@example.com", plan.id)).await;

        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn missing_first_name_is_validation_error() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let mut cmd = command("grace@example.com", plan.id);
        cmd.first_name = " ".into();

        let result = handler(&fx).handle(cmd).await;

        assert!(matches!(
            result,
            Err(MembershipError::ValidationFailed { ref field, .. }) if field == "first_name"
        ));
    }
}
