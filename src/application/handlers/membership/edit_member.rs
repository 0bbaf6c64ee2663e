//! EditMemberHandler - Command handler for manual member edits.
//!
//! Applies, in order: profile merge, plan reassignment (only when the plan
//! actually changes), then the status edit. The whole edit is one
//! versioned write and is replayed from a fresh read on conflict.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{ErrorCode, MemberId, PlanId};
use crate::domain::membership::{Member, MemberStatus, MembershipError, Plan, ProfileChanges, RenewalPolicy};
use crate::ports::{Clock, MemberRepository, PlanRepository};

use crate::application::handlers::MAX_WRITE_ATTEMPTS;

/// Command to edit a member.
#[derive(Debug, Clone, Default)]
pub struct EditMemberCommand {
    pub member_id: MemberId,
    pub profile: ProfileChanges,
    pub plan_id: Option<PlanId>,
    pub status: Option<MemberStatus>,
}

/// Handler for manual member edits.
pub struct EditMemberHandler {
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
    renewal: Arc<dyn RenewalPolicy>,
}

impl EditMemberHandler {
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

    pub async fn handle(&self, cmd: EditMemberCommand) -> Result<Member, MembershipError> {
        let plan = match cmd.plan_id {
            Some(plan_id) => Some(
                self.plans
                    .find_by_id(&plan_id)
                    .await?
                    .ok_or(MembershipError::PlanNotFound(plan_id))?,
            ),
            None => None,
        };

        let mut attempt = 1;
        loop {
            let mut member = self
                .members
                .find_by_id(&cmd.member_id)
                .await?
                .ok_or(MembershipError::MemberNotFound(cmd.member_id))?;

            if !self.apply(&mut member, &cmd, plan.as_ref())? {
                return Ok(member);
            }

            match self.members.update(&member).await {
                Ok(stored) => {
                    info!(
                        member_id = %stored.id,
                        status = %stored.status,
                        version = stored.version,
                        "Member edited"
                    );
                    return Ok(stored);
                }
                Err(e) if e.code == ErrorCode::ConcurrencyConflict && attempt < MAX_WRITE_ATTEMPTS => {
                    debug!(member_id = %cmd.member_id, attempt, "Member edit lost a race, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Applies the edit to `member`. Returns false when nothing changes.
    fn apply(
        &self,
        member: &mut Member,
        cmd: &EditMemberCommand,
        plan: Option<&Plan>,
    ) -> Result<bool, MembershipError> {
        let now = self.clock.now();
        let mut changed = false;

        if !cmd.profile.is_empty() {
            member.update_profile(cmd.profile.clone(), now)?;
            changed = true;
        }
        if let Some(plan) = plan {
            if member.current_plan != Some(plan.id) {
                member.reassign_plan(plan, now, self.renewal.as_ref())?;
                changed = true;
            }
        }
        if let Some(status) = cmd.status {
            member.set_status(status, now)?;
            changed = true;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::membership::{PlanDuration, ResetFromNow};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn handler(fx: &Fixture) -> EditMemberHandler {
        EditMemberHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            Arc::new(ResetFromNow),
        )
    }

    #[tokio::test]
    async fn suspend_leaves_dates_untouched() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        fx.clock.set(ts(2024, 1, 20));

        let edited = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                status: Some(MemberStatus::Suspended),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.status, MemberStatus::Suspended);
        assert_eq!(edited.window(), member.window());
        assert_eq!(edited.version, 1);
    }

    #[tokio::test]
    async fn plan_change_resets_window_then_status_applies() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let monthly = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let yearly = fx.plan("Premium Yearly", PlanDuration::Yearly, 24900).await;
        let member = fx.member("a@example.com", &monthly).await;
        fx.clock.set(ts(2024, 3, 1));

        let edited = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                plan_id: Some(yearly.id),
                status: Some(MemberStatus::Suspended),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.current_plan, Some(yearly.id));
        assert_eq!(edited.start_date, Some(ts(2024, 3, 1)));
        assert_eq!(edited.end_date, Some(ts(2025, 3, 1)));
        assert_eq!(edited.status, MemberStatus::Suspended);
    }

    #[tokio::test]
    async fn same_plan_does_not_reset_window() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let monthly = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &monthly).await;
        fx.clock.set(ts(2024, 2, 1));

        let edited = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                plan_id: Some(monthly.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.end_date, Some(ts(2024, 2, 15)));
        assert_eq!(edited.version, 0);
    }

    #[tokio::test]
    async fn profile_changes_are_merged() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;

        let edited = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                profile: ProfileChanges {
                    address: Some("1 Main St".into()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.profile.address.as_deref(), Some("1 Main St"));
        assert_eq!(edited.profile.email, "a@example.com");
    }

    #[tokio::test]
    async fn email_collision_is_duplicate_email() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        fx.member("taken@example.com", &plan).await;
        let member = fx.member("a@example.com", &plan).await;

        let result = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                profile: ProfileChanges {
                    email: Some("Taken@example.com".into()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(MembershipError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn missing_member_is_not_found() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let id = MemberId::new();

        let result = handler(&fx)
            .handle(EditMemberCommand {
                member_id: id,
                status: Some(MemberStatus::Expired),
                ..Default::default()
            })
            .await;

        assert_eq!(result.unwrap_err(), MembershipError::MemberNotFound(id));
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let missing = PlanId::new();

        let result = handler(&fx)
            .handle(EditMemberCommand {
                member_id: member.id,
                plan_id: Some(missing),
                ..Default::default()
            })
            .await;

        assert_eq!(result.unwrap_err(), MembershipError::PlanNotFound(missing));
    }

    // ════════════════════════════════════════════════════════════════
    // Conflict handling
    // ════════════════════════════════════════════════════════════════

    /// Repository whose updates always lose the race.
    struct AlwaysConflicting {
        member: Member,
        update_calls: Mutex<u32>,
    }

    #[async_trait]
    impl MemberRepository for AlwaysConflicting {
        async fn insert(&self, _member: &Member) -> Result<(), DomainError> {
            Ok(())
        }
        async fn update(&self, _member: &Member) -> Result<Member, DomainError> {
            *self.update_calls.lock().unwrap() += 1;
            Err(DomainError::conflict("moved"))
        }
        async fn find_by_id(&self, _id: &MemberId) -> Result<Option<Member>, DomainError> {
            Ok(Some(self.member.clone()))
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<Member>, DomainError> {
            Ok(None)
        }
        async fn list(&self) -> Result<Vec<Member>, DomainError> {
            Ok(vec![])
        }
        async fn find_lapsed(&self, _now: Timestamp) -> Result<Vec<Member>, DomainError> {
            Ok(vec![])
        }
        async fn expire_if_lapsed(
            &self,
            _id: &MemberId,
            _expected_version: u64,
            _now: Timestamp,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn list_expiring(
            &self,
            _from: Timestamp,
            _until: Timestamp,
        ) -> Result<Vec<Member>, DomainError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: &MemberId) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn gives_up_after_bounded_retries() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let repo = Arc::new(AlwaysConflicting {
            member: member.clone(),
            update_calls: Mutex::new(0),
        });
        let handler = EditMemberHandler::new(
            repo.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            Arc::new(ResetFromNow),
        );

        let result = handler
            .handle(EditMemberCommand {
                member_id: member.id,
                status: Some(MemberStatus::Suspended),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(MembershipError::Conflict(_))));
        assert_eq!(*repo.update_calls.lock().unwrap(), MAX_WRITE_ATTEMPTS);
    }
}
