//! Plan edits and soft deletion.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::PlanId;
use crate::domain::membership::{MembershipError, Plan, PlanChanges};
use crate::ports::{Clock, PlanRepository};

/// Command to edit a plan.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanCommand {
    pub plan_id: PlanId,
    pub changes: PlanChanges,
}

/// Handler for plan edits.
pub struct UpdatePlanHandler {
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { plans, clock }
    }

    pub async fn handle(&self, cmd: UpdatePlanCommand) -> Result<Plan, MembershipError> {
        let mut plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or(MembershipError::PlanNotFound(cmd.plan_id))?;

        plan.apply(cmd.changes, self.clock.now())?;
        self.plans.update(&plan).await?;

        info!(plan_id = %plan.id, is_active = plan.is_active, "Plan updated");
        Ok(plan)
    }
}

/// Command to soft-delete a plan.
#[derive(Debug, Clone)]
pub struct DeactivatePlanCommand {
    pub plan_id: PlanId,
}

/// Handler for plan deactivation.
///
/// Members and payments that reference the plan keep resolving it.
pub struct DeactivatePlanHandler {
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
}

impl DeactivatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { plans, clock }
    }

    pub async fn handle(&self, cmd: DeactivatePlanCommand) -> Result<Plan, MembershipError> {
        let mut plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or(MembershipError::PlanNotFound(cmd.plan_id))?;

        if plan.is_active {
            plan.deactivate(self.clock.now());
            self.plans.update(&plan).await?;
            info!(plan_id = %plan.id, "Plan deactivated");
        }
        Ok(plan)
    }
}
