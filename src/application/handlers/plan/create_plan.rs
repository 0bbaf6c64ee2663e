//! CreatePlanHandler - Adds a plan to the catalogue.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{Money, PlanId};
use crate::domain::membership::{MembershipError, Plan, PlanDuration};
use crate::ports::{Clock, PlanRepository};

/// Command to create a plan.
#[derive(Debug, Clone)]
pub struct CreatePlanCommand {
    pub name: String,
    pub duration: PlanDuration,
    pub price: Money,
    pub description: String,
}

/// Handler for plan creation.
pub struct CreatePlanHandler {
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
}

impl CreatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { plans, clock }
    }

    pub async fn handle(&self, cmd: CreatePlanCommand) -> Result<Plan, MembershipError> {
        let plan = Plan::new(
            PlanId::new(),
            cmd.name,
            cmd.duration,
            cmd.price,
            cmd.description,
            self.clock.now(),
        )?;
        self.plans.insert(&plan).await?;

        info!(plan_id = %plan.id, name = %plan.name, duration = %plan.duration, "Plan created");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};

    fn command(name: &str) -> CreatePlanCommand {
        CreatePlanCommand {
            name: name.into(),
            duration: PlanDuration::Quarterly,
            price: Money::from_cents(7900).unwrap(),
            description: "Three months".into(),
        }
    }

    #[tokio::test]
    async fn creates_active_plan() {
        let fx = Fixture::at(ts(2024, 1, 15));

        let plan = CreatePlanHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(command("Standard Quarterly"))
            .await
            .unwrap();

        assert!(plan.is_active);
        assert_eq!(plan.created_at, ts(2024, 1, 15));
        let stored = PlanRepository::find_by_id(fx.store.as_ref(), &plan.id).await.unwrap();
        assert_eq!(stored, Some(plan));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let handler = CreatePlanHandler::new(fx.store.clone(), fx.clock.clone());
        handler.handle(command("Standard Quarterly")).await.unwrap();

        let result = handler.handle(command("standard quarterly")).await;

        assert!(matches!(result, Err(MembershipError::DuplicatePlanName(_))));
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let mut cmd = command("Standard Quarterly");
        cmd.description = "".into();

        let result = CreatePlanHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(cmd)
            .await;

        assert!(matches!(
            result,
            Err(MembershipError::ValidationFailed { ref field, .. }) if field == "description"
        ));
    }
}
