//! Plan catalogue listing.

use std::sync::Arc;

use crate::domain::membership::{MembershipError, Plan};
use crate::ports::PlanRepository;

/// Query for the plan catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPlansQuery {
    /// When true, deactivated plans are included.
    pub include_inactive: bool,
}

/// Lists plans, cheapest first.
pub struct ListPlansHandler {
    plans: Arc<dyn PlanRepository>,
}

impl ListPlansHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, query: ListPlansQuery) -> Result<Vec<Plan>, MembershipError> {
        Ok(self.plans.list(!query.include_inactive).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::membership::PlanDuration;

    #[tokio::test]
    async fn assignable_listing_hides_deactivated_plans() {
        let fx = Fixture::at(ts(2024, 1, 15));
        fx.plan("Premium Yearly", PlanDuration::Yearly, 24900).await;
        let mut retired = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        retired.deactivate(ts(2024, 1, 16));
        PlanRepository::update(fx.store.as_ref(), &retired).await.unwrap();
        let handler = ListPlansHandler::new(fx.store.clone());

        let active = handler.handle(ListPlansQuery::default()).await.unwrap();
        let all = handler
            .handle(ListPlansQuery {
                include_inactive: true,
            })
            .await
            .unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Premium Yearly");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Basic Monthly");
    }
}
