//! SeedDefaultPlansHandler - Populates an empty catalogue at startup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{Money, PlanId};
use crate::domain::membership::{MembershipError, Plan, PlanDuration};
use crate::ports::{Clock, PlanRepository};

/// Catalogue installed when no plans exist: (name, duration, cents, description).
pub const DEFAULT_PLANS: [(&str, PlanDuration, i64, &str); 3] = [
    (
        "Basic Monthly",
        PlanDuration::Monthly,
        2900,
        "Access to all basic portal features",
    ),
    (
        "Standard Quarterly",
        PlanDuration::Quarterly,
        7900,
        "Everything in Basic plus priority support",
    ),
    (
        "Premium Yearly",
        PlanDuration::Yearly,
        24900,
        "Full analytics and dedicated support",
    ),
];

pub struct SeedDefaultPlansHandler {
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
}

impl SeedDefaultPlansHandler {
    pub fn new(plans: Arc<dyn PlanRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { plans, clock }
    }

    /// Seeds the default catalogue if it is empty. Returns the number of plans created.
    pub async fn handle(&self) -> Result<usize, MembershipError> {
        if self.plans.count().await? > 0 {
            debug!("Plan catalogue already populated, skipping seed");
            return Ok(0);
        }

        let now = self.clock.now();
        for (name, duration, cents, description) in DEFAULT_PLANS {
            let plan = Plan::new(PlanId::new(), name, duration, Money::from_cents(cents)?, description, now)?;
            self.plans.insert(&plan).await?;
        }

        info!(count = DEFAULT_PLANS.len(), "Seeded default plans");
        Ok(DEFAULT_PLANS.len())
    }
}
