//! Plan catalogue handlers.

mod create_plan;
mod list_plans;
mod seed_default_plans;
mod update_plan;

pub use create_plan::{CreatePlanCommand, CreatePlanHandler};
pub use list_plans::{ListPlansHandler, ListPlansQuery};
pub use seed_default_plans::{SeedDefaultPlansHandler, DEFAULT_PLANS};
pub use update_plan::{DeactivatePlanCommand, DeactivatePlanHandler, UpdatePlanCommand, UpdatePlanHandler};
