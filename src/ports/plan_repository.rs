//! Plan repository port.

use crate::domain::foundation::{DomainError, PlanId};
use crate::domain::membership::Plan;
use async_trait::async_trait;

/// Repository port for the plan catalogue.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// # Errors
    ///
    /// - `DuplicatePlanName` if the name is taken
    async fn insert(&self, plan: &Plan) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PlanNotFound` if the plan does not exist
    /// - `DuplicatePlanName` if the new name is taken by another plan
    async fn update(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Finds a plan regardless of whether it is still active.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError>;

    /// Plans ordered by price, optionally only active ones.
    async fn list(&self, active_only: bool) -> Result<Vec<Plan>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PlanRepository) {}
    }
}
