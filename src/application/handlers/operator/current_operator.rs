//! Lookup of the signed-in operator.

use std::sync::Arc;

use crate::domain::access::Operator;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::MembershipError;
use crate::ports::OperatorDirectory;

use super::PROFILE_NOT_FOUND;

pub struct CurrentOperatorHandler {
    operators: Arc<dyn OperatorDirectory>,
}

impl CurrentOperatorHandler {
    pub fn new(operators: Arc<dyn OperatorDirectory>) -> Self {
        Self { operators }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Result<Operator, MembershipError> {
        self.operators
            .find_by_subject(&user.subject)
            .await?
            .ok_or_else(|| MembershipError::forbidden(PROFILE_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::foundation::SubjectId;

    #[tokio::test]
    async fn unsynced_operator_is_forbidden() {
        let user = AuthenticatedUser::new(SubjectId::new("sub-x").unwrap(), "x@example.com", None);

        let result = CurrentOperatorHandler::new(Arc::new(InMemoryStore::new()))
            .handle(&user)
            .await;

        assert!(matches!(result, Err(MembershipError::Forbidden { .. })));
    }
}
