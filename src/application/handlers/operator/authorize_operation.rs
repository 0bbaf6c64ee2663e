//! AuthorizeOperationHandler - Resolves the caller's role and applies the
//! access policy table.

use std::sync::Arc;

use tracing::warn;

use crate::domain::access::{AccessDenied, AccessPolicy, Operation, Operator, Requirement};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::MembershipError;
use crate::ports::OperatorDirectory;

pub const PROFILE_NOT_FOUND: &str = "User profile not found. Please sync your account.";

/// Handler for operation-level authorization.
pub struct AuthorizeOperationHandler {
    operators: Arc<dyn OperatorDirectory>,
    policy: AccessPolicy,
}

impl AuthorizeOperationHandler {
    pub fn new(operators: Arc<dyn OperatorDirectory>) -> Self {
        Self {
            operators,
            policy: AccessPolicy,
        }
    }

    /// Returns the caller's operator record when the operation needs one,
    /// `None` for public operations.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the operation needs a role and there is no caller
    /// - `Forbidden` if the caller has no operator profile or the wrong role
    pub async fn handle(
        &self,
        user: Option<&AuthenticatedUser>,
        operation: Operation,
    ) -> Result<Option<Operator>, MembershipError> {
        if operation.requirement() == Requirement::Public {
            return Ok(None);
        }
        let user = user.ok_or(MembershipError::Unauthenticated)?;

        let operator = self
            .operators
            .find_by_subject(&user.subject)
            .await?
            .ok_or_else(|| {
                warn!(subject = %user.subject, %operation, "Operator profile missing");
                MembershipError::forbidden(PROFILE_NOT_FOUND)
            })?;

        match self.policy.check(Some(operator.role), operation) {
            Ok(()) => Ok(Some(operator)),
            Err(AccessDenied::Unauthenticated) => Err(MembershipError::Unauthenticated),
            Err(AccessDenied::Forbidden { operation, role }) => {
                warn!(operator_id = %operator.id, %role, %operation, "Access denied");
                Err(MembershipError::forbidden(format!(
                    "Role '{}' may not perform {}",
                    role, operation
                )))
            }
        }
    }
}
