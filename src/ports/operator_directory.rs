//! Operator directory port.
//!
//! Maps identity-provider subjects to back-office operators and their roles.

use crate::domain::access::Operator;
use crate::domain::foundation::{DomainError, SubjectId};
use async_trait::async_trait;

#[async_trait]
pub trait OperatorDirectory: Send + Sync {
    async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<Operator>, DomainError>;

    /// # Errors
    ///
    /// - `DuplicateSubject` if an operator already exists for the subject
    async fn insert(&self, operator: &Operator) -> Result<(), DomainError>;
}
