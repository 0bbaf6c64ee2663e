//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the membership domain.

mod auth;
mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MemberId, OperatorId, PaymentId, PlanId, SubjectId};
pub use money::Money;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
