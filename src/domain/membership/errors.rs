//! Error taxonomy for lifecycle, ledger and access operations.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MemberNotFound / PlanNotFound | 404 |
//! | ValidationFailed | 400 |
//! | DuplicateTransaction / DuplicateEmail / DuplicatePlanName / Conflict | 409 |
//! | SignatureMismatch | 400 |
//! | Unauthenticated | 401 |
//! | Forbidden | 403 |
//! | Gateway | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PlanId, ValidationError};

/// Errors surfaced by membership operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Member reference does not resolve.
    MemberNotFound(MemberId),

    /// Plan reference does not resolve.
    PlanNotFound(PlanId),

    /// Malformed or disallowed input.
    ValidationFailed { field: String, message: String },

    /// External transaction id is already in the ledger.
    DuplicateTransaction(String),

    /// Another member already uses this email.
    DuplicateEmail(String),

    /// Another plan already uses this name.
    DuplicatePlanName(String),

    /// The record changed underneath us and retries ran out.
    Conflict(String),

    /// Gateway signature did not match.
    SignatureMismatch,

    /// No valid caller identity.
    Unauthenticated,

    /// Caller is known but not allowed to perform the operation.
    Forbidden { reason: String },

    /// Payment gateway call failed.
    Gateway(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn member_not_found(id: MemberId) -> Self {
        MembershipError::MemberNotFound(id)
    }

    pub fn plan_not_found(id: PlanId) -> Self {
        MembershipError::PlanNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_transaction(transaction_id: impl Into<String>) -> Self {
        MembershipError::DuplicateTransaction(transaction_id.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        MembershipError::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        MembershipError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MembershipError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::DuplicateTransaction(_) => ErrorCode::DuplicateTransaction,
            MembershipError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            MembershipError::DuplicatePlanName(_) => ErrorCode::DuplicatePlanName,
            MembershipError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            MembershipError::SignatureMismatch => ErrorCode::SignatureMismatch,
            MembershipError::Unauthenticated => ErrorCode::Unauthenticated,
            MembershipError::Forbidden { .. } => ErrorCode::Forbidden,
            MembershipError::Gateway(_) => ErrorCode::GatewayError,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::MemberNotFound(id) => format!("Member not found: {}", id),
            MembershipError::PlanNotFound(id) => format!("Plan not found: {}", id),
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::DuplicateTransaction(txn) => {
                format!("Transaction '{}' has already been recorded", txn)
            }
            MembershipError::DuplicateEmail(email) => {
                format!("A member with email '{}' already exists", email)
            }
            MembershipError::DuplicatePlanName(name) => {
                format!("A plan named '{}' already exists", name)
            }
            MembershipError::Conflict(msg) => format!("Concurrent update: {}", msg),
            MembershipError::SignatureMismatch => "Invalid signature".to_string(),
            MembershipError::Unauthenticated => "Authentication required".to_string(),
            MembershipError::Forbidden { reason } => reason.clone(),
            MembershipError::Gateway(msg) => format!("Payment gateway error: {}", msg),
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the operation may succeed when retried from a fresh read.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MembershipError::Conflict(_))
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::Negative { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        MembershipError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned();
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: detail("field").unwrap_or_else(|| "unknown".to_string()),
                message: err.message.clone(),
            },
            ErrorCode::MemberNotFound => match detail("member_id").and_then(|id| id.parse().ok()) {
                Some(id) => MembershipError::MemberNotFound(id),
                None => MembershipError::Infrastructure(err.to_string()),
            },
            ErrorCode::PlanNotFound => match detail("plan_id").and_then(|id| id.parse().ok()) {
                Some(id) => MembershipError::PlanNotFound(id),
                None => MembershipError::Infrastructure(err.to_string()),
            },
            ErrorCode::DuplicateTransaction => MembershipError::DuplicateTransaction(
                detail("transaction_id").unwrap_or_else(|| err.message.clone()),
            ),
            ErrorCode::DuplicateEmail => MembershipError::DuplicateEmail(
                detail("email").unwrap_or_else(|| err.message.clone()),
            ),
            ErrorCode::DuplicatePlanName => MembershipError::DuplicatePlanName(
                detail("name").unwrap_or_else(|| err.message.clone()),
            ),
            ErrorCode::ConcurrencyConflict | ErrorCode::DuplicateSubject => {
                MembershipError::Conflict(err.message.clone())
            }
            ErrorCode::SignatureMismatch => MembershipError::SignatureMismatch,
            ErrorCode::GatewayError => MembershipError::Gateway(err.message.clone()),
            ErrorCode::Unauthenticated => MembershipError::Unauthenticated,
            ErrorCode::Forbidden => MembershipError::forbidden(err.message.clone()),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                MembershipError::Infrastructure(err.to_string())
            }
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
