//! API error type and JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::membership::MembershipError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub MembershipError);

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MembershipError::MemberNotFound(_) | MembershipError::PlanNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            MembershipError::ValidationFailed { .. } | MembershipError::SignatureMismatch => {
                StatusCode::BAD_REQUEST
            }
            MembershipError::DuplicateTransaction(_)
            | MembershipError::DuplicateEmail(_)
            | MembershipError::DuplicatePlanName(_)
            | MembershipError::Conflict(_) => StatusCode::CONFLICT,
            MembershipError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MembershipError::Forbidden { .. } => StatusCode::FORBIDDEN,
            MembershipError::Gateway(_) => StatusCode::BAD_GATEWAY,
            MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            MembershipError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.message(),
        };
        let body = ErrorResponse::new(message, self.0.code().to_string());
        (status, Json(body)).into_response()
    }
}
