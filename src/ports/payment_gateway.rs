//! Payment gateway port.
//!
//! The gateway's hosted checkout is opaque to us. We ask it for an order,
//! hand the order id to the client, and later receive `(order id, payment
//! id, signature)` back for verification.

use crate::domain::foundation::{DomainError, ErrorCode, Money};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout order for `request.amount`.
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError>;
}

/// Request to open a gateway order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: Money,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Our reference for the order.
    pub receipt: String,
}

/// Order as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount: Money,
    pub currency: String,
    pub receipt: String,
}

/// Gateway failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// Could not reach the gateway.
    NetworkError,
    /// Credentials were rejected.
    AuthenticationError,
    /// The gateway refused the request.
    Rejected,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationError, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Rejected, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.code == GatewayErrorCode::NetworkError
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::GatewayError, err.to_string())
    }
}
