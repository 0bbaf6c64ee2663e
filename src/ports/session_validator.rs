//! Session validation port for bearer tokens.
//!
//! Provider-agnostic: the JWT adapter and the mock adapter both implement it.
//!
//! All implementations MUST validate:
//! - **Signature**: token was issued with our key
//! - **Expiry (exp)**: token is not expired
//! - **Issuer/Audience**: when configured

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts caller identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
