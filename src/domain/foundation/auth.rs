//! Authentication types for the domain layer.
//!
//! These types describe a caller whose bearer token has been validated.
//! They carry no provider-specific data; any identity provider can populate
//! them through the `SessionValidator` port. The caller's role is not part of
//! the token: it is resolved separately from the operator directory.

use super::SubjectId;
use thiserror::Error;

/// Caller extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable subject identifier from the identity provider.
    pub subject: SubjectId,

    /// Email address from the token claims.
    pub email: String,

    /// Display name if the provider supplied one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(subject: SubjectId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            subject,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser::new(
            SubjectId::new("sub-123").unwrap(),
            "desk@example.com",
            display_name.map(String::from),
        )
    }

    #[test]
    fn display_name_or_email_prefers_name() {
        assert_eq!(user(Some("Alice")).display_name_or_email(), "Alice");
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        assert_eq!(user(None).display_name_or_email(), "desk@example.com");
    }

    #[test]
    fn expired_and_invalid_tokens_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
