//! Mock session validator for testing.
//!
//! Accepts a fixed set of tokens, so HTTP tests do not need signed JWTs.
//!
//! # Example
//!
//! ```ignore
//! use memberdesk::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("admin-token", "owner");
//! let user = validator.validate("admin-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SubjectId};
use crate::ports::SessionValidator;

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        if let Ok(tokens) = self.tokens.get_mut() {
            tokens.insert(token.into(), user);
        }
        self
    }

    /// Adds a token for `{name}@test.example.com` with subject `sub-{name}`.
    pub fn with_test_user(self, token: impl Into<String>, name: &str) -> Self {
        match SubjectId::new(format!("sub-{}", name)) {
            Ok(subject) => {
                let user = AuthenticatedUser::new(subject, format!("{}@test.example.com", name), None);
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        if let Ok(slot) = self.force_error.get_mut() {
            *slot = Some(error);
        }
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let forced = self
            .force_error
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .clone();
        if let Some(error) = forced {
            return Err(error);
        }

        self.tokens
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
