//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_JWT_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: Option<Secret<String>>,

    /// Expected `iss` claim, checked when set
    pub issuer: Option<String>,

    /// Expected `aud` claim, checked when set
    pub audience: Option<String>,

    /// Emails provisioned as admin on first sync (comma-separated)
    pub admin_emails: Option<String>,
}

impl AuthConfig {
    /// Admin emails, trimmed and lower-cased.
    pub fn admin_emails_list(&self) -> Vec<String> {
        self.admin_emails
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self
            .jwt_secret
            .as_ref()
            .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
        if secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret(MIN_JWT_SECRET_LEN));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: None,
            audience: None,
            admin_emails: None,
        }
    }
}
