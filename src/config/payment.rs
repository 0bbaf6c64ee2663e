//! Payment gateway configuration

use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::gateway::{DEFAULT_GATEWAY_BASE_URL, MOCK_SIGNING_SECRET};

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API key id
    pub key_id: Option<String>,

    /// Gateway API key secret; also signs checkout confirmations
    pub key_secret: Option<Secret<String>>,

    /// Gateway API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency used when an order does not name one
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Gateway request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PaymentConfig {
    /// Both key id and secret are set.
    pub fn has_credentials(&self) -> bool {
        self.key_id.as_deref().is_some_and(|k| !k.trim().is_empty()) && self.key_secret.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Secret used to verify gateway signatures. Falls back to the mock
    /// gateway's secret when no credentials are configured, which
    /// `AppConfig::validate` refuses in production.
    pub fn signing_secret(&self) -> Secret<String> {
        self.key_secret
            .clone()
            .unwrap_or_else(|| Secret::new(MOCK_SIGNING_SECRET.to_string()))
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_id = self.key_id.as_deref().is_some_and(|k| !k.trim().is_empty());
        if has_id != self.key_secret.is_some() {
            return Err(ValidationError::IncompleteGatewayCredentials);
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            api_base_url: default_api_base_url(),
            currency: default_currency(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_GATEWAY_BASE_URL.to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_timeout() -> u64 {
    10
}
