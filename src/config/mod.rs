//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Variables carry the `MEMBERDESK_`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use memberdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod reconciler;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use reconciler::ReconcilerConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults except `auth.jwt_secret`, which validation requires.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; no URL means in-memory storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bearer token validation and admin provisioning
    #[serde(default)]
    pub auth: AuthConfig,

    /// Payment gateway credentials
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Expiry reconciler schedule
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `MEMBERDESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBERDESK_SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MEMBERDESK_DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("MEMBERDESK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.payment.validate()?;
        self.reconciler.validate()?;
        // Without credentials signatures are checked against the mock secret.
        if self.is_production() && !self.payment.has_credentials() {
            return Err(ValidationError::GatewayCredentialsRequired);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MEMBERDESK_AUTH__JWT_SECRET",
        "MEMBERDESK_AUTH__ADMIN_EMAILS",
        "MEMBERDESK_SERVER__PORT",
        "MEMBERDESK_SERVER__LOG_FORMAT",
        "MEMBERDESK_SERVER__ENVIRONMENT",
        "MEMBERDESK_PAYMENT__KEY_ID",
        "MEMBERDESK_PAYMENT__KEY_SECRET",
        "MEMBERDESK_DATABASE__URL",
        "MEMBERDESK_RECONCILER__INTERVAL_SECS",
        "MEMBERDESK_RECONCILER__RUN_ON_STARTUP",
    ];

    fn set_minimal_env() {
        env::set_var("MEMBERDESK_AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert!(config.database.url().is_none());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.reconciler.interval_secs, 3600);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEMBERDESK_SERVER__PORT", "3000");
        env::set_var("MEMBERDESK_SERVER__LOG_FORMAT", "json");
        env::set_var("MEMBERDESK_DATABASE__URL", "postgresql://desk@localhost/memberdesk");
        env::set_var("MEMBERDESK_AUTH__ADMIN_EMAILS", "owner@example.com");
        env::set_var("MEMBERDESK_RECONCILER__INTERVAL_SECS", "60");
        env::set_var("MEMBERDESK_RECONCILER__RUN_ON_STARTUP", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.database.url(), Some("postgresql://desk@localhost/memberdesk"));
        assert_eq!(config.auth.admin_emails_list(), vec!["owner@example.com"]);
        assert_eq!(config.reconciler.interval_secs, 60);
        assert!(!config.reconciler.run_on_startup);
    }

    #[test]
    fn test_missing_jwt_secret_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_production_requires_gateway_credentials() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEMBERDESK_SERVER__ENVIRONMENT", "production");
        let without = AppConfig::load();
        env::set_var("MEMBERDESK_PAYMENT__KEY_ID", "rzp_live_123");
        env::set_var("MEMBERDESK_PAYMENT__KEY_SECRET", "live_secret");
        let with = AppConfig::load();
        clear_env();

        assert_eq!(
            without.unwrap().validate(),
            Err(ValidationError::GatewayCredentialsRequired)
        );
        assert!(with.unwrap().validate().is_ok());
    }
}
