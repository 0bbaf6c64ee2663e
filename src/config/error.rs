//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("JWT secret must be at least {0} characters")]
    WeakJwtSecret(usize),

    #[error("Gateway key id and key secret must be set together")]
    IncompleteGatewayCredentials,

    #[error("Production requires gateway credentials")]
    GatewayCredentialsRequired,

    #[error("Invalid gateway base URL")]
    InvalidGatewayUrl,

    #[error("Currency must be a three-letter code")]
    InvalidCurrency,

    #[error("Reconciler interval must be at least one second")]
    InvalidReconcileInterval,
}
