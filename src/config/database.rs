//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration. Without a URL the service runs on the in-memory store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: Option<String>,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// The configured URL, if any non-blank one is set.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.url() {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_run_migrations() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert!(config.run_migrations);
        assert!(config.url().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_url_means_unconfigured() {
        let config = DatabaseConfig {
            url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.url().is_none());
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = DatabaseConfig {
            url: Some("mysql://localhost/test".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn test_validation_pool_size() {
        let config = DatabaseConfig {
            url: Some("postgresql://localhost/test".to_string()),
            max_connections: 150,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));
    }
}
