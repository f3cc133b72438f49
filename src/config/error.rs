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

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Database pool_size must be at least 1")]
    InvalidPoolSize,

    #[error("Database pool_size {0} exceeds the maximum of {}", super::database::MAX_POOL_SIZE)]
    PoolSizeTooLarge(u32),

    #[error("Database connect_timeout_secs must be at least 1")]
    InvalidConnectTimeout,

    #[error("Invalid case settings: {0}")]
    InvalidCaseSettings(#[from] crate::domain::case::ConfigurationError),

    #[error("Case number prefix must be non-empty ASCII letters, got '{0}'")]
    InvalidCaseNumberPrefix(String),

    #[error("Case number max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
