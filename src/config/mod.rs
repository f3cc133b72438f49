//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `COMMUNITY_CASES` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use community_cases::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod case_numbers;
mod database;
mod deadlines;
mod error;
mod logging;

pub use case_numbers::CaseNumberConfig;
pub use database::{DatabaseConfig, MAX_POOL_SIZE};
pub use deadlines::{seed_settings, AttachmentConfig, DeadlineConfig};
pub use error::{ConfigError, ValidationError};
pub use logging::{Environment, LoggingConfig, DEFAULT_LOG_FILTER};

use serde::Deserialize;

use crate::domain::case::CaseSettings;

/// Root application configuration
///
/// Every section has defaults except `database`; without it the binary runs
/// against the in-memory adapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Seed deadline tunables
    #[serde(default)]
    pub deadlines: DeadlineConfig,

    /// Seed attachment policy
    #[serde(default)]
    pub attachments: AttachmentConfig,

    /// Case number prefix and retry bound
    #[serde(default)]
    pub case_numbers: CaseNumberConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COMMUNITY_CASES` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `COMMUNITY_CASES__DATABASE__URL=...` -> `database.url = ...`
    /// - `COMMUNITY_CASES__DEADLINES__STANDARD_DAYS=15` -> `deadlines.standard_days = 15`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMMUNITY_CASES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.case_numbers.validate()?;
        self.logging.validate()?;
        self.initial_settings()?;
        Ok(())
    }

    /// Settings used to seed an empty settings store.
    pub fn initial_settings(&self) -> Result<CaseSettings, ValidationError> {
        seed_settings(&self.deadlines, &self.attachments)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.logging.environment == Environment::Production
    }
}
