//! PostgreSQL storage section.
//!
//! The whole section is optional. When `database.url` is absent the engine
//! runs against the in-memory adapters.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool the report job may open.
pub const MAX_POOL_SIZE: u32 = 16;

/// Connection settings for the case database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL.
    pub url: String,

    /// Upper bound on open connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds to wait for a connection before failing.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Apply `migrations/` before the first query.
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
            run_migrations: false,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Opens the pool. Connections are created lazily up to `pool_size`.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.pool_size)
            .acquire_timeout(self.connect_timeout())
            .connect(&self.url)
            .await
    }

    /// The URL with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _password)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }

    /// # Errors
    ///
    /// - `MissingRequired` for a blank URL
    /// - `InvalidDatabaseUrl` for a non-PostgreSQL scheme
    /// - `InvalidPoolSize` / `PoolSizeTooLarge` outside `1..=MAX_POOL_SIZE`
    /// - `InvalidConnectTimeout` for a zero timeout
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("COMMUNITY_CASES__DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.pool_size == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.pool_size > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge(self.pool_size));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidConnectTimeout);
        }
        Ok(())
    }
}

fn default_pool_size() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    10
}
