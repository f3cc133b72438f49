//! Settings provider port.
//!
//! Settings are read fresh for every computation; administrators may change
//! them at any time.

use async_trait::async_trait;

use crate::domain::case::CaseSettings;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// The settings currently in force.
    async fn current(&self) -> Result<CaseSettings, DomainError>;

    /// Replace the settings. Callers validate before calling.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn update(&self, settings: &CaseSettings) -> Result<(), DomainError>;
}
