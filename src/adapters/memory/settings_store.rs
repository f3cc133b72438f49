//! In-memory settings store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::case::CaseSettings;
use crate::domain::foundation::DomainError;
use crate::ports::SettingsProvider;

#[derive(Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<CaseSettings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: CaseSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettingsStore {
    async fn current(&self) -> Result<CaseSettings, DomainError> {
        Ok(self.settings.read().await.clone())
    }

    async fn update(&self, settings: &CaseSettings) -> Result<(), DomainError> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}
