//! UpdateSettingsHandler - administrator changes to the deadline tunables.
//!
//! Existing cases keep their frozen standard deadlines; urgency and progress
//! pick up the new values on the next read.

use std::sync::Arc;

use crate::domain::case::{CaseError, CaseSettings};
use crate::domain::foundation::CommandMetadata;
use crate::ports::SettingsProvider;

pub struct UpdateSettingsHandler {
    settings: Arc<dyn SettingsProvider>,
}

impl UpdateSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }

    /// # Errors
    ///
    /// - `Configuration` if the new settings are invalid (nothing is stored)
    pub async fn handle(
        &self,
        new_settings: CaseSettings,
        metadata: CommandMetadata,
    ) -> Result<CaseSettings, CaseError> {
        new_settings.validate()?;

        let previous = self.settings.current().await?;
        self.settings.update(&new_settings).await?;

        tracing::info!(
            actor = %metadata.actor,
            correlation_id = %metadata.correlation_id(),
            standard_days = new_settings.standard_days,
            extension_days = new_settings.extension_days,
            urgent_threshold_days = new_settings.urgent_threshold_days,
            previous_standard_days = previous.standard_days,
            previous_extension_days = previous.extension_days,
            previous_urgent_threshold_days = previous.urgent_threshold_days,
            "Case settings updated"
        );
        Ok(new_settings)
    }
}
