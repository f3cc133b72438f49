//! RequestExtensionHandler - grants the one-time deadline extension.

use serde_json::json;
use std::sync::Arc;

use super::{load_case, persistence_error};
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::case::{Case, CaseError};
use crate::domain::foundation::{CaseId, CommandMetadata};
use crate::ports::{CaseRepository, Clock, SettingsProvider};

/// Command to extend a case's deadline.
#[derive(Debug, Clone)]
pub struct RequestExtensionCommand {
    pub case_id: CaseId,
    pub justification: String,
}

pub struct RequestExtensionHandler {
    repository: Arc<dyn CaseRepository>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl RequestExtensionHandler {
    pub fn new(
        repository: Arc<dyn CaseRepository>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            settings,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the case does not exist
    /// - `Extension` if the policy refuses the request
    /// - `ConcurrencyConflict` if the case changed since it was read
    pub async fn handle(
        &self,
        cmd: RequestExtensionCommand,
        metadata: CommandMetadata,
    ) -> Result<Case, CaseError> {
        let case = load_case(self.repository.as_ref(), &cmd.case_id).await?;
        let settings = self.settings.current().await?;
        let now = self.clock.now();

        let extended = case.request_extension(&cmd.justification, &settings, now)?;

        let audit = AuditEntry::new(
            &metadata,
            AuditAction::Edit,
            "Case",
            extended.id(),
            format!("Extension requested for case {}", extended.case_number()),
            now,
        )
        .with_before(json!({ "extension_requested": false }))
        .with_after(json!({
            "extension_requested": true,
            "justification": extended.extension_justification(),
            "extended_deadline": extended.extended_deadline().map(|t| *t.as_datetime()),
        }));

        self.repository
            .update(&extended, case.version(), &audit)
            .await
            .map_err(|e| persistence_error(cmd.case_id, e))?;

        tracing::info!(
            case_id = %extended.id(),
            case_number = %extended.case_number(),
            correlation_id = %metadata.correlation_id(),
            "Deadline extension granted"
        );
        Ok(extended)
    }
}
