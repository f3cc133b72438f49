//! TransitionCaseHandler - closes a case as resolved, unresolved or archived.

use serde_json::json;
use std::sync::Arc;

use super::{load_case, persistence_error};
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::case::{Case, CaseError, CaseStatus, Resolution};
use crate::domain::foundation::{CaseId, CommandMetadata};
use crate::ports::{CaseRepository, Clock};

/// Command to move a case to a terminal status.
#[derive(Debug, Clone)]
pub struct TransitionCaseCommand {
    pub case_id: CaseId,
    pub target: CaseStatus,
    pub resolution: Option<Resolution>,
}

pub struct TransitionCaseHandler {
    repository: Arc<dyn CaseRepository>,
    clock: Arc<dyn Clock>,
}

impl TransitionCaseHandler {
    pub fn new(repository: Arc<dyn CaseRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// # Errors
    ///
    /// - `NotFound` if the case does not exist
    /// - `Transition` for an illegal edge or missing resolution
    /// - `ConcurrencyConflict` if the case changed since it was read
    pub async fn handle(
        &self,
        cmd: TransitionCaseCommand,
        metadata: CommandMetadata,
    ) -> Result<Case, CaseError> {
        let case = load_case(self.repository.as_ref(), &cmd.case_id).await?;
        let now = self.clock.now();

        let next = case.transition(cmd.target, cmd.resolution, now)?;

        let audit = AuditEntry::new(
            &metadata,
            AuditAction::Edit,
            "Case",
            next.id(),
            format!("Case {} moved to {}", next.case_number(), next.status()),
            now,
        )
        .with_before(json!({ "status": case.status().as_str() }))
        .with_after(json!({
            "status": next.status().as_str(),
            "resolution_method": next.resolution().map(|r| r.method().as_str()),
        }));

        self.repository
            .update(&next, case.version(), &audit)
            .await
            .map_err(|e| persistence_error(cmd.case_id, e))?;

        tracing::info!(
            case_id = %next.id(),
            case_number = %next.case_number(),
            from = %case.status(),
            to = %next.status(),
            "Case status changed"
        );
        Ok(next)
    }
}
