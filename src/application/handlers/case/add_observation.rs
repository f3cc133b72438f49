//! AddObservationHandler - appends a note to a case.

use serde_json::json;
use std::sync::Arc;

use super::persistence_error;
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::case::{CaseError, Observation};
use crate::domain::foundation::{CaseId, CommandMetadata};
use crate::ports::{Clock, ObservationRepository};

#[derive(Debug, Clone)]
pub struct AddObservationCommand {
    pub case_id: CaseId,
    pub content: String,
    pub internal: bool,
}

pub struct AddObservationHandler {
    repository: Arc<dyn ObservationRepository>,
    clock: Arc<dyn Clock>,
}

impl AddObservationHandler {
    pub fn new(repository: Arc<dyn ObservationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Observations may be added in any status, closed cases included.
    pub async fn handle(
        &self,
        cmd: AddObservationCommand,
        metadata: CommandMetadata,
    ) -> Result<Observation, CaseError> {
        let now = self.clock.now();
        let observation = Observation::new(
            cmd.case_id,
            metadata.actor.clone(),
            &cmd.content,
            cmd.internal,
            now,
        )?;

        let audit = AuditEntry::new(
            &metadata,
            AuditAction::Create,
            "Case",
            cmd.case_id,
            "Observation added",
            now,
        )
        .with_after(json!({
            "observation_id": observation.id().to_string(),
            "internal": observation.is_internal(),
        }));

        self.repository
            .add(&observation, &audit)
            .await
            .map_err(|e| persistence_error(cmd.case_id, e))?;

        tracing::debug!(case_id = %cmd.case_id, observation_id = %observation.id(), "Observation added");
        Ok(observation)
    }
}
