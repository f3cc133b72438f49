//! GetCaseHandler - Query handler for the case detail view.

use serde::Serialize;
use std::sync::Arc;

use super::load_case;
use crate::domain::audit::AuditEntry;
use crate::domain::case::{Case, CaseError, Observation, UrgencyLevel};
use crate::domain::foundation::{CaseId, Percentage};
use crate::ports::{CaseReader, CaseRepository, Clock, SettingsProvider};

/// Query for a single case.
#[derive(Debug, Clone)]
pub struct GetCaseQuery {
    pub case_id: CaseId,
    pub include_internal_observations: bool,
}

/// A case with its derived values at the time of the query.
#[derive(Debug, Clone, Serialize)]
pub struct CaseView {
    pub case: Case,
    pub urgency: UrgencyLevel,
    pub progress: Percentage,
    pub days_remaining: i64,
    pub can_request_extension: bool,
    pub observations: Vec<Observation>,
    pub audit_trail: Vec<AuditEntry>,
}

pub struct GetCaseHandler {
    repository: Arc<dyn CaseRepository>,
    reader: Arc<dyn CaseReader>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl GetCaseHandler {
    pub fn new(
        repository: Arc<dyn CaseRepository>,
        reader: Arc<dyn CaseReader>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            reader,
            settings,
            clock,
        }
    }

    pub async fn handle(&self, query: GetCaseQuery) -> Result<CaseView, CaseError> {
        let case = load_case(self.repository.as_ref(), &query.case_id).await?;
        let settings = self.settings.current().await?;
        let now = self.clock.now();

        let observations = self
            .reader
            .observations(&query.case_id, query.include_internal_observations)
            .await?;
        let audit_trail = self.reader.audit_trail(&query.case_id).await?;

        Ok(CaseView {
            urgency: case.urgency(&now, &settings),
            progress: case.progress(&now, &settings)?,
            days_remaining: case.days_remaining(&now),
            can_request_extension: case.can_request_extension(),
            case,
            observations,
            audit_trail,
        })
    }
}
