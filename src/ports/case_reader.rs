//! Case reader port (read side).
//!
//! Queries backing the caseload summary and case detail views.

use async_trait::async_trait;

use crate::domain::audit::AuditEntry;
use crate::domain::case::{Case, CaseStatus, ConflictKind, Observation};
use crate::domain::foundation::{CaseId, DomainError, UserId};

/// Filter for case listings. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseListFilter {
    /// Only cases assigned to this official.
    pub assigned_official: Option<UserId>,

    /// Only cases in this status.
    pub status: Option<CaseStatus>,

    /// Only cases of this conflict kind.
    pub conflict_kind: Option<ConflictKind>,

    /// Only cases from this residential block (exact match).
    pub residential_block: Option<String>,

    /// Case-insensitive text matched against the case number, the
    /// applicant's name and national id, and the involved party's name.
    pub search: Option<String>,
}

impl CaseListFilter {
    pub fn for_official(official: UserId) -> Self {
        Self {
            assigned_official: Some(official),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_conflict_kind(mut self, kind: ConflictKind) -> Self {
        self.conflict_kind = Some(kind);
        self
    }

    pub fn in_block(mut self, block: impl Into<String>) -> Self {
        self.residential_block = Some(block.into());
        self
    }

    /// Blank text clears the search.
    pub fn searching(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn matches(&self, case: &Case) -> bool {
        let details = case.details();
        self.assigned_official
            .as_ref()
            .map_or(true, |official| case.is_assigned_to(official))
            && self.status.map_or(true, |status| case.status() == status)
            && self
                .conflict_kind
                .map_or(true, |kind| details.conflict_kind == kind)
            && self
                .residential_block
                .as_ref()
                .map_or(true, |block| details.residential_block.as_ref() == Some(block))
            && self.search.as_ref().map_or(true, |text| matches_search(case, text))
    }

    /// `ILIKE` pattern for the search text, with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|text| {
            let escaped = text
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }
}

fn matches_search(case: &Case, text: &str) -> bool {
    let needle = text.to_lowercase();
    let details = case.details();
    [
        Some(case.case_number().as_str()),
        Some(details.applicant.full_name.as_str()),
        Some(details.applicant.national_id.as_str()),
        details.involved.full_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Read-only access to cases and their history.
#[async_trait]
pub trait CaseReader: Send + Sync {
    /// Cases matching the filter, newest registration first.
    async fn list_cases(&self, filter: &CaseListFilter) -> Result<Vec<Case>, DomainError>;

    /// Audit entries for a case, oldest first.
    async fn audit_trail(&self, case_id: &CaseId) -> Result<Vec<AuditEntry>, DomainError>;

    /// Observations on a case, oldest first. Internal notes only when asked.
    async fn observations(
        &self,
        case_id: &CaseId,
        include_internal: bool,
    ) -> Result<Vec<Observation>, DomainError>;
}
