//! PostgreSQL implementation of CaseReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{
    row_to_audit_entry, row_to_case, row_to_observation, AUDIT_COLUMNS, CASE_COLUMNS,
    OBSERVATION_COLUMNS,
};
use crate::domain::audit::AuditEntry;
use crate::domain::case::{Case, Observation};
use crate::domain::foundation::{CaseId, DomainError};
use crate::ports::{CaseListFilter, CaseReader};

/// Read-optimized case queries.
#[derive(Clone)]
pub struct PostgresCaseReader {
    pool: PgPool,
}

impl PostgresCaseReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseReader for PostgresCaseReader {
    async fn list_cases(&self, filter: &CaseListFilter) -> Result<Vec<Case>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM cases
            WHERE ($1::TEXT IS NULL OR assigned_official = $1)
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR conflict_kind = $3)
              AND ($4::TEXT IS NULL OR residential_block = $4)
              AND ($5::TEXT IS NULL
                   OR case_number ILIKE $5
                   OR applicant_name ILIKE $5
                   OR applicant_national_id ILIKE $5
                   OR involved_name ILIKE $5)
            ORDER BY registered_at DESC
            "#,
            CASE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(filter.assigned_official.as_ref().map(|id| id.as_str()))
            .bind(filter.status.map(|status| status.as_str()))
            .bind(filter.conflict_kind.map(|kind| kind.as_str()))
            .bind(filter.residential_block.as_deref())
            .bind(filter.search_pattern())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list cases", e))?;

        rows.iter().map(row_to_case).collect()
    }

    async fn audit_trail(&self, case_id: &CaseId) -> Result<Vec<AuditEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM audit_log WHERE entity = 'Case' AND entity_id = $1 ORDER BY recorded_at ASC",
            AUDIT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(case_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch audit trail", e))?;

        rows.iter().map(row_to_audit_entry).collect()
    }

    async fn observations(
        &self,
        case_id: &CaseId,
        include_internal: bool,
    ) -> Result<Vec<Observation>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM case_observations
            WHERE case_id = $1 AND ($2 OR NOT internal)
            ORDER BY created_at ASC
            "#,
            OBSERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(case_id.as_uuid())
            .bind(include_internal)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch observations", e))?;

        rows.iter().map(row_to_observation).collect()
    }
}
