//! PostgreSQL implementation of CaseRepository.
//!
//! Case rows and their audit entries are written in one transaction.
//! Updates are compare-and-swap on `version`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{column, insert_audit_entry, row_to_case, CASE_COLUMNS};
use crate::domain::audit::AuditEntry;
use crate::domain::case::Case;
use crate::domain::foundation::{CaseId, DomainError, ErrorCode};
use crate::ports::CaseRepository;

/// PostgreSQL implementation of CaseRepository.
#[derive(Clone)]
pub struct PostgresCaseRepository {
    pool: PgPool,
}

impl PostgresCaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseRepository for PostgresCaseRepository {
    async fn insert(&self, case: &Case, audit: &AuditEntry) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let details = case.details();
        let query = format!(
            "INSERT INTO cases ({}) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28
            )",
            CASE_COLUMNS
        );
        let result = sqlx::query(&query)
            .bind(case.id().as_uuid())
            .bind(case.case_number().as_str())
            .bind(details.applicant.national_id.as_str())
            .bind(&details.applicant.full_name)
            .bind(details.applicant.phone.as_deref())
            .bind(&details.applicant.address)
            .bind(details.involved.national_id.as_ref().map(|id| id.as_str()))
            .bind(details.involved.full_name.as_deref())
            .bind(details.involved.phone.as_deref())
            .bind(details.involved.address.as_deref())
            .bind(details.conflict_kind.as_str())
            .bind(&details.description)
            .bind(details.residential_block.as_deref())
            .bind(case.assigned_official().as_str())
            .bind(case.registered_by().as_str())
            .bind(case.status().as_str())
            .bind(case.registered_at().as_datetime())
            .bind(case.standard_deadline().as_datetime())
            .bind(case.extension_requested())
            .bind(case.extension_justification())
            .bind(case.extension_requested_at().map(|t| *t.as_datetime()))
            .bind(case.extended_deadline().map(|t| *t.as_datetime()))
            .bind(case.resolution().map(|r| r.method().as_str()))
            .bind(case.resolution().map(|r| r.notes()))
            .bind(case.resolved_at().map(|t| *t.as_datetime()))
            .bind(case.closed_at().map(|t| *t.as_datetime()))
            .bind(i64::from(case.version()))
            .bind(case.updated_at().as_datetime())
            .execute(&mut *tx)
            .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::new(
                    ErrorCode::CaseNumberTaken,
                    format!("Case number already in use: {}", case.case_number()),
                ));
            }
            Err(e) => return Err(DomainError::database("Failed to insert case", e)),
        }

        insert_audit_entry(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn update(
        &self,
        case: &Case,
        expected_version: u32,
        audit: &AuditEntry,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE cases SET
                status = $3,
                extension_requested = $4,
                extension_justification = $5,
                extension_requested_at = $6,
                extended_deadline = $7,
                resolution_method = $8,
                resolution_notes = $9,
                resolved_at = $10,
                closed_at = $11,
                version = $12,
                updated_at = $13
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(case.id().as_uuid())
        .bind(i64::from(expected_version))
        .bind(case.status().as_str())
        .bind(case.extension_requested())
        .bind(case.extension_justification())
        .bind(case.extension_requested_at().map(|t| *t.as_datetime()))
        .bind(case.extended_deadline().map(|t| *t.as_datetime()))
        .bind(case.resolution().map(|r| r.method().as_str()))
        .bind(case.resolution().map(|r| r.notes()))
        .bind(case.resolved_at().map(|t| *t.as_datetime()))
        .bind(case.closed_at().map(|t| *t.as_datetime()))
        .bind(i64::from(case.version()))
        .bind(case.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update case", e))?;

        if result.rows_affected() == 0 {
            let current: Option<i64> = sqlx::query_scalar("SELECT version FROM cases WHERE id = $1")
                .bind(case.id().as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to read case version", e))?;

            return Err(match current {
                None => DomainError::new(
                    ErrorCode::CaseNotFound,
                    format!("Case not found: {}", case.id()),
                ),
                Some(version) => DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    format!(
                        "Case {} is at version {}, expected {}",
                        case.case_number(),
                        version,
                        expected_version
                    ),
                ),
            });
        }

        insert_audit_entry(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CaseId) -> Result<Option<Case>, DomainError> {
        let query = format!("SELECT {} FROM cases WHERE id = $1", CASE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch case", e))?;

        row.as_ref().map(row_to_case).transpose()
    }

    async fn case_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT case_number FROM cases WHERE LEFT(case_number, CHAR_LENGTH($1)) = $1",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list case numbers", e))?;

        rows.iter().map(|row| column(row, "case_number")).collect()
    }
}
