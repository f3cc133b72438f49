//! PostgreSQL implementation of ObservationRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::insert_audit_entry;
use crate::domain::audit::AuditEntry;
use crate::domain::case::Observation;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ObservationRepository;

#[derive(Clone)]
pub struct PostgresObservationRepository {
    pool: PgPool,
}

impl PostgresObservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationRepository for PostgresObservationRepository {
    async fn add(&self, observation: &Observation, audit: &AuditEntry) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO case_observations (id, case_id, author, content, internal, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(observation.id().as_uuid())
        .bind(observation.case_id().as_uuid())
        .bind(observation.author().as_str())
        .bind(observation.content())
        .bind(observation.is_internal())
        .bind(observation.created_at().as_datetime())
        .execute(&mut *tx)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                return Err(DomainError::new(
                    ErrorCode::CaseNotFound,
                    format!("Case not found: {}", observation.case_id()),
                ));
            }
            Err(e) => return Err(DomainError::database("Failed to insert observation", e)),
        }

        insert_audit_entry(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }
}
