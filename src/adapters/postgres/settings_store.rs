//! PostgreSQL implementation of SettingsProvider.
//!
//! Settings live in a singleton row (`id = 1`). The first read creates it
//! from the seed values supplied at startup.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::column;
use crate::domain::case::CaseSettings;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SettingsProvider;

#[derive(Clone)]
pub struct PostgresSettingsStore {
    pool: PgPool,
    seed: CaseSettings,
}

impl PostgresSettingsStore {
    /// `seed` is written only if no settings row exists yet.
    pub fn new(pool: PgPool, seed: CaseSettings) -> Self {
        Self { pool, seed }
    }
}

fn attachment_limit(settings: &CaseSettings) -> Result<i64, DomainError> {
    i64::try_from(settings.max_attachment_bytes).map_err(|_| {
        DomainError::new(
            ErrorCode::ConfigurationInvalid,
            format!("Attachment limit too large: {}", settings.max_attachment_bytes),
        )
    })
}

#[async_trait]
impl SettingsProvider for PostgresSettingsStore {
    async fn current(&self) -> Result<CaseSettings, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO case_settings (
                id, standard_days, extension_days, urgent_threshold_days,
                max_attachment_bytes, allowed_extensions
            ) VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(self.seed.standard_days)
        .bind(self.seed.extension_days)
        .bind(self.seed.urgent_threshold_days)
        .bind(attachment_limit(&self.seed)?)
        .bind(self.seed.allowed_extensions.join(","))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to seed settings", e))?;

        let row = sqlx::query(
            r#"
            SELECT standard_days, extension_days, urgent_threshold_days,
                   max_attachment_bytes, allowed_extensions
            FROM case_settings WHERE id = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to read settings", e))?;

        let max_bytes: i64 = column(&row, "max_attachment_bytes")?;
        Ok(CaseSettings {
            standard_days: column(&row, "standard_days")?,
            extension_days: column(&row, "extension_days")?,
            urgent_threshold_days: column(&row, "urgent_threshold_days")?,
            max_attachment_bytes: u64::try_from(max_bytes).map_err(|_| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored attachment limit is negative: {}", max_bytes),
                )
            })?,
            allowed_extensions: CaseSettings::parse_extensions(&column::<String>(
                &row,
                "allowed_extensions",
            )?),
        })
    }

    async fn update(&self, settings: &CaseSettings) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO case_settings (
                id, standard_days, extension_days, urgent_threshold_days,
                max_attachment_bytes, allowed_extensions, updated_at
            ) VALUES (1, $1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE SET
                standard_days = EXCLUDED.standard_days,
                extension_days = EXCLUDED.extension_days,
                urgent_threshold_days = EXCLUDED.urgent_threshold_days,
                max_attachment_bytes = EXCLUDED.max_attachment_bytes,
                allowed_extensions = EXCLUDED.allowed_extensions,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(settings.standard_days)
        .bind(settings.extension_days)
        .bind(settings.urgent_threshold_days)
        .bind(attachment_limit(settings)?)
        .bind(settings.allowed_extensions.join(","))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update settings", e))?;

        Ok(())
    }
}
