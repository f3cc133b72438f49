//! CreateCaseHandler - Command handler for registering new cases.
//!
//! Number generation and insert run under one lock per handler, so share a
//! single handler (behind an `Arc`) across concurrent callers. Writers in
//! other processes are caught by the unique constraint and retried.

use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{CaseNumberGenerator, CaseNumberPolicy};
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::case::{Case, CaseDetails, CaseError};
use crate::domain::foundation::{CaseId, CommandMetadata, ErrorCode, UserId};
use crate::ports::{CaseRepository, Clock, SettingsProvider};

/// Command to register a new case.
#[derive(Debug, Clone)]
pub struct RegisterCaseCommand {
    pub details: CaseDetails,
    pub assigned_official: UserId,
}

/// Handler for registering cases.
pub struct CreateCaseHandler {
    repository: Arc<dyn CaseRepository>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
    generator: CaseNumberGenerator,
    max_attempts: u32,
    creation_lock: Mutex<()>,
}

impl CreateCaseHandler {
    pub fn new(
        repository: Arc<dyn CaseRepository>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
        policy: CaseNumberPolicy,
    ) -> Self {
        Self {
            generator: CaseNumberGenerator::new(repository.clone(), policy.prefix),
            repository,
            settings,
            clock,
            max_attempts: policy.max_attempts.max(1),
            creation_lock: Mutex::new(()),
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterCaseCommand,
        metadata: CommandMetadata,
    ) -> Result<Case, CaseError> {
        let _guard = self.creation_lock.lock().await;

        // Deadline days are frozen from the settings in force right now.
        let settings = self.settings.current().await?;
        let now = self.clock.now();

        for attempt in 1..=self.max_attempts {
            let case_number = self.generator.generate_case_number(&now).await?;
            let case = Case::register(
                CaseId::new(),
                case_number,
                cmd.details.clone(),
                cmd.assigned_official.clone(),
                metadata.actor.clone(),
                &settings,
                now,
            )?;

            let audit = AuditEntry::new(
                &metadata,
                AuditAction::Create,
                "Case",
                case.id(),
                format!("Case {} registered", case.case_number()),
                now,
            )
            .with_after(json!({
                "case_number": case.case_number().as_str(),
                "status": case.status().as_str(),
                "standard_deadline": case.standard_deadline().as_datetime(),
                "assigned_official": case.assigned_official().as_str(),
            }));

            match self.repository.insert(&case, &audit).await {
                Ok(()) => {
                    tracing::info!(
                        case_id = %case.id(),
                        case_number = %case.case_number(),
                        correlation_id = %metadata.correlation_id(),
                        "Case registered"
                    );
                    return Ok(case);
                }
                Err(err) if err.code == ErrorCode::CaseNumberTaken => {
                    tracing::warn!(
                        case_number = %case.case_number(),
                        attempt,
                        max_attempts = self.max_attempts,
                        "Case number taken by a concurrent writer, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        let bucket = self.generator.bucket(&now).to_string();
        tracing::error!(
            bucket = %bucket,
            attempts = self.max_attempts,
            "Could not mint a unique case number"
        );
        Err(CaseError::IdentifierExhausted {
            bucket,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryCaseStore, InMemorySettingsStore};
    use crate::domain::case::{
        Applicant, CaseSettings, CaseStatus, ConfigurationError, ConflictKind, InvolvedParty,
        NationalId,
    };
    use crate::domain::foundation::{DomainError, Timestamp};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex as StdMutex;

    fn jan_15() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    }

    fn clerk() -> CommandMetadata {
        CommandMetadata::new(UserId::new("clerk-1").unwrap()).with_ip_address("10.0.0.7")
    }

    fn command() -> RegisterCaseCommand {
        let applicant = Applicant::new(
            NationalId::new("1712345678").unwrap(),
            "Maria Quishpe",
            None,
            "Barrio La Floresta",
        )
        .unwrap();
        RegisterCaseCommand {
            details: CaseDetails::new(
                applicant,
                InvolvedParty::default(),
                ConflictKind::Neighborhood,
                "Noise complaint against the corner workshop",
                None,
            )
            .unwrap(),
            assigned_official: UserId::new("judge-1").unwrap(),
        }
    }

    fn handler_with(store: Arc<InMemoryCaseStore>, settings: CaseSettings) -> CreateCaseHandler {
        CreateCaseHandler::new(
            store,
            Arc::new(InMemorySettingsStore::new(settings)),
            Arc::new(FixedClock::new(jan_15())),
            CaseNumberPolicy::default(),
        )
    }

    #[tokio::test]
    async fn registers_case_with_number_deadline_and_audit() {
        let store = Arc::new(InMemoryCaseStore::new());
        let handler = handler_with(store.clone(), CaseSettings::default());

        let case = handler.handle(command(), clerk()).await.unwrap();

        assert_eq!(case.case_number().as_str(), "JC-2024-01-0001");
        assert_eq!(case.status(), CaseStatus::InProgress);
        assert_eq!(case.standard_deadline(), &jan_15().add_days(15));
        assert_eq!(case.registered_by().as_str(), "clerk-1");

        let audit = store.audit_entries().await;
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::Create);
        assert_eq!(audit[0].entity_id, case.id().to_string());
        assert_eq!(audit[0].ip_address.as_deref(), Some("10.0.0.7"));
    }

    #[tokio::test]
    async fn consecutive_registrations_get_consecutive_numbers() {
        let handler = handler_with(Arc::new(InMemoryCaseStore::new()), CaseSettings::default());
        let first = handler.handle(command(), clerk()).await.unwrap();
        let second = handler.handle(command(), clerk()).await.unwrap();
        assert_eq!(first.case_number().sequence() + 1, second.case_number().sequence());
    }

    #[tokio::test]
    async fn deadline_uses_settings_in_force_at_creation() {
        let handler = handler_with(
            Arc::new(InMemoryCaseStore::new()),
            CaseSettings::default().with_days(20, 15, 10),
        );
        let case = handler.handle(command(), clerk()).await.unwrap();
        assert_eq!(case.standard_deadline(), &jan_15().add_days(20));
    }

    #[tokio::test]
    async fn invalid_settings_fail_without_persisting() {
        let store = Arc::new(InMemoryCaseStore::new());
        let handler = handler_with(store.clone(), CaseSettings::default().with_days(0, 15, 10));

        let err = handler.handle(command(), clerk()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationInvalid);
        assert_eq!(store.case_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_standard_days_is_a_configuration_error() {
        let store = Arc::new(InMemoryCaseStore::new());
        let handler = handler_with(
            store.clone(),
            CaseSettings::default().with_days(1_000_000_000, 15, 10),
        );

        let err = handler.handle(command(), clerk()).await.unwrap_err();
        assert_eq!(
            err,
            CaseError::Configuration(ConfigurationError::TooLarge {
                field: "standard_days",
                value: 1_000_000_000
            })
        );
        assert_eq!(store.case_count().await, 0);
        assert!(store.audit_entries().await.is_empty());
    }

    #[tokio::test]
    async fn audit_failure_fails_the_registration() {
        let store = Arc::new(InMemoryCaseStore::new());
        store.fail_audit_writes(true).await;
        let handler = handler_with(store.clone(), CaseSettings::default());

        let err = handler.handle(command(), clerk()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(store.case_count().await, 0);
    }

    /// Repository whose numbers are always taken by "another process".
    struct AlwaysTakenRepository {
        attempts: StdMutex<u32>,
    }

    #[async_trait]
    impl CaseRepository for AlwaysTakenRepository {
        async fn insert(&self, case: &Case, _audit: &AuditEntry) -> Result<(), DomainError> {
            *self.attempts.lock().unwrap() += 1;
            Err(DomainError::new(
                ErrorCode::CaseNumberTaken,
                format!("Case number already in use: {}", case.case_number()),
            ))
        }

        async fn update(&self, _: &Case, _: u32, _: &AuditEntry) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &CaseId) -> Result<Option<Case>, DomainError> {
            Ok(None)
        }

        async fn case_numbers_with_prefix(&self, _: &str) -> Result<Vec<String>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn exhausting_retries_is_identifier_exhausted() {
        let repository = Arc::new(AlwaysTakenRepository {
            attempts: StdMutex::new(0),
        });
        let handler = CreateCaseHandler::new(
            repository.clone(),
            Arc::new(InMemorySettingsStore::default()),
            Arc::new(FixedClock::new(jan_15())),
            CaseNumberPolicy {
                prefix: "JC".to_string(),
                max_attempts: 3,
            },
        );

        let err = handler.handle(command(), clerk()).await.unwrap_err();
        assert_eq!(
            err,
            CaseError::IdentifierExhausted {
                bucket: "JC-2024-01".to_string(),
                attempts: 3
            }
        );
        assert_eq!(*repository.attempts.lock().unwrap(), 3);
    }
}
