//! In-memory case store.
//!
//! Implements every case persistence port against a single lock so that the
//! case write and its audit entry land together, as in PostgreSQL. Used by
//! tests and for running the engine without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::audit::AuditEntry;
use crate::domain::case::{Case, Observation};
use crate::domain::foundation::{CaseId, DomainError, ErrorCode};
use crate::ports::{CaseListFilter, CaseReader, CaseRepository, ObservationRepository};

#[derive(Default)]
struct Tables {
    cases: HashMap<CaseId, Case>,
    /// Stored numbers, including rows written by other tools.
    case_numbers: Vec<String>,
    observations: Vec<Observation>,
    audit_log: Vec<AuditEntry>,
    fail_audit_writes: bool,
}

impl Tables {
    fn write_audit(&mut self, entry: &AuditEntry) -> Result<(), DomainError> {
        if self.fail_audit_writes {
            return Err(DomainError::database(
                "Failed to write audit entry",
                "audit log unavailable",
            ));
        }
        self.audit_log.push(entry.clone());
        Ok(())
    }
}

/// In-memory implementation of `CaseRepository`, `CaseReader` and
/// `ObservationRepository`.
#[derive(Default)]
pub struct InMemoryCaseStore {
    tables: RwLock<Tables>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Records a raw case number as if another writer had stored it.
    pub async fn seed_case_number(&self, raw: impl Into<String>) {
        self.tables.write().await.case_numbers.push(raw.into());
    }

    /// Makes every subsequent audit write fail.
    pub async fn fail_audit_writes(&self, fail: bool) {
        self.tables.write().await.fail_audit_writes = fail;
    }

    pub async fn case_count(&self) -> usize {
        self.tables.read().await.cases.len()
    }

    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.tables.read().await.audit_log.clone()
    }
}

#[async_trait]
impl CaseRepository for InMemoryCaseStore {
    async fn insert(&self, case: &Case, audit: &AuditEntry) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let number = case.case_number().as_str();
        if tables.case_numbers.iter().any(|existing| existing == number) {
            return Err(DomainError::new(
                ErrorCode::CaseNumberTaken,
                format!("Case number already in use: {}", number),
            ));
        }
        tables.write_audit(audit)?;
        tables.case_numbers.push(number.to_string());
        tables.cases.insert(*case.id(), case.clone());
        Ok(())
    }

    async fn update(
        &self,
        case: &Case,
        expected_version: u32,
        audit: &AuditEntry,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored_version = match tables.cases.get(case.id()) {
            Some(stored) => stored.version(),
            None => {
                return Err(DomainError::new(
                    ErrorCode::CaseNotFound,
                    format!("Case not found: {}", case.id()),
                ))
            }
        };
        if stored_version != expected_version {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!(
                    "Case {} is at version {}, expected {}",
                    case.case_number(),
                    stored_version,
                    expected_version
                ),
            ));
        }
        tables.write_audit(audit)?;
        tables.cases.insert(*case.id(), case.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CaseId) -> Result<Option<Case>, DomainError> {
        Ok(self.tables.read().await.cases.get(id).cloned())
    }

    async fn case_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .case_numbers
            .iter()
            .filter(|number| number.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CaseReader for InMemoryCaseStore {
    async fn list_cases(&self, filter: &CaseListFilter) -> Result<Vec<Case>, DomainError> {
        let tables = self.tables.read().await;
        let mut cases: Vec<Case> = tables
            .cases
            .values()
            .filter(|case| filter.matches(case))
            .cloned()
            .collect();
        cases.sort_by(|a, b| b.registered_at().cmp(a.registered_at()));
        Ok(cases)
    }

    async fn audit_trail(&self, case_id: &CaseId) -> Result<Vec<AuditEntry>, DomainError> {
        let key = case_id.to_string();
        Ok(self
            .tables
            .read()
            .await
            .audit_log
            .iter()
            .filter(|entry| entry.entity == "Case" && entry.entity_id == key)
            .cloned()
            .collect())
    }

    async fn observations(
        &self,
        case_id: &CaseId,
        include_internal: bool,
    ) -> Result<Vec<Observation>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .observations
            .iter()
            .filter(|o| o.case_id() == case_id && (include_internal || !o.is_internal()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ObservationRepository for InMemoryCaseStore {
    async fn add(&self, observation: &Observation, audit: &AuditEntry) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.cases.contains_key(observation.case_id()) {
            return Err(DomainError::new(
                ErrorCode::CaseNotFound,
                format!("Case not found: {}", observation.case_id()),
            ));
        }
        tables.write_audit(audit)?;
        tables.observations.push(observation.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditAction;
    use crate::domain::case::{
        Applicant, CaseDetails, CaseNumber, CaseSettings, ConflictKind, InvolvedParty, NationalId,
    };
    use crate::domain::foundation::{CommandMetadata, Timestamp, UserId};

    fn judge() -> UserId {
        UserId::new("judge-1").unwrap()
    }

    fn new_case(number: &str) -> Case {
        let applicant =
            Applicant::new(NationalId::new("1712345678").unwrap(), "Maria", None, "Calle 5")
                .unwrap();
        let details = CaseDetails::new(
            applicant,
            InvolvedParty::default(),
            ConflictKind::Individual,
            "Unpaid debt between neighbours",
            None,
        )
        .unwrap();
        Case::register(
            CaseId::new(),
            CaseNumber::parse(number).unwrap(),
            details,
            judge(),
            judge(),
            &CaseSettings::default(),
            Timestamp::now(),
        )
        .unwrap()
    }

    fn audit_for(case: &Case) -> AuditEntry {
        AuditEntry::new(
            &CommandMetadata::new(judge()),
            AuditAction::Create,
            "Case",
            case.id(),
            "Case registered",
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_case_numbers() {
        let store = InMemoryCaseStore::new();
        let first = new_case("JC-2024-01-0001");
        store.insert(&first, &audit_for(&first)).await.unwrap();

        let second = new_case("JC-2024-01-0001");
        let err = store.insert(&second, &audit_for(&second)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CaseNumberTaken);
        assert_eq!(store.case_count().await, 1);
    }

    #[tokio::test]
    async fn seeded_numbers_also_block_reuse() {
        let store = InMemoryCaseStore::new();
        store.seed_case_number("JC-2024-01-0001").await;
        let case = new_case("JC-2024-01-0001");
        assert!(store.insert(&case, &audit_for(&case)).await.is_err());
    }

    #[tokio::test]
    async fn failed_audit_write_persists_nothing() {
        let store = InMemoryCaseStore::new();
        store.fail_audit_writes(true).await;
        let case = new_case("JC-2024-01-0001");

        let err = store.insert(&case, &audit_for(&case)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(store.case_count().await, 0);
        assert!(store.case_numbers_with_prefix("JC-").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_stale_version_conflicts() {
        let store = InMemoryCaseStore::new();
        let case = new_case("JC-2024-01-0001");
        store.insert(&case, &audit_for(&case)).await.unwrap();

        let err = store.update(&case, 7, &audit_for(&case)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[tokio::test]
    async fn update_of_unknown_case_is_not_found() {
        let store = InMemoryCaseStore::new();
        let case = new_case("JC-2024-01-0001");
        let err = store.update(&case, 1, &audit_for(&case)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CaseNotFound);
    }

    #[tokio::test]
    async fn prefix_query_returns_raw_numbers() {
        let store = InMemoryCaseStore::new();
        store.seed_case_number("JC-2024-01-00x1").await;
        store.seed_case_number("JC-2024-02-0001").await;
        let numbers = store.case_numbers_with_prefix("JC-2024-01-").await.unwrap();
        assert_eq!(numbers, vec!["JC-2024-01-00x1".to_string()]);
    }

    #[tokio::test]
    async fn audit_trail_is_scoped_to_the_case() {
        let store = InMemoryCaseStore::new();
        let a = new_case("JC-2024-01-0001");
        let b = new_case("JC-2024-01-0002");
        store.insert(&a, &audit_for(&a)).await.unwrap();
        store.insert(&b, &audit_for(&b)).await.unwrap();

        let trail = store.audit_trail(a.id()).await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].entity_id, a.id().to_string());
    }

    #[tokio::test]
    async fn list_applies_kind_block_and_search_criteria() {
        let store = InMemoryCaseStore::new();
        let case = new_case("JC-2024-01-0001");
        store.insert(&case, &audit_for(&case)).await.unwrap();

        let count = |filter: CaseListFilter| {
            let store = &store;
            async move { store.list_cases(&filter).await.unwrap().len() }
        };
        assert_eq!(count(CaseListFilter::default().with_conflict_kind(ConflictKind::Individual)).await, 1);
        assert_eq!(count(CaseListFilter::default().with_conflict_kind(ConflictKind::Community)).await, 0);
        assert_eq!(count(CaseListFilter::default().in_block("BLOQUE_16")).await, 0);
        assert_eq!(count(CaseListFilter::default().searching("MARIA")).await, 1);
        assert_eq!(count(CaseListFilter::default().searching("12345")).await, 1);
        assert_eq!(count(CaseListFilter::default().searching("Pedro")).await, 0);
    }
}
