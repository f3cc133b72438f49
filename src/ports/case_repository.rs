//! Case repository port (write side).
//!
//! Every write carries the audit entry describing it. Implementations must
//! persist both or neither.

use async_trait::async_trait;

use crate::domain::audit::AuditEntry;
use crate::domain::case::Case;
use crate::domain::foundation::{CaseId, DomainError};

/// Repository port for Case aggregate persistence.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Insert a newly registered case together with its audit entry.
    ///
    /// # Errors
    ///
    /// - `CaseNumberTaken` if the case number is already in use
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn insert(&self, case: &Case, audit: &AuditEntry) -> Result<(), DomainError>;

    /// Replace a case whose stored version is `expected_version`.
    ///
    /// # Errors
    ///
    /// - `CaseNotFound` if the case does not exist
    /// - `ConcurrencyConflict` if the stored version moved on
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn update(
        &self,
        case: &Case,
        expected_version: u32,
        audit: &AuditEntry,
    ) -> Result<(), DomainError>;

    /// Find a case by its ID.
    async fn find_by_id(&self, id: &CaseId) -> Result<Option<Case>, DomainError>;

    /// Raw stored case numbers starting with `prefix`, malformed ones included.
    async fn case_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CaseRepository) {}
    }
}
