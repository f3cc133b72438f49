//! Observation repository port.

use async_trait::async_trait;

use crate::domain::audit::AuditEntry;
use crate::domain::case::Observation;
use crate::domain::foundation::DomainError;

/// Append-only store for case observations.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Store an observation together with its audit entry.
    ///
    /// # Errors
    ///
    /// - `CaseNotFound` if the case does not exist
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn add(&self, observation: &Observation, audit: &AuditEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ObservationRepository) {}
    }
}
