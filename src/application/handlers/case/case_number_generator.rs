//! CaseNumberGenerator - mints the next number in a year/month bucket.
//!
//! The generator only reads; uniqueness is guaranteed by the caller holding
//! the creation lock across generate + insert and by the unique constraint
//! on `case_number`.

use std::sync::Arc;

use crate::domain::case::{CaseError, CaseNumber, CaseNumberBucket, DEFAULT_CASE_PREFIX};
use crate::domain::foundation::Timestamp;
use crate::ports::CaseRepository;

/// Default number of insert attempts before giving up on a bucket.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Prefix and retry bound for case numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNumberPolicy {
    pub prefix: String,
    pub max_attempts: u32,
}

impl Default for CaseNumberPolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CASE_PREFIX.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

pub struct CaseNumberGenerator {
    repository: Arc<dyn CaseRepository>,
    prefix: String,
}

impl CaseNumberGenerator {
    pub fn new(repository: Arc<dyn CaseRepository>, prefix: impl Into<String>) -> Self {
        Self {
            repository,
            prefix: prefix.into(),
        }
    }

    /// Bucket that a case registered at `now` belongs to.
    pub fn bucket(&self, now: &Timestamp) -> CaseNumberBucket {
        CaseNumberBucket::for_timestamp(self.prefix.clone(), now)
    }

    /// Highest stored sequence in the bucket of `now`, plus one.
    ///
    /// Malformed stored numbers are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - `IdentifierExhausted` once the bucket passes 9999
    /// - `Infrastructure` if the stored numbers cannot be read
    pub async fn generate_case_number(&self, now: &Timestamp) -> Result<CaseNumber, CaseError> {
        let bucket = self.bucket(now);
        let existing = self.repository.case_numbers_with_prefix(&bucket.key()).await?;
        let scan = bucket.scan(existing.iter().map(String::as_str));

        for malformed in &scan.malformed {
            tracing::warn!(
                case_number = %malformed,
                bucket = %bucket,
                "Ignoring malformed case number while generating sequence"
            );
        }

        bucket
            .number(scan.next_sequence())
            .ok_or_else(|| CaseError::IdentifierExhausted {
                bucket: bucket.to_string(),
                attempts: 1,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCaseStore;
    use chrono::{TimeZone, Utc};

    fn jan_15() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn first_number_in_bucket_is_one() {
        let generator = CaseNumberGenerator::new(Arc::new(InMemoryCaseStore::new()), "JC");
        let number = generator.generate_case_number(&jan_15()).await.unwrap();
        assert_eq!(number.as_str(), "JC-2024-01-0001");
    }

    #[tokio::test]
    async fn continues_after_highest_existing_sequence() {
        let store = Arc::new(InMemoryCaseStore::new());
        store.seed_case_number("JC-2024-01-0003").await;
        store.seed_case_number("JC-2024-01-0012").await;
        store.seed_case_number("JC-2023-12-0099").await;

        let generator = CaseNumberGenerator::new(store, "JC");
        let number = generator.generate_case_number(&jan_15()).await.unwrap();
        assert_eq!(number.as_str(), "JC-2024-01-0013");
    }

    #[tokio::test]
    async fn malformed_numbers_do_not_block_generation() {
        let store = Arc::new(InMemoryCaseStore::new());
        store.seed_case_number("JC-2024-01-BAD1").await;

        let generator = CaseNumberGenerator::new(store, "JC");
        let number = generator.generate_case_number(&jan_15()).await.unwrap();
        assert_eq!(number.as_str(), "JC-2024-01-0001");
    }

    #[tokio::test]
    async fn full_bucket_is_exhausted() {
        let store = Arc::new(InMemoryCaseStore::new());
        store.seed_case_number("JC-2024-01-9999").await;

        let generator = CaseNumberGenerator::new(store, "JC");
        let err = generator.generate_case_number(&jan_15()).await.unwrap_err();
        assert!(matches!(err, CaseError::IdentifierExhausted { ref bucket, .. } if bucket == "JC-2024-01"));
    }

    #[tokio::test]
    async fn custom_prefix_is_used() {
        let generator = CaseNumberGenerator::new(Arc::new(InMemoryCaseStore::new()), "JP");
        let number = generator.generate_case_number(&jan_15()).await.unwrap();
        assert_eq!(number.as_str(), "JP-2024-01-0001");
    }

    #[test]
    fn default_policy_uses_jc_and_five_attempts() {
        let policy = CaseNumberPolicy::default();
        assert_eq!(policy.prefix, "JC");
        assert_eq!(policy.max_attempts, 5);
    }
}
