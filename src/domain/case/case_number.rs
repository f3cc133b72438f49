//! Human-readable sequential case numbers.
//!
//! Format: `PREFIX-YYYY-MM-NNNN`, e.g. `JC-2024-01-0007`. The sequence is
//! scoped to a year/month bucket, starts at 1 and is zero-padded to four
//! digits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Default case number prefix.
pub const DEFAULT_CASE_PREFIX: &str = "JC";

/// Largest sequence representable in four digits.
pub const MAX_SEQUENCE: u32 = 9999;

/// A validated case number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseNumber(String);

impl CaseNumber {
    /// Parses and validates a stored case number.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the value is not `PREFIX-YYYY-MM-NNNN`
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let mut parts = value.rsplitn(4, '-');
        let sequence = parts.next().unwrap_or_default();
        let month = parts.next().unwrap_or_default();
        let year = parts.next().unwrap_or_default();
        let prefix = parts.next().unwrap_or_default();

        let well_formed = !prefix.is_empty()
            && is_digits(year, 4)
            && is_digits(month, 2)
            && matches!(month.parse::<u32>(), Ok(1..=12))
            && is_digits(sequence, 4)
            && sequence != "0000";

        if !well_formed {
            return Err(ValidationError::invalid_format(
                "case_number",
                format!("'{}' is not PREFIX-YYYY-MM-NNNN", value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the case number text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the per-bucket sequence.
    pub fn sequence(&self) -> u32 {
        self.0
            .rsplit('-')
            .next()
            .and_then(|seq| seq.parse().ok())
            .unwrap_or_default()
    }
}

impl TryFrom<String> for CaseNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CaseNumber> for String {
    fn from(number: CaseNumber) -> Self {
        number.0
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The year/month grouping that scopes a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseNumberBucket {
    prefix: String,
    year: i32,
    month: u32,
}

/// Result of scanning a bucket's existing case numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceScan {
    /// Highest well-formed sequence found, 0 for an empty bucket.
    pub max_sequence: u32,

    /// Stored values that could not be parsed. Treated as absent.
    pub malformed: Vec<String>,
}

impl SequenceScan {
    /// The sequence the next case in the bucket should receive.
    pub fn next_sequence(&self) -> u32 {
        self.max_sequence + 1
    }
}

impl CaseNumberBucket {
    /// Bucket for the UTC year/month of `at`.
    pub fn for_timestamp(prefix: impl Into<String>, at: &Timestamp) -> Self {
        Self {
            prefix: prefix.into(),
            year: at.year(),
            month: at.month(),
        }
    }

    /// Shared leading text of every number in the bucket, e.g. `JC-2024-01-`.
    pub fn key(&self) -> String {
        format!("{}-{:04}-{:02}-", self.prefix, self.year, self.month)
    }

    /// Finds the current maximum among the bucket's stored numbers.
    ///
    /// Values outside the bucket are ignored; malformed values inside it are
    /// reported but never fail the scan.
    pub fn scan<'a, I>(&self, existing: I) -> SequenceScan
    where
        I: IntoIterator<Item = &'a str>,
    {
        let key = self.key();
        let mut scan = SequenceScan {
            max_sequence: 0,
            malformed: Vec::new(),
        };

        for value in existing {
            let Some(tail) = value.strip_prefix(&key) else {
                continue;
            };
            match tail.parse::<u32>() {
                Ok(seq) if is_digits(tail, 4) && seq > 0 => {
                    scan.max_sequence = scan.max_sequence.max(seq);
                }
                _ => scan.malformed.push(value.to_string()),
            }
        }
        scan
    }

    /// Formats the case number for `sequence` in this bucket.
    ///
    /// Returns `None` once the bucket's four digits are used up.
    pub fn number(&self, sequence: u32) -> Option<CaseNumber> {
        if sequence == 0 || sequence > MAX_SEQUENCE {
            return None;
        }
        Some(CaseNumber(format!("{}{:04}", self.key(), sequence)))
    }
}

impl fmt::Display for CaseNumberBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{:02}", self.prefix, self.year, self.month)
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn january_2024() -> CaseNumberBucket {
        let at = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap());
        CaseNumberBucket::for_timestamp(DEFAULT_CASE_PREFIX, &at)
    }

    #[test]
    fn bucket_key_is_zero_padded() {
        assert_eq!(january_2024().key(), "JC-2024-01-");
        assert_eq!(january_2024().to_string(), "JC-2024-01");
    }

    #[test]
    fn empty_bucket_starts_at_one() {
        let scan = january_2024().scan(Vec::<&str>::new());
        assert_eq!(scan.next_sequence(), 1);
        assert_eq!(
            january_2024().number(scan.next_sequence()).unwrap().as_str(),
            "JC-2024-01-0001"
        );
    }

    #[test]
    fn scan_takes_numeric_maximum() {
        let scan = january_2024().scan(["JC-2024-01-0002", "JC-2024-01-0010", "JC-2024-01-0009"]);
        assert_eq!(scan.max_sequence, 10);
        assert_eq!(scan.next_sequence(), 11);
        assert!(scan.malformed.is_empty());
    }

    #[test]
    fn scan_ignores_other_buckets() {
        let scan = january_2024().scan(["JC-2023-12-0040", "JC-2024-02-0003", "XX-2024-01-0099"]);
        assert_eq!(scan.max_sequence, 0);
        assert!(scan.malformed.is_empty());
    }

    #[test]
    fn scan_reports_malformed_numbers_without_failing() {
        let scan = january_2024().scan(["JC-2024-01-00a1", "JC-2024-01-0003", "JC-2024-01-"]);
        assert_eq!(scan.max_sequence, 3);
        assert_eq!(
            scan.malformed,
            vec!["JC-2024-01-00a1".to_string(), "JC-2024-01-".to_string()]
        );
    }

    #[test]
    fn scan_with_only_malformed_numbers_falls_back_to_one() {
        let scan = january_2024().scan(["JC-2024-01-abcd"]);
        assert_eq!(scan.next_sequence(), 1);
        assert_eq!(scan.malformed.len(), 1);
    }

    #[test]
    fn number_refuses_to_overflow_four_digits() {
        assert!(january_2024().number(MAX_SEQUENCE).is_some());
        assert!(january_2024().number(MAX_SEQUENCE + 1).is_none());
        assert!(january_2024().number(0).is_none());
    }

    #[test]
    fn parse_accepts_well_formed_numbers() {
        let number = CaseNumber::parse("JC-2024-01-0042").unwrap();
        assert_eq!(number.sequence(), 42);
    }

    #[test]
    fn parse_rejects_malformed_numbers() {
        for bad in ["", "JC-2024-1-0001", "JC-2024-13-0001", "2024-01-0001", "JC-2024-01-0000", "JC-2024-01-12345"] {
            assert!(CaseNumber::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn ordering_follows_sequence_within_bucket() {
        let a = CaseNumber::parse("JC-2024-01-0009").unwrap();
        let b = CaseNumber::parse("JC-2024-01-0010").unwrap();
        assert!(a < b);
    }

    #[test]
    fn deserializing_checks_the_format() {
        let ok: CaseNumber = serde_json::from_str("\"JC-2024-01-0007\"").unwrap();
        assert_eq!(ok.sequence(), 7);
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"JC-2024-01-0007\"");
        for bad in ["\"JC-2024-13-0001\"", "\"JC-2024-01-0000\"", "\"garbage\""] {
            assert!(serde_json::from_str::<CaseNumber>(bad).is_err(), "accepted {}", bad);
        }
    }
}
