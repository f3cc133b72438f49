//! Urgency classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CaseStatus;
use crate::domain::foundation::Timestamp;

/// Derived classification of how close a case is to its effective deadline.
///
/// Never persisted; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    #[default]
    Normal,
    Urgent,
    Overdue,
}

impl UrgencyLevel {
    /// Returns true for `Urgent` and `Overdue`.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, UrgencyLevel::Normal)
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrgencyLevel::Normal => "normal",
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Overdue => "overdue",
        };
        write!(f, "{}", s)
    }
}

/// Classifies a case at `now`.
///
/// Closed cases are always `Normal`. For open cases the floored number of
/// days remaining decides: negative is `Overdue`, `0..=threshold` is
/// `Urgent`, anything above is `Normal`.
pub fn classify(
    now: &Timestamp,
    effective_deadline: &Timestamp,
    status: CaseStatus,
    urgent_threshold_days: i64,
) -> UrgencyLevel {
    if !status.is_open() {
        return UrgencyLevel::Normal;
    }

    let days_remaining = effective_deadline.whole_days_since(now);
    if days_remaining < 0 {
        UrgencyLevel::Overdue
    } else if days_remaining <= urgent_threshold_days {
        UrgencyLevel::Urgent
    } else {
        UrgencyLevel::Normal
    }
}
