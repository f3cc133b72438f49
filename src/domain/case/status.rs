//! CaseStatus enum for tracking the lifecycle of a case.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle state of a community case.
///
/// Valid transitions:
/// - InProgress -> Resolved
/// - InProgress -> Unresolved
/// - InProgress -> Archived
///
/// Every other state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    InProgress,
    Resolved,
    Unresolved,
    Archived,
}

impl CaseStatus {
    /// All states, in display order.
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::InProgress,
        CaseStatus::Resolved,
        CaseStatus::Unresolved,
        CaseStatus::Archived,
    ];

    /// Returns true if the case can still be extended or transitioned.
    pub fn is_open(&self) -> bool {
        matches!(self, CaseStatus::InProgress)
    }

    /// Returns true if the target requires resolution method and notes.
    pub fn requires_resolution(&self) -> bool {
        matches!(self, CaseStatus::Resolved | CaseStatus::Unresolved)
    }

    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Resolved => "resolved",
            CaseStatus::Unresolved => "unresolved",
            CaseStatus::Archived => "archived",
        }
    }
}

impl StateMachine for CaseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CaseStatus::*;
        matches!(
            (self, target),
            (InProgress, Resolved) | (InProgress, Unresolved) | (InProgress, Archived)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CaseStatus::*;
        match self {
            InProgress => vec![Resolved, Unresolved, Archived],
            Resolved | Unresolved | Archived => vec![],
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(CaseStatus::InProgress),
            "resolved" => Ok(CaseStatus::Resolved),
            "unresolved" => Ok(CaseStatus::Unresolved),
            "archived" => Ok(CaseStatus::Archived),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown case status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_progress() {
        assert_eq!(CaseStatus::default(), CaseStatus::InProgress);
    }

    #[test]
    fn only_in_progress_is_open() {
        assert!(CaseStatus::InProgress.is_open());
        assert!(!CaseStatus::Resolved.is_open());
        assert!(!CaseStatus::Unresolved.is_open());
        assert!(!CaseStatus::Archived.is_open());
    }

    #[test]
    fn in_progress_reaches_every_terminal_state() {
        for target in [CaseStatus::Resolved, CaseStatus::Unresolved, CaseStatus::Archived] {
            assert_eq!(CaseStatus::InProgress.transition_to(target), Ok(target));
        }
    }

    #[test]
    fn in_progress_cannot_reenter_itself() {
        assert!(CaseStatus::InProgress
            .transition_to(CaseStatus::InProgress)
            .is_err());
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for from in [CaseStatus::Resolved, CaseStatus::Unresolved, CaseStatus::Archived] {
            assert!(from.is_terminal());
            for to in CaseStatus::ALL {
                assert!(!from.can_transition_to(&to), "{} -> {} allowed", from, to);
            }
        }
    }

    #[test]
    fn resolution_fields_required_for_resolved_and_unresolved_only() {
        assert!(CaseStatus::Resolved.requires_resolution());
        assert!(CaseStatus::Unresolved.requires_resolution());
        assert!(!CaseStatus::Archived.requires_resolution());
    }

    #[test]
    fn parses_storage_representation() {
        for status in CaseStatus::ALL {
            assert_eq!(status.as_str().parse::<CaseStatus>(), Ok(status));
        }
        assert!("en_tramite".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CaseStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
