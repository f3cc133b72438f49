//! Free-text notes officials attach to a case.

use serde::{Deserialize, Serialize};

use super::ObservationText;
use crate::domain::foundation::{CaseId, ObservationId, Timestamp, UserId, ValidationError};

/// A note on a case. Internal notes are hidden from the parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    id: ObservationId,
    case_id: CaseId,
    author: UserId,
    content: ObservationText,
    internal: bool,
    created_at: Timestamp,
}

impl Observation {
    /// # Errors
    ///
    /// - `EmptyField` / `TooShort` if the content is under 10 trimmed characters
    pub fn new(
        case_id: CaseId,
        author: UserId,
        content: &str,
        internal: bool,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ObservationId::new(),
            case_id,
            author,
            content: ObservationText::new(content)?,
            internal,
            created_at: now,
        })
    }

    /// Rebuilds an observation from storage without validation.
    pub fn reconstitute(
        id: ObservationId,
        case_id: CaseId,
        author: UserId,
        content: ObservationText,
        internal: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            case_id,
            author,
            content,
            internal,
            created_at,
        }
    }

    pub fn id(&self) -> &ObservationId {
        &self.id
    }

    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
