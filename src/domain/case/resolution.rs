//! How a case was closed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::require_text;
use crate::domain::foundation::ValidationError;

/// The mechanism that ended the dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    Conciliation,
    Mediation,
    Arbitration,
    Judgment,
    Withdrawal,
    Other,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::Conciliation => "conciliation",
            ResolutionMethod::Mediation => "mediation",
            ResolutionMethod::Arbitration => "arbitration",
            ResolutionMethod::Judgment => "judgment",
            ResolutionMethod::Withdrawal => "withdrawal",
            ResolutionMethod::Other => "other",
        }
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResolutionMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conciliation" => Ok(ResolutionMethod::Conciliation),
            "mediation" => Ok(ResolutionMethod::Mediation),
            "arbitration" => Ok(ResolutionMethod::Arbitration),
            "judgment" => Ok(ResolutionMethod::Judgment),
            "withdrawal" => Ok(ResolutionMethod::Withdrawal),
            "other" => Ok(ResolutionMethod::Other),
            other => Err(ValidationError::invalid_format(
                "resolution_method",
                format!("unknown resolution method '{}'", other),
            )),
        }
    }
}

/// Method and notes, always supplied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    method: ResolutionMethod,
    notes: String,
}

impl Resolution {
    /// # Errors
    ///
    /// - `EmptyField` if the notes are blank
    pub fn new(method: ResolutionMethod, notes: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            method,
            notes: require_text("resolution_notes", notes)?,
        })
    }

    pub fn method(&self) -> ResolutionMethod {
        self.method
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
