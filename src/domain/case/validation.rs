//! Input rules that gate case mutations.
//!
//! The form layer shows these messages to officials; the domain re-checks
//! them so no invalid value is ever persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CaseSettings;
use crate::domain::foundation::ValidationError;

/// Required length of a national identity number.
pub const NATIONAL_ID_LENGTH: usize = 10;

/// Minimum trimmed length of an extension justification.
pub const MIN_JUSTIFICATION_LENGTH: usize = 20;

/// Minimum trimmed length of an observation.
pub const MIN_OBSERVATION_LENGTH: usize = 10;

/// A ten-digit national identity number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// # Errors
    ///
    /// - `InvalidFormat` unless the value is exactly ten ASCII digits
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != NATIONAL_ID_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "national_id",
                "must contain exactly 10 digits",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> Self {
        id.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reason an official gives for extending a case. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Justification(String);

impl Justification {
    /// # Errors
    ///
    /// - `EmptyField` if blank
    /// - `TooShort` if fewer than 20 characters after trimming
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        require_min_chars("justification", value, MIN_JUSTIFICATION_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Justification {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Justification> for String {
    fn from(justification: Justification) -> Self {
        justification.0
    }
}

/// Body of an observation. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationText(String);

impl ObservationText {
    /// # Errors
    ///
    /// - `EmptyField` if blank
    /// - `TooShort` if fewer than 10 characters after trimming
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        require_min_chars("content", value, MIN_OBSERVATION_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks a candidate attachment against the configured policy.
///
/// The extension is the text after the last `.`, compared case-insensitively.
///
/// # Errors
///
/// - `InvalidFormat` on field `file_name` for a missing or disallowed extension
/// - `InvalidFormat` on field `file_size` when larger than the limit
pub fn check_attachment(
    file_name: &str,
    size_bytes: u64,
    settings: &CaseSettings,
) -> Result<(), ValidationError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| ValidationError::invalid_format("file_name", "file has no extension"))?;

    if !settings.allowed_extensions.iter().any(|allowed| allowed == &extension) {
        return Err(ValidationError::invalid_format(
            "file_name",
            format!(
                "extension '.{}' not allowed; allowed: {}",
                extension,
                settings.allowed_extensions.join(", ")
            ),
        ));
    }

    if size_bytes > settings.max_attachment_bytes {
        return Err(ValidationError::invalid_format(
            "file_size",
            format!(
                "{} bytes exceeds the {} byte limit",
                size_bytes, settings.max_attachment_bytes
            ),
        ));
    }
    Ok(())
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_max_chars(
    field: &str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::too_long(field, max, actual));
    }
    Ok(())
}

fn require_min_chars(field: &str, value: &str, min: usize) -> Result<String, ValidationError> {
    let trimmed = require_text(field, value)?;
    let actual = trimmed.chars().count();
    if actual < min {
        return Err(ValidationError::too_short(field, min, actual));
    }
    Ok(trimmed)
}
