//! Registration details captured when a case is opened.
//!
//! These fields belong to the intake form; the engine only validates and
//! carries them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::{require_max_chars, require_text};
use super::NationalId;
use crate::domain::foundation::ValidationError;

/// Maximum characters in a person's name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum characters in a phone number.
pub const MAX_PHONE_LENGTH: usize = 15;

/// Nature of the dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Neighborhood,
    Individual,
    Community,
    MinorOffense,
    PropertyObligation,
    Other,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Neighborhood => "neighborhood",
            ConflictKind::Individual => "individual",
            ConflictKind::Community => "community",
            ConflictKind::MinorOffense => "minor_offense",
            ConflictKind::PropertyObligation => "property_obligation",
            ConflictKind::Other => "other",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConflictKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neighborhood" => Ok(ConflictKind::Neighborhood),
            "individual" => Ok(ConflictKind::Individual),
            "community" => Ok(ConflictKind::Community),
            "minor_offense" => Ok(ConflictKind::MinorOffense),
            "property_obligation" => Ok(ConflictKind::PropertyObligation),
            "other" => Ok(ConflictKind::Other),
            other => Err(ValidationError::invalid_format(
                "conflict_kind",
                format!("unknown conflict kind '{}'", other),
            )),
        }
    }
}

/// The person who filed the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub national_id: NationalId,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: String,
}

impl Applicant {
    /// # Errors
    ///
    /// - `EmptyField` for a blank name or address
    /// - `TooLong` for a name over 100 or a phone over 15 characters
    pub fn new(
        national_id: NationalId,
        full_name: &str,
        phone: Option<&str>,
        address: &str,
    ) -> Result<Self, ValidationError> {
        let full_name = require_text("applicant_name", full_name)?;
        require_max_chars("applicant_name", &full_name, MAX_NAME_LENGTH)?;
        Ok(Self {
            national_id,
            full_name,
            phone: optional_phone("applicant_phone", phone)?,
            address: require_text("applicant_address", address)?,
        })
    }
}

/// The other party, which may be unknown at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvolvedParty {
    pub national_id: Option<NationalId>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl InvolvedParty {
    /// # Errors
    ///
    /// - `TooLong` for a name over 100 or a phone over 15 characters
    pub fn new(
        national_id: Option<NationalId>,
        full_name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let full_name = non_blank(full_name);
        if let Some(name) = &full_name {
            require_max_chars("involved_name", name, MAX_NAME_LENGTH)?;
        }
        Ok(Self {
            national_id,
            full_name,
            phone: optional_phone("involved_phone", phone)?,
            address: non_blank(address),
        })
    }

    /// True when nothing is known about the other party.
    pub fn is_unknown(&self) -> bool {
        self.national_id.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Everything the intake form records about a dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub applicant: Applicant,
    pub involved: InvolvedParty,
    pub conflict_kind: ConflictKind,
    pub description: String,
    pub residential_block: Option<String>,
}

impl CaseDetails {
    /// # Errors
    ///
    /// - `EmptyField` if the description is blank
    pub fn new(
        applicant: Applicant,
        involved: InvolvedParty,
        conflict_kind: ConflictKind,
        description: &str,
        residential_block: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            applicant,
            involved,
            conflict_kind,
            description: require_text("description", description)?,
            residential_block: non_blank(residential_block),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn optional_phone(field: &str, phone: Option<&str>) -> Result<Option<String>, ValidationError> {
    let phone = non_blank(phone);
    if let Some(p) = &phone {
        require_max_chars(field, p, MAX_PHONE_LENGTH)?;
    }
    Ok(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn national_id() -> NationalId {
        NationalId::new("1712345678").unwrap()
    }

    #[test]
    fn applicant_trims_and_accepts_valid_input() {
        let applicant =
            Applicant::new(national_id(), "  Maria Quishpe ", Some(" 0991234567 "), "Calle 5").unwrap();
        assert_eq!(applicant.full_name, "Maria Quishpe");
        assert_eq!(applicant.phone.as_deref(), Some("0991234567"));
    }

    #[test]
    fn applicant_requires_name_and_address() {
        assert!(Applicant::new(national_id(), " ", None, "Calle 5").is_err());
        assert!(Applicant::new(national_id(), "Maria", None, "").is_err());
    }

    #[test]
    fn applicant_name_is_capped_at_100_chars() {
        let long = "a".repeat(101);
        assert_eq!(
            Applicant::new(national_id(), &long, None, "Calle 5"),
            Err(ValidationError::too_long("applicant_name", 100, 101))
        );
    }

    #[test]
    fn phone_is_capped_at_15_chars() {
        let err = Applicant::new(national_id(), "Maria", Some("0123456789012345"), "Calle 5");
        assert!(matches!(err, Err(ValidationError::TooLong { max: 15, .. })));
    }

    #[test]
    fn blank_involved_fields_become_none() {
        let involved = InvolvedParty::new(None, Some("  "), None, Some("")).unwrap();
        assert!(involved.is_unknown());
    }

    #[test]
    fn details_require_description() {
        let applicant = Applicant::new(national_id(), "Maria", None, "Calle 5").unwrap();
        let result = CaseDetails::new(
            applicant,
            InvolvedParty::default(),
            ConflictKind::Neighborhood,
            "   ",
            None,
        );
        assert_eq!(result, Err(ValidationError::empty_field("description")));
    }

    #[test]
    fn conflict_kind_round_trips_through_text() {
        for kind in [
            ConflictKind::Neighborhood,
            ConflictKind::Individual,
            ConflictKind::Community,
            ConflictKind::MinorOffense,
            ConflictKind::PropertyObligation,
            ConflictKind::Other,
        ] {
            assert_eq!(kind.as_str().parse::<ConflictKind>(), Ok(kind));
        }
        assert!("vecinal".parse::<ConflictKind>().is_err());
    }
}
