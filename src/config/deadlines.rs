//! Seed values for the case settings store.
//!
//! These are only read when the settings row does not exist yet; after that,
//! administrators change the tunables through `UpdateSettingsHandler`.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::case::{
    CaseSettings, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_EXTENSION_DAYS,
    DEFAULT_MAX_ATTACHMENT_BYTES, DEFAULT_STANDARD_DAYS, DEFAULT_URGENT_THRESHOLD_DAYS,
};

/// Deadline tunables
#[derive(Debug, Clone, Deserialize)]
pub struct DeadlineConfig {
    #[serde(default = "default_standard_days")]
    pub standard_days: i64,

    #[serde(default = "default_extension_days")]
    pub extension_days: i64,

    #[serde(default = "default_urgent_threshold_days")]
    pub urgent_threshold_days: i64,
}

/// Attachment policy
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentConfig {
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Comma-separated, e.g. `pdf,docx,png`
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: String,
}

/// Combines both sections into validated initial settings.
pub fn seed_settings(
    deadlines: &DeadlineConfig,
    attachments: &AttachmentConfig,
) -> Result<CaseSettings, ValidationError> {
    let settings = CaseSettings {
        standard_days: deadlines.standard_days,
        extension_days: deadlines.extension_days,
        urgent_threshold_days: deadlines.urgent_threshold_days,
        max_attachment_bytes: attachments.max_file_size_bytes,
        allowed_extensions: CaseSettings::parse_extensions(&attachments.allowed_extensions),
    };
    settings.validate()?;
    Ok(settings)
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            standard_days: default_standard_days(),
            extension_days: default_extension_days(),
            urgent_threshold_days: default_urgent_threshold_days(),
        }
    }
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_standard_days() -> i64 {
    DEFAULT_STANDARD_DAYS
}

fn default_extension_days() -> i64 {
    DEFAULT_EXTENSION_DAYS
}

fn default_urgent_threshold_days() -> i64 {
    DEFAULT_URGENT_THRESHOLD_DAYS
}

fn default_max_file_size_bytes() -> u64 {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

fn default_allowed_extensions() -> String {
    DEFAULT_ALLOWED_EXTENSIONS.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case::ConfigurationError;

    #[test]
    fn defaults_seed_the_default_settings() {
        let settings =
            seed_settings(&DeadlineConfig::default(), &AttachmentConfig::default()).unwrap();
        assert_eq!(settings, CaseSettings::default());
    }

    #[test]
    fn extension_list_is_normalised() {
        let attachments = AttachmentConfig {
            allowed_extensions: "PDF, .png".to_string(),
            ..Default::default()
        };
        let settings = seed_settings(&DeadlineConfig::default(), &attachments).unwrap();
        assert_eq!(settings.allowed_extensions, vec!["pdf", "png"]);
    }

    #[test]
    fn invalid_days_fail_instead_of_defaulting() {
        let deadlines = DeadlineConfig {
            standard_days: 0,
            ..Default::default()
        };
        let err = seed_settings(&deadlines, &AttachmentConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCaseSettings(ConfigurationError::NonPositive {
                field: "standard_days",
                value: 0
            })
        );
    }
}
