//! Runtime-tunable deadline and attachment settings.
//!
//! Administrators may change these at any time. Reads take a fresh copy per
//! computation; case creation freezes `standard_days` into the deadline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default statutory resolution window.
pub const DEFAULT_STANDARD_DAYS: i64 = 15;

/// Default length of the one-time extension.
pub const DEFAULT_EXTENSION_DAYS: i64 = 15;

/// Default urgency alert threshold.
pub const DEFAULT_URGENT_THRESHOLD_DAYS: i64 = 10;

/// Upper bound for every day tunable (roughly ten years).
pub const MAX_DAYS: i64 = 3650;

/// Default attachment size ceiling (10 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Default attachment extension allow-list.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Invalid tunables. Never defaulted silently; an administrator must fix them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Total allotted days must be positive, got {total}")]
    NonPositiveTotalDays { total: i64 },

    #[error("Setting '{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("Setting '{field}' cannot be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("Setting '{field}' must be at most {} days, got {value}", MAX_DAYS)]
    TooLarge { field: &'static str, value: i64 },

    #[error("Attachment size limit must be greater than zero")]
    ZeroAttachmentLimit,

    #[error("At least one attachment extension must be allowed")]
    EmptyExtensionAllowList,
}

/// Deadline and attachment tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSettings {
    /// Days a case has from registration to its standard deadline.
    pub standard_days: i64,

    /// Days added by the one-time extension.
    pub extension_days: i64,

    /// Cases with this many days left (or fewer) are urgent.
    pub urgent_threshold_days: i64,

    /// Attachment size ceiling in bytes.
    pub max_attachment_bytes: u64,

    /// Lowercase attachment extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl CaseSettings {
    /// Validates every tunable.
    ///
    /// # Errors
    ///
    /// - `NonPositive` if `standard_days <= 0`
    /// - `Negative` if `extension_days` or `urgent_threshold_days` is negative
    /// - `TooLarge` if any day tunable exceeds [`MAX_DAYS`]
    /// - `ZeroAttachmentLimit` / `EmptyExtensionAllowList` for attachment policy
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.standard_days <= 0 {
            return Err(ConfigurationError::NonPositive {
                field: "standard_days",
                value: self.standard_days,
            });
        }
        if self.extension_days < 0 {
            return Err(ConfigurationError::Negative {
                field: "extension_days",
                value: self.extension_days,
            });
        }
        if self.urgent_threshold_days < 0 {
            return Err(ConfigurationError::Negative {
                field: "urgent_threshold_days",
                value: self.urgent_threshold_days,
            });
        }
        for (field, value) in [
            ("standard_days", self.standard_days),
            ("extension_days", self.extension_days),
            ("urgent_threshold_days", self.urgent_threshold_days),
        ] {
            if value > MAX_DAYS {
                return Err(ConfigurationError::TooLarge { field, value });
            }
        }
        if self.max_attachment_bytes == 0 {
            return Err(ConfigurationError::ZeroAttachmentLimit);
        }
        if self.allowed_extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(ConfigurationError::EmptyExtensionAllowList);
        }
        Ok(())
    }

    /// Builder: override the day tunables, keeping attachment defaults.
    pub fn with_days(mut self, standard: i64, extension: i64, urgent_threshold: i64) -> Self {
        self.standard_days = standard;
        self.extension_days = extension;
        self.urgent_threshold_days = urgent_threshold;
        self
    }

    /// Parses a comma-separated extension list, normalising case and dots.
    pub fn parse_extensions(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}

impl Default for CaseSettings {
    fn default() -> Self {
        Self {
            standard_days: DEFAULT_STANDARD_DAYS,
            extension_days: DEFAULT_EXTENSION_DAYS,
            urgent_threshold_days: DEFAULT_URGENT_THRESHOLD_DAYS,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}
