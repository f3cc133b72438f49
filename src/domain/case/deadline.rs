//! Deadline calculator.
//!
//! Both functions add whole calendar days in UTC. The standard deadline is
//! computed once at registration and frozen; the extended deadline is only
//! ever computed by the extension policy. A day count that pushes the result
//! outside the representable calendar is reported as `TooLarge`.

use super::ConfigurationError;
use crate::domain::foundation::Timestamp;

/// `registered_at + standard_days`.
pub fn compute_standard_deadline(
    registered_at: &Timestamp,
    standard_days: i64,
) -> Result<Timestamp, ConfigurationError> {
    registered_at
        .checked_add_days(standard_days)
        .ok_or(ConfigurationError::TooLarge {
            field: "standard_days",
            value: standard_days,
        })
}

/// `standard_deadline + extension_days`.
pub fn compute_extended_deadline(
    standard_deadline: &Timestamp,
    extension_days: i64,
) -> Result<Timestamp, ConfigurationError> {
    standard_deadline
        .checked_add_days(extension_days)
        .ok_or(ConfigurationError::TooLarge {
            field: "extension_days",
            value: extension_days,
        })
}
