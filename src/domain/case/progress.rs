//! Progress estimator.

use super::{CaseStatus, ConfigurationError};
use crate::domain::foundation::{Percentage, Timestamp};

/// Fraction of the allotted days already consumed, as a percentage.
///
/// Closed cases report 100. Open cases divide floored elapsed days by
/// `standard_days` plus `extension_days` when the deadline was extended,
/// clamped to `[0, 100]`.
///
/// # Errors
///
/// - `NonPositiveTotalDays` if the allotted total is zero or negative
pub fn estimate_progress(
    now: &Timestamp,
    registered_at: &Timestamp,
    is_extended: bool,
    standard_days: i64,
    extension_days: i64,
    status: CaseStatus,
) -> Result<Percentage, ConfigurationError> {
    if !status.is_open() {
        return Ok(Percentage::HUNDRED);
    }

    let total = standard_days + if is_extended { extension_days } else { 0 };
    if total <= 0 {
        return Err(ConfigurationError::NonPositiveTotalDays { total });
    }

    let elapsed = now.whole_days_since(registered_at);
    Ok(Percentage::from_ratio(elapsed as f64, total as f64))
}
