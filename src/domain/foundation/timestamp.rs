//! Timestamp value object for immutable points in time.
//!
//! All case clocks run in UTC. Day counts are floor divisions of the signed
//! duration, so "half a day overdue" is already one day overdue.

use chrono::{DateTime, Datelike, Duration, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Whole days from `other` to `self`, rounded toward negative infinity.
    pub fn whole_days_since(&self, other: &Timestamp) -> i64 {
        floor_days(self.duration_since(other))
    }

    /// Adds whole days, or `None` when the result leaves chrono's range.
    ///
    /// Negative values subtract days.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    #[cfg(test)]
    pub(crate) fn add_days(&self, days: i64) -> Self {
        self.checked_add_days(days).expect("day offset in range")
    }

    /// Calendar year in UTC.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month (1-12) in UTC.
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// `chrono` truncates toward zero; deadlines need floor semantics.
fn floor_days(duration: Duration) -> i64 {
    let days = duration.num_days();
    if duration < Duration::days(days) {
        days - 1
    } else {
        days
    }
}
