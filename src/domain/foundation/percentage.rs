//! Percentage value object (0-100 scale, fractional).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
///
/// Fractional so that 13 of 15 days renders as 86.7% rather than 86%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a new Percentage, clamping to the valid range.
    ///
    /// NaN clamps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Percentage from a `part / whole` ratio, clamped.
    pub fn from_ratio(part: f64, whole: f64) -> Self {
        Self::new(part / whole * 100.0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value rounded to one decimal place.
    pub fn rounded(&self) -> f64 {
        (self.0 * 10.0).round() / 10.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_range() {
        assert_eq!(Percentage::new(-5.0), Percentage::ZERO);
        assert_eq!(Percentage::new(140.0), Percentage::HUNDRED);
        assert_eq!(Percentage::new(42.5).value(), 42.5);
    }

    #[test]
    fn percentage_new_treats_nan_as_zero() {
        assert_eq!(Percentage::new(f64::NAN), Percentage::ZERO);
    }

    #[test]
    fn from_ratio_computes_share() {
        let pct = Percentage::from_ratio(13.0, 15.0);
        assert_eq!(pct.rounded(), 86.7);
    }

    #[test]
    fn percentage_displays_one_decimal() {
        assert_eq!(Percentage::from_ratio(13.0, 15.0).to_string(), "86.7%");
        assert_eq!(Percentage::HUNDRED.to_string(), "100.0%");
    }
}
