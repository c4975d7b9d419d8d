use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A value clamped to [0.0, 1.0] on every write, including deserialization.
///
/// Used for success rates, edge strengths, and confidences.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Rate(f64);

impl Rate {
    pub const ZERO: Rate = Rate(0.0);
    pub const ONE: Rate = Rate(1.0);

    /// Create a new Rate, clamping to [0.0, 1.0]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return a new rate shifted by `delta`, clamped.
    pub fn adjusted(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self(0.5)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Rate {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Rate> for f64 {
    fn from(r: Rate) -> Self {
        r.0
    }
}

impl Add for Rate {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Rate {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for Rate {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deserialization_clamps() {
        let r: Rate = serde_json::from_str("1.7").unwrap();
        assert_eq!(r.value(), 1.0);
        let r: Rate = serde_json::from_str("-0.2").unwrap();
        assert_eq!(r.value(), 0.0);
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Rate::new(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn nan_is_zero() {
        assert_eq!(Rate::new(f64::NAN).value(), 0.0);
    }

    proptest! {
        #[test]
        fn adjusted_stays_in_unit_interval(start in -5.0f64..5.0, delta in -5.0f64..5.0) {
            let r = Rate::new(start).adjusted(delta);
            prop_assert!((0.0..=1.0).contains(&r.value()));
        }
    }
}
