//! Decimal rounding applied to every float written to or read from a delta stream.

use serde::{Deserialize, Serialize};

use crate::error::GhostError;

/// Largest digit count that still fits an f64 mantissa comfortably.
pub const MAX_DIGITS: u32 = 15;

/// How values are rounded when they sit exactly on (or, for directed modes,
/// anywhere between) two representable decimals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MidpointRounding {
    /// Banker's rounding: ties go to the even neighbour.
    #[default]
    ToEven,
    /// Ties go away from zero.
    AwayFromZero,
    /// Directed rounding toward zero.
    ToZero,
    /// Directed rounding toward negative infinity.
    ToNegativeInfinity,
    /// Directed rounding toward positive infinity.
    ToPositiveInfinity,
}

/// Rounds floats to a fixed number of decimal digits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatRounder {
    pub digits: u32,
    pub midpoint: MidpointRounding,
}

impl Default for FloatRounder {
    fn default() -> Self {
        Self {
            digits: 6,
            midpoint: MidpointRounding::ToEven,
        }
    }
}

fn round_half_even(x: f64) -> f64 {
    let r = x.round();
    if (x - x.trunc()).abs() == 0.5 && r % 2.0 != 0.0 {
        r - x.signum()
    } else {
        r
    }
}

impl FloatRounder {
    pub fn new(digits: u32, midpoint: MidpointRounding) -> Result<Self, GhostError> {
        if digits > MAX_DIGITS {
            return Err(GhostError::InvalidConfig {
                reason: format!("rounding digits {digits} exceeds {MAX_DIGITS}"),
            });
        }
        Ok(Self { digits, midpoint })
    }

    pub fn round(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return value;
        }
        let scale = 10f64.powi(self.digits.min(MAX_DIGITS) as i32);
        let x = value as f64 * scale;
        let r = match self.midpoint {
            MidpointRounding::ToEven => round_half_even(x),
            MidpointRounding::AwayFromZero => x.round(),
            MidpointRounding::ToZero => x.trunc(),
            MidpointRounding::ToNegativeInfinity => x.floor(),
            MidpointRounding::ToPositiveInfinity => x.ceil(),
        };
        (r / scale) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounder(digits: u32, midpoint: MidpointRounding) -> FloatRounder {
        FloatRounder::new(digits, midpoint).expect("valid digits")
    }

    #[test]
    fn to_even_ties() {
        let r = rounder(0, MidpointRounding::ToEven);
        assert_eq!(r.round(0.5), 0.0);
        assert_eq!(r.round(1.5), 2.0);
        assert_eq!(r.round(2.5), 2.0);
        assert_eq!(r.round(-2.5), -2.0);
        assert_eq!(r.round(2.6), 3.0);
    }

    #[test]
    fn away_from_zero_ties() {
        let r = rounder(0, MidpointRounding::AwayFromZero);
        assert_eq!(r.round(2.5), 3.0);
        assert_eq!(r.round(-2.5), -3.0);
    }

    #[test]
    fn directed_modes() {
        assert_eq!(rounder(1, MidpointRounding::ToZero).round(-1.27), -1.2);
        assert_eq!(rounder(1, MidpointRounding::ToNegativeInfinity).round(1.27), 1.2);
        assert_eq!(rounder(1, MidpointRounding::ToPositiveInfinity).round(1.21), 1.3);
    }

    #[test]
    fn digits_are_bounded() {
        assert!(FloatRounder::new(16, MidpointRounding::ToEven).is_err());
        assert_eq!(FloatRounder::default().round(0.123_456_78), 0.123_457);
    }

    #[test]
    fn non_finite_passes_through() {
        let r = FloatRounder::default();
        assert!(r.round(f32::NAN).is_nan());
        assert_eq!(r.round(f32::INFINITY), f32::INFINITY);
    }
}
