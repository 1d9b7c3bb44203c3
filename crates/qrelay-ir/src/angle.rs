//! Rotation angles.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::Add;

/// A rotation angle.
///
/// Angles that are rational multiples of π are kept exact so that emitted
/// programs read `pi/4` rather than a truncated decimal, and so that merged
/// rotations can be recognised as full turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    /// `numerator * π / denominator`, always stored in lowest terms.
    PiFraction {
        /// Signed numerator.
        numerator: i64,
        /// Positive denominator.
        denominator: u32,
    },
    /// A raw value in radians.
    Radians(f64),
}

impl Angle {
    /// Zero rotation.
    pub const ZERO: Angle = Angle::PiFraction {
        numerator: 0,
        denominator: 1,
    };

    /// `numerator * π / denominator`, reduced to lowest terms.
    ///
    /// A zero denominator is treated as one.
    pub fn pi_fraction(numerator: i64, denominator: u32) -> Self {
        let denominator = denominator.max(1);
        let g = gcd(numerator.unsigned_abs(), u64::from(denominator)).max(1);
        Angle::PiFraction {
            numerator: numerator / g as i64,
            denominator: (u64::from(denominator) / g) as u32,
        }
    }

    /// `π / denominator`.
    pub fn pi_over(denominator: u32) -> Self {
        Self::pi_fraction(1, denominator)
    }

    /// A raw angle in radians.
    pub fn radians(value: f64) -> Self {
        Angle::Radians(value)
    }

    /// The angle in radians.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Angle::PiFraction {
                numerator,
                denominator,
            } => numerator as f64 * PI / f64::from(denominator),
            Angle::Radians(value) => value,
        }
    }

    /// Whether this is exactly zero.
    pub fn is_zero(&self) -> bool {
        match *self {
            Angle::PiFraction { numerator, .. } => numerator == 0,
            Angle::Radians(value) => value == 0.0,
        }
    }

    /// Whether this is an exact whole number of full turns (2kπ).
    ///
    /// Only exact fractions qualify; radian values are never rounded.
    pub fn is_full_turn(&self) -> bool {
        match *self {
            Angle::PiFraction {
                numerator,
                denominator,
            } => numerator % (2 * i64::from(denominator)) == 0,
            Angle::Radians(value) => value == 0.0,
        }
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        match (self, rhs) {
            (
                Angle::PiFraction {
                    numerator: n1,
                    denominator: d1,
                },
                Angle::PiFraction {
                    numerator: n2,
                    denominator: d2,
                },
            ) => {
                let d1_wide = i64::from(d1);
                let d2_wide = i64::from(d2);
                let g = gcd(u64::from(d1), u64::from(d2)).max(1) as i64;
                let lcm = d1_wide / g * d2_wide;
                let numerator = n1 * (lcm / d1_wide) + n2 * (lcm / d2_wide);
                match u32::try_from(lcm) {
                    Ok(denominator) => Angle::pi_fraction(numerator, denominator),
                    Err(_) => Angle::Radians(self.as_f64() + rhs.as_f64()),
                }
            }
            _ => Angle::Radians(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Radians(value)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Angle::PiFraction { numerator: 0, .. } => write!(f, "0"),
            Angle::PiFraction {
                numerator,
                denominator,
            } => {
                let sign = if numerator < 0 { "-" } else { "" };
                let magnitude = numerator.unsigned_abs();
                match (magnitude, denominator) {
                    (1, 1) => write!(f, "{sign}pi"),
                    (m, 1) => write!(f, "{sign}{m}*pi"),
                    (1, d) => write!(f, "{sign}pi/{d}"),
                    (m, d) => write!(f, "{sign}{m}*pi/{d}"),
                }
            }
            Angle::Radians(value) => write!(f, "{value}"),
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Angle::pi_over(2).to_string(), "pi/2");
        assert_eq!(Angle::pi_over(4).to_string(), "pi/4");
        assert_eq!(Angle::pi_fraction(-3, 4).to_string(), "-3*pi/4");
        assert_eq!(Angle::pi_fraction(2, 2).to_string(), "pi");
        assert_eq!(Angle::ZERO.to_string(), "0");
        assert_eq!(Angle::radians(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_reduction() {
        assert_eq!(Angle::pi_fraction(2, 8), Angle::pi_over(4));
        assert_eq!(Angle::pi_fraction(0, 7), Angle::ZERO);
    }

    #[test]
    fn test_exact_addition() {
        let sum = Angle::pi_over(4) + Angle::pi_over(4);
        assert_eq!(sum, Angle::pi_over(2));

        let full = Angle::pi_over(2) + Angle::pi_fraction(3, 2);
        assert!(full.is_full_turn());
        assert!(!full.is_zero());
    }

    #[test]
    fn test_mixed_addition_falls_back_to_radians() {
        let sum = Angle::pi_over(4) + Angle::radians(0.1);
        assert!(matches!(sum, Angle::Radians(_)));
        assert!((sum.as_f64() - (PI / 4.0 + 0.1)).abs() < 1e-12);
    }
}
