//! Unit representation with scale factors

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::Dimension;

/// Represents a physical unit with its dimension and scale to base units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "Ohm")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "ohm")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to base units (value_base = value * scale)
    pub scale: f64,
    /// Category for organization (e.g., "length", "electrical")
    pub category: String,
}

impl Unit {
    pub fn new(symbol: &str, name: &str, dimension: Dimension, scale: f64, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            scale,
            category: category.to_string(),
        }
    }

    /// The dimensionless unit with scale 1
    pub fn one() -> Self {
        Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, 1.0, "dimensionless")
    }

    /// A pure number used as a scale factor
    pub fn number(value: f64) -> Self {
        Unit::new(&format_scale(value), "number", Dimension::DIMENSIONLESS, value, "dimensionless")
    }

    /// Check if two units are dimensionally compatible
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{} {}", self.symbol, other.symbol).trim().to_string(),
            name: format!("{} {}", self.name, other.name),
            dimension: self.dimension.multiply(&other.dimension),
            scale: self.scale * other.scale,
            category: "derived".to_string(),
        }
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{} / {}", self.symbol, other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            scale: self.scale / other.scale,
            category: "derived".to_string(),
        }
    }

    /// Raise unit to an integer power (e.g., m**3)
    pub fn power(&self, exp: i32) -> Unit {
        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}**{}", self.symbol, exp)
        };

        Unit {
            symbol,
            name: format!("{} to the {}", self.name, exp),
            dimension: self.dimension.power(exp),
            scale: self.scale.powi(exp),
            category: self.category.clone(),
        }
    }

    /// Re-express the unit in base units only
    pub fn decompose(&self) -> Unit {
        Unit {
            symbol: self.to_compact_string(),
            name: format!("{} in base units", self.name),
            dimension: self.dimension,
            scale: self.scale,
            category: self.category.clone(),
        }
    }

    /// Compact base-unit form: `"<scale> num / den"` with `**n` powers.
    ///
    /// Factors are ordered by power, highest first. A denominator with more
    /// than one factor is parenthesised. A dimensionless unit of scale 1 is
    /// the empty string.
    pub fn to_compact_string(&self) -> String {
        let mut num: Vec<(&str, i32)> = self.dimension.factors().filter(|(_, e)| *e > 0).collect();
        let mut den: Vec<(&str, i32)> = self.dimension.factors().filter(|(_, e)| *e < 0).collect();
        num.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        den.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let mut out = String::new();
        if (self.scale - 1.0).abs() > f64::EPSILON * 16.0 {
            out.push_str(&format_scale(self.scale));
        }

        let num_str: Vec<String> = num.iter().map(|(s, e)| format_factor(s, *e)).collect();
        if !num_str.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&num_str.join(" "));
        }

        if !den.is_empty() {
            if out.is_empty() {
                out.push('1');
            }
            let den_str: Vec<String> = den.iter().map(|(s, e)| format_factor(s, e.saturating_neg())).collect();
            if den_str.len() == 1 {
                out.push_str(&format!(" / {}", den_str[0]));
            } else {
                out.push_str(&format!(" / ({})", den_str.join(" ")));
            }
        }

        out
    }
}

fn format_factor(symbol: &str, exp: i32) -> String {
    if exp == 1 {
        symbol.to_string()
    } else {
        format!("{}**{}", symbol, exp)
    }
}

fn format_scale(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-3..1e6).contains(&abs) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors raised while reading a unit string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Unknown unit symbol
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Malformed unit expression
    #[error("invalid unit syntax at position {position} in '{text}': {message}")]
    Syntax {
        text: String,
        position: usize,
        message: String,
    },

    /// Exponent that is not an integer
    #[error("invalid exponent: {0}")]
    BadExponent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, 1.0, "time")
    }

    #[test]
    fn test_compatible_units() {
        assert!(meter().is_compatible(&kilometer()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_unit_power() {
        let m3 = meter().power(3);
        assert_eq!(m3.symbol, "m**3");
        assert_eq!(m3.dimension, Dimension::LENGTH.power(3));
        assert_eq!(kilometer().power(2).scale, 1e6);
    }

    #[test]
    fn test_unit_divide() {
        let velocity = meter().divide(&second());
        assert_eq!(velocity.dimension, Dimension::VELOCITY);
        assert_eq!(velocity.symbol, "m / s");
    }

    #[test]
    fn test_compact_string_force() {
        let newton = Unit::new("N", "newton", Dimension::FORCE, 1.0, "force");
        assert_eq!(newton.to_compact_string(), "kg m / s**2");
    }

    #[test]
    fn test_compact_string_parenthesised_denominator() {
        let conductivity = Unit::new("S / m", "", Dimension::CONDUCTANCE.divide(&Dimension::LENGTH), 1.0, "");
        assert_eq!(conductivity.to_compact_string(), "s**3 A**2 / (kg m**3)");
    }

    #[test]
    fn test_compact_string_pure_denominator() {
        let density = Unit::new("1 / m3", "", Dimension::NUMBER_DENSITY, 1.0, "");
        assert_eq!(density.to_compact_string(), "1 / m**3");
    }

    #[test]
    fn test_compact_string_scaled() {
        let kn = Unit::new("kN", "kilonewton", Dimension::FORCE, 1000.0, "force");
        assert_eq!(kn.to_compact_string(), "1000 kg m / s**2");
    }

    #[test]
    fn test_compact_string_dimensionless() {
        assert_eq!(Unit::one().to_compact_string(), "");
    }
}
