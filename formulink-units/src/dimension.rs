//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 8-element vector:
//! [length, mass, time, current, temperature, amount, luminosity, angle]
//!
//! Angle is kept as its own base so that `rad` survives decomposition the
//! same way the source library treats it.

use std::fmt;
use serde::{Serialize, Deserialize};

/// SI base unit symbol for each dimension index
pub const BASE_SYMBOLS: [&str; 8] = ["m", "kg", "s", "A", "K", "mol", "cd", "rad"];

/// Represents the dimensions of a physical quantity
/// as exponents of the base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; 8],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0, 0] };

    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0, 0] };
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0, 0] };
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0, 0] };
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0, 0] };
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0, 0] };
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0, 0] };
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1, 0] };
    pub const ANGLE: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0, 1] };

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension { exponents: [1, 0, -1, 0, 0, 0, 0, 0] };

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0, 0] };

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0, 0, 0] };

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0, 0, 0] };

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0, 0, 0] };

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0, 0, 0, 0] };

    /// Angular frequency [A T^-1]
    pub const ANGULAR_FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0, 0, 0, 1] };

    /// Number density [L^-3]
    pub const NUMBER_DENSITY: Dimension = Dimension { exponents: [-3, 0, 0, 0, 0, 0, 0, 0] };

    /// Mass density [M L^-3]
    pub const MASS_DENSITY: Dimension = Dimension { exponents: [-3, 1, 0, 0, 0, 0, 0, 0] };

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension { exponents: [0, 0, 1, 1, 0, 0, 0, 0] };

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension = Dimension { exponents: [2, 1, -3, -1, 0, 0, 0, 0] };

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension = Dimension { exponents: [2, 1, -3, -2, 0, 0, 0, 0] };

    /// Conductance [M^-1 L^-2 T^3 I^2]
    pub const CONDUCTANCE: Dimension = Dimension { exponents: [-2, -1, 3, 2, 0, 0, 0, 0] };

    /// Capacitance [M^-1 L^-2 T^4 I^2]
    pub const CAPACITANCE: Dimension = Dimension { exponents: [-2, -1, 4, 2, 0, 0, 0, 0] };

    /// Inductance [M L^2 T^-2 I^-2]
    pub const INDUCTANCE: Dimension = Dimension { exponents: [2, 1, -2, -2, 0, 0, 0, 0] };

    /// Magnetic flux density [M T^-2 I^-1]
    pub const MAGNETIC_FIELD: Dimension = Dimension { exponents: [0, 1, -2, -1, 0, 0, 0, 0] };

    /// Magnetic flux [M L^2 T^-2 I^-1]
    pub const MAGNETIC_FLUX: Dimension = Dimension { exponents: [2, 1, -2, -1, 0, 0, 0, 0] };

    pub fn new(exponents: [i32; 8]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 8];
        for (i, r) in result.iter_mut().enumerate() {
            *r = self.exponents[i].saturating_add(other.exponents[i]);
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 8];
        for (i, r) in result.iter_mut().enumerate() {
            *r = self.exponents[i].saturating_sub(other.exponents[i]);
        }
        Dimension { exponents: result }
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        let mut result = [0i32; 8];
        for (i, r) in result.iter_mut().enumerate() {
            *r = self.exponents[i].saturating_mul(exp);
        }
        Dimension { exponents: result }
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// Base-unit factors with non-zero exponents, in index order
    pub fn factors(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.exponents.iter()
            .enumerate()
            .filter(|&(_, &e)| e != 0)
            .map(|(i, &e)| (BASE_SYMBOLS[i], e))
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0, 0] => Some("current"),
            [0, 0, 0, 0, 1, 0, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0, 0] => Some("amount"),
            [0, 0, 0, 0, 0, 0, 1, 0] => Some("luminosity"),
            [0, 0, 0, 0, 0, 0, 0, 1] => Some("angle"),
            [1, 0, -1, 0, 0, 0, 0, 0] => Some("velocity"),
            [1, 1, -2, 0, 0, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0, 0, 0] => Some("pressure"),
            [0, 0, -1, 0, 0, 0, 0, 0] => Some("frequency"),
            [0, 0, -1, 0, 0, 0, 0, 1] => Some("angular frequency"),
            [-3, 0, 0, 0, 0, 0, 0, 0] => Some("number density"),
            [-3, 1, 0, 0, 0, 0, 0, 0] => Some("mass density"),
            [0, 1, -2, -1, 0, 0, 0, 0] => Some("magnetic field"),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J", "A"];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(names[i].to_string());
                } else {
                    parts.push(format!("{}^{}", names[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_multiply() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_conductance_inverts_resistance() {
        assert_eq!(Dimension::RESISTANCE.invert(), Dimension::CONDUCTANCE);
    }

    #[test]
    fn test_densities() {
        assert_eq!(Dimension::LENGTH.power(-3), Dimension::NUMBER_DENSITY);
        assert_eq!(Dimension::MASS.multiply(&Dimension::NUMBER_DENSITY), Dimension::MASS_DENSITY);
    }

    #[test]
    fn test_factors() {
        let f: Vec<_> = Dimension::FORCE.factors().collect();
        assert_eq!(f, vec![("m", 1), ("kg", 1), ("s", -2)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::VELOCITY), "L T^-1");
    }
}
