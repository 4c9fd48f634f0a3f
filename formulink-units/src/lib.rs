//! Formulink Units - unit strings, dimensions and base-unit decomposition
//!
//! Reads unit strings written in two conventions:
//! - the formulary's compact form ("1 / m3", "kg m / s2", "S / m")
//! - the registry's form ("1/m**3", "kg*m/s**2", "radian/s")
//!
//! and re-expresses units in SI base units when the registry does not know a
//! derived symbol (`N`, `S`, `Ohm`).

mod dimension;
mod unit;
mod units;
mod parse;

pub use dimension::{Dimension, BASE_SYMBOLS};
pub use unit::{Unit, UnitError};
pub use units::{UNITS, UnitTable, Grammar};
pub use parse::{parse_unit, decompose, validate_target};
