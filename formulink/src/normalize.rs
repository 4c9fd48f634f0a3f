//! Unit normalization from the formulary's convention to the registry's
//!
//! The formulary writes units as `"1 / m**3"`, `"rad / s"` or `"Ohm m"`.
//! The registry accepts `*`-joined factors with no whitespace, does not know
//! the derived names `S`, `N` and `Ohm`, and spells radians out. Dimensionless
//! values use the sentinel `m/m`.

use formulink_core::UnitAnnotation;
use formulink_units::{decompose, parse_unit, Dimension, Grammar};
use tracing::debug;

/// Unit string standing in for "no physical unit"
pub const DIMENSIONLESS: &str = "m/m";

/// Markers of an annotation that names a type rather than a unit
const TYPE_LEAKS: [&str; 3] = ["class", "typing", "Union"];

/// Derived unit names the registry grammar does not recognise
const UNACCEPTED: [&str; 3] = ["S", "N", "Ohm"];

/// The function that takes a number density where others take a mass density
const NUMBER_DENSITY_FUNCTION: &str = "mass_density";

/// Anything a unit annotation can be read from
pub trait UnitSource {
    /// The text itself, when the source already is a string
    fn as_unit_str(&self) -> Option<&str> {
        None
    }

    /// Preferred compact representation, if the source has one
    fn compact(&self) -> Option<String>;

    /// Generic string conversion
    fn generic(&self) -> String;
}

impl UnitSource for str {
    fn as_unit_str(&self) -> Option<&str> {
        Some(self)
    }

    fn compact(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn generic(&self) -> String {
        self.to_string()
    }
}

impl UnitSource for String {
    fn as_unit_str(&self) -> Option<&str> {
        Some(self)
    }

    fn compact(&self) -> Option<String> {
        Some(self.clone())
    }

    fn generic(&self) -> String {
        self.clone()
    }
}

impl UnitSource for UnitAnnotation {
    fn compact(&self) -> Option<String> {
        UnitAnnotation::compact(self).map(str::to_string)
    }

    fn generic(&self) -> String {
        self.to_string()
    }
}

/// A missing annotation reads as the empty unit
impl UnitSource for Option<UnitAnnotation> {
    fn compact(&self) -> Option<String> {
        self.as_ref().and_then(<UnitAnnotation as UnitSource>::compact)
    }

    fn generic(&self) -> String {
        self.as_ref().map(<UnitAnnotation as UnitSource>::generic).unwrap_or_default()
    }
}

impl<T: UnitSource + ?Sized> UnitSource for &T {
    fn as_unit_str(&self) -> Option<&str> {
        (**self).as_unit_str()
    }

    fn compact(&self) -> Option<String> {
        (**self).compact()
    }

    fn generic(&self) -> String {
        (**self).generic()
    }
}

/// Convert a unit annotation to a registry unit string. Never fails.
///
/// `func_name` is the function the annotation belongs to; it only matters
/// for the number-density/mass-density union.
pub fn normalize_unit<S: UnitSource + ?Sized>(source: &S, func_name: Option<&str>) -> String {
    let mut text = match source.as_unit_str() {
        Some(s) => s.to_string(),
        None => source.compact().unwrap_or_else(|| source.generic()),
    };

    if is_density_union(&text) {
        return if func_name == Some(NUMBER_DENSITY_FUNCTION) {
            "1/m**3".to_string()
        } else {
            "kg/m**3".to_string()
        };
    }

    if TYPE_LEAKS.iter().any(|leak| text.contains(leak)) {
        return DIMENSIONLESS.to_string();
    }

    if UNACCEPTED.iter().any(|name| text.contains(name)) {
        match decompose(&text) {
            Ok(unit) => text = unit.symbol,
            Err(e) => debug!(unit = %text, error = %e, "Keeping unit that does not decompose"),
        }
    }

    text = text.replace(" / ", "/").replace(" * ", "*").replace(' ', "*");

    if !text.contains("radian") {
        text = text.replace("rad", "radian");
    }

    if text.is_empty() {
        return DIMENSIONLESS.to_string();
    }
    text
}

/// A two-member list of a number density and a mass density, in either order
fn is_density_union(text: &str) -> bool {
    let Some(inner) = text.trim().strip_prefix('[').and_then(|t| t.strip_suffix(']')) else {
        return false;
    };
    let members: Vec<&str> = inner.split(',').collect();
    if members.len() != 2 {
        return false;
    }

    let mut dims = Vec::with_capacity(2);
    for member in members {
        let member = member.trim();
        let member = member
            .strip_prefix("Unit(")
            .and_then(|m| m.strip_suffix(')'))
            .unwrap_or(member)
            .trim_matches(|c| c == '"' || c == '\'');
        match parse_unit(member, Grammar::Source) {
            Ok(unit) => dims.push(unit.dimension),
            Err(_) => return false,
        }
    }
    dims.contains(&Dimension::NUMBER_DENSITY) && dims.contains(&Dimension::MASS_DENSITY)
}
