//! Unit definitions - SI base, derived and plasma-physics units with prefixes

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use crate::{Unit, Dimension};

/// Global unit table
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// Which unit-string convention is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// The formulary's convention: whitespace products, `**n`, `^n`, `m3`
    Source,
    /// The registry's convention: `*`, `/`, `**`, parentheses, numbers
    Target,
}

/// SI prefixes, longest first so `da` wins over `d`
const PREFIXES: [(&str, f64); 20] = [
    ("da", 1e1),
    ("Y", 1e24), ("Z", 1e21), ("E", 1e18), ("P", 1e15), ("T", 1e12),
    ("G", 1e9), ("M", 1e6), ("k", 1e3), ("h", 1e2),
    ("d", 1e-1), ("c", 1e-2), ("m", 1e-3), ("u", 1e-6), ("µ", 1e-6),
    ("n", 1e-9), ("p", 1e-12), ("f", 1e-15), ("a", 1e-18), ("z", 1e-21),
];

/// Table of all known units
pub struct UnitTable {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    prefixable: HashSet<String>,
    source_only: HashSet<String>,
}

impl UnitTable {
    pub fn new() -> Self {
        let mut table = UnitTable {
            units: HashMap::new(),
            aliases: HashMap::new(),
            prefixable: HashSet::new(),
            source_only: HashSet::new(),
        };
        table.register_all_units();
        table
    }

    /// Look up a symbol as the given grammar reads it, resolving SI prefixes
    pub fn lookup(&self, symbol: &str, grammar: Grammar) -> Option<Unit> {
        if let Some(unit) = self.get_direct(symbol) {
            return self.accepts(&unit.symbol, grammar).then(|| unit.clone());
        }

        for (prefix, factor) in PREFIXES {
            if let Some(rest) = symbol.strip_prefix(prefix) {
                if rest.is_empty() || !self.prefixable.contains(rest) {
                    continue;
                }
                let base = self.units.get(rest)?;
                if !self.accepts(rest, grammar) {
                    return None;
                }
                let mut unit = base.clone();
                unit.symbol = symbol.to_string();
                unit.name = format!("{}{}", prefix, base.name);
                unit.scale = base.scale * factor;
                return Some(unit);
            }
        }
        None
    }

    /// Direct lookup by symbol or alias, no prefixes
    pub fn get_direct(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases.get(symbol).and_then(|canonical| self.units.get(canonical))
    }

    /// Whether the grammar recognises this canonical symbol
    pub fn accepts(&self, symbol: &str, grammar: Grammar) -> bool {
        grammar == Grammar::Source || !self.source_only.contains(symbol)
    }

    /// Symbols the registry grammar does not recognise
    pub fn source_only_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.source_only.iter().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values()
            .filter(|u| u.category == category)
            .collect()
    }

    fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn register_prefixed(&mut self, unit: Unit) {
        self.prefixable.insert(unit.symbol.clone());
        self.register(unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn source_only(&mut self, symbol: &str) {
        self.source_only.insert(symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_base_units();
        self.register_time_units();
        self.register_mechanical_units();
        self.register_electrical_units();
        self.register_angle_units();
    }

    fn register_base_units(&mut self) {
        self.register_prefixed(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length"));
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass"));
        self.register_prefixed(Unit::new("g", "gram", Dimension::MASS, 1e-3, "mass"));
        self.register_prefixed(Unit::new("s", "second", Dimension::TIME, 1.0, "time"));
        self.register_prefixed(Unit::new("A", "ampere", Dimension::CURRENT, 1.0, "current"));
        self.register_prefixed(Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature"));
        self.register_prefixed(Unit::new("mol", "mole", Dimension::AMOUNT, 1.0, "amount"));
        self.register_prefixed(Unit::new("cd", "candela", Dimension::LUMINOSITY, 1.0, "luminosity"));

        self.alias("meter", "m");
        self.alias("kilogram", "kg");
        self.alias("second", "s");
        self.alias("ampere", "A");
        self.alias("kelvin", "K");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time"));
        self.register_prefixed(Unit::new("Hz", "hertz", Dimension::FREQUENCY, 1.0, "frequency"));

        self.alias("hertz", "Hz");
    }

    fn register_mechanical_units(&mut self) {
        self.register_prefixed(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force"));
        self.register_prefixed(Unit::new("J", "joule", Dimension::ENERGY, 1.0, "energy"));
        self.register_prefixed(Unit::new("eV", "electronvolt", Dimension::ENERGY, 1.602176634e-19, "energy"));
        self.register_prefixed(Unit::new("erg", "erg", Dimension::ENERGY, 1e-7, "energy"));
        self.register_prefixed(Unit::new("W", "watt", Dimension::POWER, 1.0, "power"));
        self.register_prefixed(Unit::new("Pa", "pascal", Dimension::PRESSURE, 1.0, "pressure"));
        self.register_prefixed(Unit::new("l", "liter", Dimension::LENGTH.power(3), 1e-3, "volume"));

        self.alias("newton", "N");
        self.alias("joule", "J");
        self.alias("electronvolt", "eV");
        self.alias("watt", "W");
        self.alias("pascal", "Pa");

        self.source_only("N");
    }

    fn register_electrical_units(&mut self) {
        self.register_prefixed(Unit::new("C", "coulomb", Dimension::CHARGE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("V", "volt", Dimension::VOLTAGE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("Ohm", "ohm", Dimension::RESISTANCE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("S", "siemens", Dimension::CONDUCTANCE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("F", "farad", Dimension::CAPACITANCE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("H", "henry", Dimension::INDUCTANCE, 1.0, "electrical"));
        self.register_prefixed(Unit::new("T", "tesla", Dimension::MAGNETIC_FIELD, 1.0, "magnetic"));
        self.register_prefixed(Unit::new("G", "gauss", Dimension::MAGNETIC_FIELD, 1e-4, "magnetic"));
        self.register_prefixed(Unit::new("Wb", "weber", Dimension::MAGNETIC_FLUX, 1.0, "magnetic"));

        self.alias("coulomb", "C");
        self.alias("volt", "V");
        self.alias("ohm", "Ohm");
        self.alias("Ω", "Ohm");
        self.alias("siemens", "S");
        self.alias("tesla", "T");

        self.source_only("Ohm");
        self.source_only("S");
    }

    fn register_angle_units(&mut self) {
        self.register_prefixed(Unit::new("rad", "radian", Dimension::ANGLE, 1.0, "angle"));
        self.register(Unit::new("radian", "radian", Dimension::ANGLE, 1.0, "angle"));
        self.register(Unit::new("deg", "degree", Dimension::ANGLE, std::f64::consts::PI / 180.0, "angle"));
        self.register(Unit::new("sr", "steradian", Dimension::ANGLE.power(2), 1.0, "angle"));

        self.alias("degree", "deg");
        self.alias("steradian", "sr");

        self.source_only("rad");
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_lookup() {
        let m = UNITS.lookup("m", Grammar::Target).unwrap();
        assert_eq!(m.dimension, Dimension::LENGTH);
        assert_eq!(UNITS.lookup("mol", Grammar::Target).unwrap().dimension, Dimension::AMOUNT);
    }

    #[test]
    fn test_prefixed_lookup() {
        let km = UNITS.lookup("km", Grammar::Source).unwrap();
        assert_eq!(km.scale, 1e3);
        let kev = UNITS.lookup("keV", Grammar::Target).unwrap();
        assert_eq!(kev.dimension, Dimension::ENERGY);
        assert!((kev.scale - 1.602176634e-16).abs() < 1e-28);
    }

    #[test]
    fn test_source_only_units() {
        for symbol in ["N", "S", "Ohm", "rad", "kN", "mrad"] {
            assert!(UNITS.lookup(symbol, Grammar::Source).is_some(), "{} should be known", symbol);
            assert!(UNITS.lookup(symbol, Grammar::Target).is_none(), "{} should be rejected", symbol);
        }
        assert_eq!(UNITS.source_only_symbols(), vec!["N", "Ohm", "S", "rad"]);
    }

    #[test]
    fn test_radian_spelled_out_is_accepted() {
        assert!(UNITS.lookup("radian", Grammar::Target).is_some());
    }

    #[test]
    fn test_non_prefixable_units() {
        assert!(UNITS.lookup("kkg", Grammar::Source).is_none());
        assert!(UNITS.lookup("kradian", Grammar::Source).is_none());
        assert_eq!(UNITS.lookup("h", Grammar::Source).unwrap().name, "hour");
    }

    #[test]
    fn test_by_category() {
        let electrical = UNITS.by_category("electrical");
        assert!(electrical.iter().any(|u| u.symbol == "Ohm"));
    }
}
