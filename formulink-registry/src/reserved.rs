//! Identifiers the registry's symbolic layer treats as special
//!
//! Single capitals collide with predefined symbolic constants and
//! operators, the Greek names with built-in functions.

pub static RESERVED_IDENTIFIERS: [&str; 11] = [
    "C", "E", "I", "N", "O", "Q", "S",
    "beta", "gamma", "pi", "zeta",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}
