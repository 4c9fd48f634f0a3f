//! Formulary modules
//!
//! Every function is built as a `SourceFunction`: a descriptor with unit
//! annotations and numpydoc-style documentation, plus a body computing the
//! value in SI units.

pub mod parameters;
pub mod dimensionless;
pub mod quantum;
pub mod relativity;
pub mod collisions;
pub mod ionization;
pub mod mathematics;

use formulink_core::UnitAnnotation;

pub(crate) fn particle_type() -> UnitAnnotation {
    UnitAnnotation::type_name("<class 'formulink_formulary::particles::Particle'>")
}

pub(crate) fn bool_type() -> UnitAnnotation {
    UnitAnnotation::type_name("<class 'bool'>")
}

pub(crate) fn str_type() -> UnitAnnotation {
    UnitAnnotation::type_name("<class 'str'>")
}

pub(crate) fn optional_real() -> UnitAnnotation {
    UnitAnnotation::type_name("typing.Optional[numbers.Real]")
}

/// Number density or mass density
pub(crate) fn density_union() -> UnitAnnotation {
    UnitAnnotation::one_of(&["1 / m3", "kg / m3"])
}
