//! Output and argument unit resolution

use crate::normalize::{normalize_unit, DIMENSIONLESS};
use formulink_core::FunctionDescriptor;
use std::collections::BTreeMap;

/// Output unit of an angular rate
pub const ANGULAR_RATE: &str = "radian/s";

/// Output unit of the same rate as a frequency
pub const FREQUENCY: &str = "Hz";

/// Registry unit of a function's return value.
///
/// `to_hz` overrides the function's own `to_hz` default; a wrapper that has
/// already bound the flag passes it here because its signature no longer
/// shows it.
pub fn output_unit(func: &FunctionDescriptor, to_hz: Option<bool>) -> String {
    match to_hz.or_else(|| func.to_hz_default()) {
        Some(true) => FREQUENCY.to_string(),
        Some(false) => ANGULAR_RATE.to_string(),
        None => match func.returns.as_ref().and_then(|r| r.compact()) {
            Some(unit) => normalize_unit(unit, None),
            None => DIMENSIONLESS.to_string(),
        },
    }
}

/// Registry unit of every parameter, hidden ones included
pub fn arg_units(func: &FunctionDescriptor) -> BTreeMap<String, String> {
    func.params.iter()
        .map(|p| (p.name.clone(), normalize_unit(&p.annotation, Some(func.name.as_str()))))
        .collect()
}
