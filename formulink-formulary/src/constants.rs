//! Physical constants in SI units (CODATA 2018)

use std::f64::consts::PI;

/// Elementary charge [C]
pub const E_CHARGE: f64 = 1.602176634e-19;

/// Electron mass [kg]
pub const M_E: f64 = 9.1093837015e-31;

/// Proton mass [kg]
pub const M_P: f64 = 1.67262192369e-27;

/// Neutron mass [kg]
pub const M_N: f64 = 1.67492749804e-27;

/// Alpha particle mass [kg]
pub const M_ALPHA: f64 = 6.6446573357e-27;

/// Deuteron mass [kg]
pub const M_D: f64 = 3.3435837724e-27;

/// Vacuum permittivity [F/m]
pub const EPSILON_0: f64 = 8.8541878128e-12;

/// Vacuum permeability [N/A^2]
pub const MU_0: f64 = 1.25663706212e-6;

/// Boltzmann constant [J/K]
pub const K_B: f64 = 1.380649e-23;

/// Speed of light [m/s]
pub const C: f64 = 299_792_458.0;

/// Planck constant [J s]
pub const H: f64 = 6.62607015e-34;

/// Reduced Planck constant [J s]
pub const HBAR: f64 = H / (2.0 * PI);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_of_light_from_vacuum_constants() {
        let c = 1.0 / (EPSILON_0 * MU_0).sqrt();
        assert!((c - C).abs() / C < 1e-9);
    }
}
