//! Particles the formulary accepts as arguments, named by symbol

use crate::constants::*;
use formulink_core::CallError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub symbol: &'static str,
    /// Rest mass [kg]
    pub mass: f64,
    /// Charge in units of the elementary charge
    pub charge_number: i32,
}

impl Particle {
    /// Charge [C]
    pub fn charge(&self) -> f64 {
        self.charge_number as f64 * E_CHARGE
    }

    pub fn is_charged(&self) -> bool {
        self.charge_number != 0
    }
}

static PARTICLES: [Particle; 5] = [
    Particle { symbol: "e-", mass: M_E, charge_number: -1 },
    Particle { symbol: "p+", mass: M_P, charge_number: 1 },
    Particle { symbol: "n", mass: M_N, charge_number: 0 },
    Particle { symbol: "alpha", mass: M_ALPHA, charge_number: 2 },
    Particle { symbol: "D+", mass: M_D, charge_number: 1 },
];

/// Look a particle up by symbol or common name
pub fn lookup(name: &str) -> Result<&'static Particle, CallError> {
    let symbol = match name.trim() {
        "e-" | "e" | "electron" => "e-",
        "p+" | "p" | "proton" | "H+" => "p+",
        "n" | "neutron" => "n",
        "alpha" | "He-4 2+" => "alpha",
        "D+" | "deuteron" => "D+",
        other => return Err(CallError::unknown_particle(other)),
    };
    PARTICLES.iter()
        .find(|p| p.symbol == symbol)
        .ok_or_else(|| CallError::unknown_particle(name))
}
