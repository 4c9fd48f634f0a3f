//! Quantum plasma parameters

use super::particle_type;
use crate::args::{self, quantity};
use crate::constants::*;
use formulink_core::prelude::*;
use std::f64::consts::PI;

pub const PATH: &str = "plasma.formulary.quantum";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(debroglie_wavelength())
        .with_function(thermal_debroglie_wavelength())
        .with_function(fermi_energy())
        .with_alias("Ef_", "Fermi_energy")
        .with_function(thomas_fermi_length())
        .with_function(wigner_seitz_radius())
}

/// Electron Fermi energy [J]
pub(crate) fn fermi_energy_value(n_e: f64) -> f64 {
    HBAR.powi(2) / (2.0 * M_E) * (3.0 * PI.powi(2) * n_e).powf(2.0 / 3.0)
}

const DEBROGLIE_WAVELENGTH_DOC: &str = r#"Return the de Broglie wavelength.

    Parameters
    ----------
    V : ~formulink.Quantity
        Particle velocity in units convertible to meters per second.

    particle : str
        Representation of the particle species.

    Returns
    -------
    lambda_dB : ~formulink.Quantity
        The de Broglie wavelength in units of meters.
    "#;

pub fn debroglie_wavelength() -> SourceFunction {
    let desc = FunctionDescriptor::new("deBroglie_wavelength")
        .param(ParamDescriptor::required("V", UnitAnnotation::unit("m / s")))
        .param(ParamDescriptor::required("particle", particle_type()))
        .returns(UnitAnnotation::unit("m"))
        .doc(DEBROGLIE_WAVELENGTH_DOC);
    SourceFunction::new(desc, |a| {
        let f = "deBroglie_wavelength";
        let v = args::number(f, a, 0, "V")?.abs();
        let p = args::particle(f, a, 1, "particle")?;
        if v >= C {
            return Err(CallError::domain_error(f, "velocity must be less than the speed of light"));
        }
        if v == 0.0 {
            return Ok(quantity(f64::INFINITY, "m"));
        }
        let gamma = 1.0 / (1.0 - (v / C).powi(2)).sqrt();
        Ok(quantity(H / (gamma * p.mass * v), "m"))
    })
}

const THERMAL_DEBROGLIE_WAVELENGTH_DOC: &str = r#"Calculate the thermal de Broglie wavelength for electrons.

    Parameters
    ----------
    T_e : ~formulink.Quantity
        Electron temperature.

    Returns
    -------
    lambda_dbTh : ~formulink.Quantity
        The thermal de Broglie wavelength for electrons in meters.
    "#;

pub fn thermal_debroglie_wavelength() -> SourceFunction {
    let desc = FunctionDescriptor::new("thermal_deBroglie_wavelength")
        .param(ParamDescriptor::required("T_e", UnitAnnotation::unit("K")))
        .returns(UnitAnnotation::unit("m"))
        .doc(THERMAL_DEBROGLIE_WAVELENGTH_DOC);
    SourceFunction::new(desc, |a| {
        let f = "thermal_deBroglie_wavelength";
        let t_e = args::positive(f, a, 0, "T_e")?;
        Ok(quantity(H / (2.0 * PI * M_E * K_B * t_e).sqrt(), "m"))
    })
}

const FERMI_ENERGY_DOC: &str = r#"Calculate the kinetic energy in a degenerate electron gas.

    Parameters
    ----------
    n_e : ~formulink.Quantity
        Electron number density.

    Returns
    -------
    energy_F : ~formulink.Quantity
        The Fermi energy in joules.

    Aliases
    -------
    `Ef_`
    "#;

pub fn fermi_energy() -> SourceFunction {
    let desc = FunctionDescriptor::new("Fermi_energy")
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .returns(UnitAnnotation::unit("J"))
        .doc(FERMI_ENERGY_DOC);
    SourceFunction::new(desc, |a| {
        let n_e = args::positive("Fermi_energy", a, 0, "n_e")?;
        Ok(quantity(fermi_energy_value(n_e), "J"))
    })
}

const THOMAS_FERMI_LENGTH_DOC: &str = r#"Calculate the exponential scale length for charge screening
    for cold and dense plasmas.

    Parameters
    ----------
    n_e : ~formulink.Quantity
        Electron number density.

    Returns
    -------
    lambda_TF : ~formulink.Quantity
        The Thomas-Fermi screening length in meters.
    "#;

pub fn thomas_fermi_length() -> SourceFunction {
    let desc = FunctionDescriptor::new("Thomas_Fermi_length")
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .returns(UnitAnnotation::unit("m"))
        .doc(THOMAS_FERMI_LENGTH_DOC);
    SourceFunction::new(desc, |a| {
        let n_e = args::positive("Thomas_Fermi_length", a, 0, "n_e")?;
        let energy = fermi_energy_value(n_e);
        Ok(quantity((2.0 * EPSILON_0 * energy / (3.0 * n_e * E_CHARGE.powi(2))).sqrt(), "m"))
    })
}

const WIGNER_SEITZ_RADIUS_DOC: &str = r#"Calculate the Wigner-Seitz radius, which approximates the
    inter-particle spacing.

    Parameters
    ----------
    n : ~formulink.Quantity
        Particle number density.

    Returns
    -------
    radius : ~formulink.Quantity
        The Wigner-Seitz radius in meters.
    "#;

pub fn wigner_seitz_radius() -> SourceFunction {
    let desc = FunctionDescriptor::new("Wigner_Seitz_radius")
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .returns(UnitAnnotation::unit("m"))
        .doc(WIGNER_SEITZ_RADIUS_DOC);
    SourceFunction::new(desc, |a| {
        let n = args::positive("Wigner_Seitz_radius", a, 0, "n")?;
        Ok(quantity((3.0 / (4.0 * PI * n)).cbrt(), "m"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: Value) -> f64 {
        v.as_f64().unwrap_or_else(|| panic!("expected number, got {:?}", v))
    }

    #[test]
    fn test_debroglie_wavelength() {
        let l = value(debroglie_wavelength().call(&[Value::Number(1e5), "e-".into()]));
        assert!(((l - 7.27e-9) / 7.27e-9).abs() < 1e-2);
    }

    #[test]
    fn test_debroglie_limits() {
        let f = debroglie_wavelength();
        assert_eq!(value(f.call(&[Value::Number(0.0), "p+".into()])), f64::INFINITY);
        assert!(f.call(&[Value::Number(C), "p+".into()]).is_error());
    }

    #[test]
    fn test_fermi_energy() {
        let e = value(fermi_energy().call(&[Value::Number(1e28)]));
        // about 1.69 eV
        assert!(((e / E_CHARGE) - 1.69).abs() < 0.01);
    }

    #[test]
    fn test_wigner_seitz_radius() {
        let r = value(wigner_seitz_radius().call(&[Value::Number(3.0 / (4.0 * PI))]));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_thomas_fermi_length_positive() {
        assert!(value(thomas_fermi_length().call(&[Value::Number(1e23)])) > 0.0);
        assert!(thomas_fermi_length().call(&[Value::Number(-1.0)]).is_error());
    }

    #[test]
    fn test_thermal_debroglie_wavelength() {
        let l = value(thermal_debroglie_wavelength().call(&[Value::Number(1e6)]));
        assert!(((l - 7.46e-11) / 7.46e-11).abs() < 1e-2);
    }
}
