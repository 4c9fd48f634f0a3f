//! Plasma parameters: frequencies, lengths, speeds, pressures

use super::{bool_type, density_union, particle_type, str_type};
use crate::args::{self, quantity};
use crate::constants::*;
use crate::particles::Particle;
use formulink_core::prelude::*;
use std::f64::consts::PI;

pub const PATH: &str = "plasma.formulary.parameters";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(plasma_frequency())
        .with_alias("wp_", "plasma_frequency")
        .with_function(gyrofrequency())
        .with_alias("oc_", "gyrofrequency")
        .with_alias("wc_", "gyrofrequency")
        .with_function(debye_length())
        .with_alias("lambdaD_", "Debye_length")
        .with_function(thermal_speed())
        .with_alias("vth_", "thermal_speed")
        .with_function(alfven_speed())
        .with_alias("va_", "Alfven_speed")
        .with_function(mass_density())
        .with_alias("rho_", "mass_density")
        .with_function(ion_sound_speed())
        .with_alias("cs_", "ion_sound_speed")
        .with_function(inertial_length())
        .with_alias("cwp_", "inertial_length")
        .with_function(magnetic_pressure())
        .with_alias("pmag_", "magnetic_pressure")
        .with_function(bohm_diffusion())
        .with_alias("DB_", "Bohm_diffusion")
}

/// Angular rate in rad/s, or the same rate in Hz
fn angular(omega: f64, to_hz: bool) -> Value {
    if to_hz {
        quantity(omega / (2.0 * PI), "Hz")
    } else {
        quantity(omega, "rad / s")
    }
}

fn plasma_frequency_value(n: f64, p: &Particle) -> f64 {
    (n * p.charge().powi(2) / (EPSILON_0 * p.mass)).sqrt()
}

const PLASMA_FREQUENCY_DOC: &str = r#"Calculate the particle plasma frequency.

    Parameters
    ----------
    n : ~formulink.Quantity
        Particle number density in units convertible to per cubic meter.

    particle : str
        Particle species, e.g. 'p+' for protons or 'e-' for electrons.

    to_hz : bool
        Set to True to convert the angular rate to a frequency.

    Returns
    -------
    omega_p : ~formulink.Quantity
        The particle plasma frequency in radians per second, or in hertz
        if to_hz is set.

    Aliases
    -------
    `wp_`
    "#;

pub fn plasma_frequency() -> SourceFunction {
    let desc = FunctionDescriptor::new("plasma_frequency")
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("particle", particle_type()))
        .param(ParamDescriptor::optional("to_hz", bool_type(), false))
        .returns(UnitAnnotation::unit("rad / s"))
        .doc(PLASMA_FREQUENCY_DOC);
    SourceFunction::new(desc, |a| {
        let f = "plasma_frequency";
        let n = args::number(f, a, 0, "n")?;
        if n < 0.0 {
            return Err(CallError::domain_error(f, "n must be non-negative"));
        }
        let p = args::charged(f, a, 1, "particle")?;
        let to_hz = args::flag(f, a, 2, "to_hz")?;
        Ok(angular(plasma_frequency_value(n, p), to_hz))
    })
}

const GYROFREQUENCY_DOC: &str = r#"Calculate the particle gyrofrequency in units of radians per second.

    Parameters
    ----------
    B : ~formulink.Quantity
        The magnetic field magnitude in units convertible to tesla.

    particle : str
        Representation of the particle species.

    signed : bool, optional
        The gyrofrequency can be defined as signed (negative for electrons)
        or unsigned (the default).

    to_hz : bool, optional
        Set to True to convert the angular rate to a frequency.

    Returns
    -------
    omega_c : ~formulink.Quantity
        The particle gyrofrequency in units of radians per second.

    Aliases
    -------
    `oc_`, `wc_`
    "#;

pub fn gyrofrequency() -> SourceFunction {
    let desc = FunctionDescriptor::new("gyrofrequency")
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .param(ParamDescriptor::required("particle", particle_type()))
        .param(ParamDescriptor::optional("signed", bool_type(), false))
        .param(ParamDescriptor::optional("to_hz", bool_type(), false))
        .returns(UnitAnnotation::unit("rad / s"))
        .doc(GYROFREQUENCY_DOC);
    SourceFunction::new(desc, |a| {
        let f = "gyrofrequency";
        let b = args::number(f, a, 0, "B")?.abs();
        let p = args::particle(f, a, 1, "particle")?;
        let signed = args::flag(f, a, 2, "signed")?;
        let to_hz = args::flag(f, a, 3, "to_hz")?;
        let mut omega = p.charge() * b / p.mass;
        if !signed {
            omega = omega.abs();
        }
        Ok(angular(omega, to_hz))
    })
}

pub(crate) fn debye(t_e: f64, n_e: f64) -> f64 {
    (EPSILON_0 * K_B * t_e / (n_e * E_CHARGE.powi(2))).sqrt()
}

const DEBYE_LENGTH_DOC: &str = r#"Calculate the exponential scale length for charge screening
    in an electron plasma with stationary ions.

    Parameters
    ----------
    T_e : ~formulink.Quantity
        Electron temperature.

    n_e : ~formulink.Quantity
        Electron number density.

    Returns
    -------
    lambda_D : ~formulink.Quantity
        The Debye length in meters.

    Aliases
    -------
    `lambdaD_`
    "#;

pub fn debye_length() -> SourceFunction {
    let desc = FunctionDescriptor::new("Debye_length")
        .param(ParamDescriptor::required("T_e", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .returns(UnitAnnotation::unit("m"))
        .doc(DEBYE_LENGTH_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Debye_length";
        let t_e = args::positive(f, a, 0, "T_e")?;
        let n_e = args::positive(f, a, 1, "n_e")?;
        Ok(quantity(debye(t_e, n_e), "m"))
    })
}

pub(crate) fn thermal_speed_value(f: &str, t: f64, mass: f64, method: &str) -> Result<f64, CallError> {
    let coefficient = match method {
        "most_probable" => 2.0,
        "rms" => 3.0,
        "mean_magnitude" => 8.0 / PI,
        other => {
            return Err(CallError::domain_error(f, format!("unknown method '{}'", other))
                .with_suggestion("Use one of: most_probable, rms, mean_magnitude"))
        }
    };
    Ok((coefficient * K_B * t / mass).sqrt())
}

const THERMAL_SPEED_DOC: &str = r#"Calculate the speed of thermal motion for particles with a
    Maxwellian distribution.

    Parameters
    ----------
    T : ~formulink.Quantity
        The particle temperature in kelvin.

    particle : str
        Representation of the particle species.

    method : str, optional
        Method to be used for calculating the thermal speed. Options are
        'most_probable' (default), 'rms', and 'mean_magnitude'.

    Returns
    -------
    V : ~formulink.Quantity
        Particle thermal speed.

    Aliases
    -------
    `vth_`
    "#;

pub fn thermal_speed() -> SourceFunction {
    let desc = FunctionDescriptor::new("thermal_speed")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("particle", particle_type()))
        .param(ParamDescriptor::optional("method", str_type(), "most_probable"))
        .returns(UnitAnnotation::unit("m / s"))
        .doc(THERMAL_SPEED_DOC);
    SourceFunction::new(desc, |a| {
        let f = "thermal_speed";
        let t = args::number(f, a, 0, "T")?;
        if t < 0.0 {
            return Err(CallError::domain_error(f, "T must be non-negative"));
        }
        let p = args::particle(f, a, 1, "particle")?;
        let method = args::text(f, a, 2, "method")?;
        Ok(quantity(thermal_speed_value(f, t, p.mass, method)?, "m / s"))
    })
}

/// Mass density from an argument that may be a number density quantity.
///
/// A bare number is read as `assume`: a number density when true, a mass
/// density otherwise.
fn to_mass_density(f: &str, a: &[Value], i: usize, p: &Particle, assume_number: bool) -> Result<f64, CallError> {
    let density = args::positive(f, a, i, "density")?;
    let is_number_density = match args::unit_of(a, i) {
        Some(unit) => unit.replace(' ', "") == "1/m3" || unit.replace(' ', "") == "1/m**3",
        None => assume_number,
    };
    Ok(if is_number_density { density * p.mass } else { density })
}

const ALFVEN_SPEED_DOC: &str = r#"Calculate the Alfvén speed.

    Parameters
    ----------
    B : ~formulink.Quantity
        The magnetic field magnitude in units convertible to tesla.

    density : ~formulink.Quantity
        Either the ion number density in units convertible to 1 / m**3,
        or the mass density in units convertible to kg / m**3.

    ion : str, optional
        Representation of the species (e.g., 'p+' for protons). Only
        used when a number density is given.

    Returns
    -------
    V_A : ~formulink.Quantity
        The Alfvén speed in units of m/s.

    Aliases
    -------
    `va_`
    "#;

pub fn alfven_speed() -> SourceFunction {
    let desc = FunctionDescriptor::new("Alfven_speed")
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .param(ParamDescriptor::required("density", density_union()))
        .param(ParamDescriptor::optional("ion", particle_type(), "p+"))
        .returns(UnitAnnotation::unit("m / s"))
        .doc(ALFVEN_SPEED_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Alfven_speed";
        let b = args::number(f, a, 0, "B")?;
        let ion = args::particle(f, a, 2, "ion")?;
        let rho = to_mass_density(f, a, 1, ion, false)?;
        Ok(quantity(b.abs() / (MU_0 * rho).sqrt(), "m / s"))
    })
}

const MASS_DENSITY_DOC: &str = r#"Calculate the mass density from a number density.

    Parameters
    ----------
    density : ~formulink.Quantity
        Either a particle number density (in units of m**-3 or
        equivalent) or a mass density (in units of kg / m**3 or
        equivalent). A mass density is passed through unchanged.

    particle : str
        Representation of the particle species.

    Returns
    -------
    rho : ~formulink.Quantity
        The mass density for the plasma species represented by particle.

    Aliases
    -------
    `rho_`
    "#;

pub fn mass_density() -> SourceFunction {
    let desc = FunctionDescriptor::new("mass_density")
        .param(ParamDescriptor::required("density", density_union()))
        .param(ParamDescriptor::required("particle", particle_type()))
        .returns(UnitAnnotation::unit("kg / m**3"))
        .doc(MASS_DENSITY_DOC);
    SourceFunction::new(desc, |a| {
        let f = "mass_density";
        let p = args::particle(f, a, 1, "particle")?;
        let rho = to_mass_density(f, a, 0, p, true)?;
        Ok(quantity(rho, "kg / m3"))
    })
}

const ION_SOUND_SPEED_DOC: &str = r#"Return the ion sound speed for an electron-ion plasma,
    neglecting dispersion.

    Parameters
    ----------
    T_e : ~formulink.Quantity
        Electron temperature in units of temperature or energy per
        particle.

    T_i : ~formulink.Quantity
        Ion temperature in units of temperature or energy per particle.

    ion : str, optional
        Representation of the ion species (e.g., 'p+' for protons).

    gamma_e : float
        The adiabatic index for electrons, which defaults to 1.

    gamma_i : float
        The adiabatic index for ions, which defaults to 3.

    Returns
    -------
    V_S : ~formulink.Quantity
        The ion sound speed in units of meters per second.

    Aliases
    -------
    `cs_`
    "#;

pub fn ion_sound_speed() -> SourceFunction {
    let real = || UnitAnnotation::type_name("<class 'numbers.Real'>");
    let desc = FunctionDescriptor::new("ion_sound_speed")
        .param(ParamDescriptor::required("T_e", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("T_i", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::optional("ion", particle_type(), "p+"))
        .param(ParamDescriptor::optional("gamma_e", real(), 1.0))
        .param(ParamDescriptor::optional("gamma_i", real(), 3.0))
        .returns(UnitAnnotation::unit("m / s"))
        .doc(ION_SOUND_SPEED_DOC);
    SourceFunction::new(desc, |a| {
        let f = "ion_sound_speed";
        let t_e = args::number(f, a, 0, "T_e")?;
        let t_i = args::number(f, a, 1, "T_i")?;
        let ion = args::charged(f, a, 2, "ion")?;
        let gamma_e = args::number(f, a, 3, "gamma_e")?;
        let gamma_i = args::number(f, a, 4, "gamma_i")?;
        if gamma_e < 1.0 || gamma_i < 1.0 {
            return Err(CallError::domain_error(f, "adiabatic indices must be at least 1"));
        }
        let energy = gamma_e * K_B * t_e + gamma_i * K_B * t_i;
        if energy < 0.0 {
            return Err(CallError::domain_error(f, "temperatures must be non-negative"));
        }
        Ok(quantity((energy / ion.mass).sqrt(), "m / s"))
    })
}

const INERTIAL_LENGTH_DOC: &str = r#"Calculate a charged particle's inertial length.

    Parameters
    ----------
    n : ~formulink.Quantity
        Particle number density in units convertible to m**-3.

    particle : str
        Representation of the particle species.

    Returns
    -------
    d : ~formulink.Quantity
        The particle's inertial length in meters.

    Aliases
    -------
    `cwp_`
    "#;

pub fn inertial_length() -> SourceFunction {
    let desc = FunctionDescriptor::new("inertial_length")
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("particle", particle_type()))
        .returns(UnitAnnotation::unit("m"))
        .doc(INERTIAL_LENGTH_DOC);
    SourceFunction::new(desc, |a| {
        let f = "inertial_length";
        let n = args::positive(f, a, 0, "n")?;
        let p = args::charged(f, a, 1, "particle")?;
        Ok(quantity(C / plasma_frequency_value(n, p), "m"))
    })
}

const MAGNETIC_PRESSURE_DOC: &str = r#"Calculate the magnetic pressure.

    Parameters
    ----------
    B : ~formulink.Quantity
        The magnetic field in units convertible to tesla.

    Returns
    -------
    p_B : ~formulink.Quantity
        The magnetic pressure in units in pascals (newtons per square meter).

    Aliases
    -------
    `pmag_`
    "#;

pub fn magnetic_pressure() -> SourceFunction {
    let desc = FunctionDescriptor::new("magnetic_pressure")
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .returns(UnitAnnotation::unit("Pa"))
        .doc(MAGNETIC_PRESSURE_DOC);
    SourceFunction::new(desc, |a| {
        let b = args::number("magnetic_pressure", a, 0, "B")?;
        Ok(quantity(b * b / (2.0 * MU_0), "Pa"))
    })
}

const BOHM_DIFFUSION_DOC: &str = r#"Return the Bohm diffusion coefficient.

    Parameters
    ----------
    T_e : ~formulink.Quantity
        The electron temperature.

    B : ~formulink.Quantity
        The magnitude of the magnetic field in the plasma.

    Returns
    -------
    D_B : ~formulink.Quantity
        The Bohm diffusion coefficient in square meters per second.

    Aliases
    -------
    `DB_`
    "#;

pub fn bohm_diffusion() -> SourceFunction {
    let desc = FunctionDescriptor::new("Bohm_diffusion")
        .param(ParamDescriptor::required("T_e", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .returns(UnitAnnotation::unit("m**2 / s"))
        .doc(BOHM_DIFFUSION_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Bohm_diffusion";
        let t_e = args::positive(f, a, 0, "T_e")?;
        let b = args::number(f, a, 1, "B")?.abs();
        if b == 0.0 {
            return Err(CallError::domain_error(f, "B must be non-zero"));
        }
        Ok(quantity(K_B * t_e / (16.0 * E_CHARGE * b), "m**2 / s"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, rel: f64) -> bool {
        ((actual - expected) / expected).abs() < rel
    }

    fn value(v: Value) -> f64 {
        match v {
            Value::Quantity(q) => q.value,
            other => panic!("expected quantity, got {:?}", other),
        }
    }

    #[test]
    fn test_plasma_frequency_modes() {
        let f = plasma_frequency();
        let omega = f.call(&[Value::Number(1e19), "e-".into()]);
        assert_eq!(omega.as_quantity().unwrap().unit, "rad / s");
        assert!(close(value(omega.clone()), 1.78398e11, 1e-4));

        let hz = f.call(&[Value::Number(1e19), "e-".into(), true.into()]);
        assert_eq!(hz.as_quantity().unwrap().unit, "Hz");
        assert!(close(value(hz) * 2.0 * PI, value(omega), 1e-12));
    }

    #[test]
    fn test_plasma_frequency_rejects_neutral() {
        let v = plasma_frequency().call(&[Value::Number(1e19), "n".into()]);
        assert!(v.is_error());
    }

    #[test]
    fn test_gyrofrequency_sign() {
        let f = gyrofrequency();
        let unsigned = value(f.call(&[Value::Number(0.1), "e-".into()]));
        let signed = value(f.call(&[Value::Number(0.1), "e-".into(), true.into()]));
        assert!(unsigned > 0.0);
        assert_eq!(signed, -unsigned);
        assert!(close(unsigned, 1.7588e10, 1e-4));
    }

    #[test]
    fn test_debye_length() {
        let v = debye_length().call(&[Value::Number(5.8e6), Value::Number(1e18)]);
        assert!(close(value(v), 1.66196e-4, 1e-4));
    }

    #[test]
    fn test_thermal_speed_methods() {
        let f = thermal_speed();
        let mp = value(f.call(&[Value::Number(1e6), "p+".into()]));
        let rms = value(f.call(&[Value::Number(1e6), "p+".into(), "rms".into()]));
        assert!(close(rms / mp, (1.5f64).sqrt(), 1e-12));
        assert!(f.call(&[Value::Number(1e6), "p+".into(), "fastest".into()]).is_error());
    }

    #[test]
    fn test_alfven_speed_density_forms() {
        let f = alfven_speed();
        let from_mass = value(f.call(&[Value::Number(1.0), (1e20 * M_P).into()]));
        let from_number = value(f.call(&[
            Value::Number(1.0),
            Value::Quantity(Quantity::new(1e20, "1 / m3")),
        ]));
        assert!(close(from_mass, from_number, 1e-12));
        assert!(close(from_mass, 2.18e6, 1e-2));
    }

    #[test]
    fn test_mass_density() {
        let f = mass_density();
        let rho = value(f.call(&[Value::Number(1e20), "p+".into()]));
        assert!(close(rho, 1e20 * M_P, 1e-12));
        let passthrough = value(f.call(&[Value::Quantity(Quantity::new(2.0, "kg / m3")), "p+".into()]));
        assert_eq!(passthrough, 2.0);
    }

    #[test]
    fn test_ion_sound_speed_defaults() {
        let v = value(ion_sound_speed().call(&[Value::Number(5e5), Value::Number(0.0)]));
        assert!(close(v, (K_B * 5e5 / M_P).sqrt(), 1e-12));
    }

    #[test]
    fn test_inertial_length_is_c_over_plasma_frequency() {
        let d = value(inertial_length().call(&[Value::Number(1e19), "e-".into()]));
        let wp = value(plasma_frequency().call(&[Value::Number(1e19), "e-".into()]));
        assert!(close(d * wp, C, 1e-12));
    }

    #[test]
    fn test_magnetic_pressure() {
        let p = value(magnetic_pressure().call(&[Value::Number(1.0)]));
        assert!(close(p, 397887.0, 1e-5));
    }

    #[test]
    fn test_bohm_diffusion_rejects_zero_field() {
        assert!(bohm_diffusion().call(&[Value::Number(1e4), Value::Number(0.0)]).is_error());
    }

    #[test]
    fn test_module_exports_aliases() {
        let m = module();
        let exports: Vec<&str> = m.exports().collect();
        assert_eq!(exports[0], "plasma_frequency");
        assert_eq!(exports[1], "wp_");
        assert!(exports.contains(&"Bohm_diffusion"));
    }
}
