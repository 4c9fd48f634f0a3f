//! Binary Coulomb collisions

use super::{optional_real, particle_type};
use crate::args::{self, quantity};
use crate::constants::*;
use crate::functions::parameters::debye;
use crate::particles::Particle;
use formulink_core::prelude::*;
use std::f64::consts::PI;

pub const PATH: &str = "plasma.formulary.collisions";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(coulomb_logarithm())
        .with_function(impact_parameter_perp())
        .with_function(impact_parameter())
        .with_function(collision_frequencies())
        .with_function(spitzer_resistivity())
}

fn reduced_mass(a: &Particle, b: &Particle) -> f64 {
    a.mass * b.mass / (a.mass + b.mass)
}

/// Thermal speed of the reduced-mass system
fn relative_speed(t: f64, a: &Particle, b: &Particle) -> f64 {
    (2.0 * K_B * t / reduced_mass(a, b)).sqrt()
}

/// Distance of closest approach for a 90° deflection
fn perp_value(t: f64, a: &Particle, b: &Particle) -> f64 {
    let v = relative_speed(t, a, b);
    (a.charge() * b.charge()).abs() / (4.0 * PI * EPSILON_0 * reduced_mass(a, b) * v * v)
}

pub(crate) fn coulomb_log_value(f: &str, t: f64, n: f64, a: &Particle, b: &Particle) -> Result<f64, CallError> {
    let b_max = debye(t, n);
    let b_min = perp_value(t, a, b);
    if b_max <= b_min {
        return Err(CallError::domain_error(f, "strongly coupled plasma, the Coulomb logarithm is undefined"));
    }
    Ok((b_max / b_min).ln())
}

/// Collision frequency of species `a` on a background of `b` [1/s]
pub(crate) fn collision_rate(t: f64, n: f64, a: &Particle, b: &Particle, ln_lambda: f64) -> f64 {
    let b_perp = perp_value(t, a, b);
    let v = relative_speed(t, a, b);
    4.0 * PI * n * b_perp * b_perp * v * ln_lambda
}

fn species(f: &str, a: &[Value], i: usize) -> Result<(&'static Particle, &'static Particle), CallError> {
    let first = args::charged(f, a, i, "species_a")?;
    let second = args::charged(f, a, i + 1, "species_b")?;
    Ok((first, second))
}

const COULOMB_LOGARITHM_DOC: &str = r#"Compute the Coulomb logarithm.

    Parameters
    ----------
    T : ~formulink.Quantity
        Temperature in units of temperature or energy per particle.

    n_e : ~formulink.Quantity
        The electron density in units convertible to per cubic meter.

    species_a : str
        The first particle species.

    species_b : str
        The second particle species.

    Returns
    -------
    ln_Lambda : float or numpy.ndarray
        An estimate of the Coulomb logarithm that is accurate to
        roughly its reciprocal.
    "#;

pub fn coulomb_logarithm() -> SourceFunction {
    let desc = FunctionDescriptor::new("Coulomb_logarithm")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("species_a", particle_type()))
        .param(ParamDescriptor::required("species_b", particle_type()))
        .doc(COULOMB_LOGARITHM_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Coulomb_logarithm";
        let t = args::positive(f, a, 0, "T")?;
        let n_e = args::positive(f, a, 1, "n_e")?;
        let (sa, sb) = species(f, a, 2)?;
        Ok(Value::Number(coulomb_log_value(f, t, n_e, sa, sb)?))
    })
}

const IMPACT_PARAMETER_PERP_DOC: &str = r#"Distance of closest approach for a 90° Coulomb collision.

    Parameters
    ----------
    T : ~formulink.Quantity
        Temperature in units of temperature or energy per particle.

    species_a : str
        The first particle species.

    species_b : str
        The second particle species.

    Returns
    -------
    bPerp : float or numpy.ndarray
        The distance of closest approach for a 90° Coulomb collision.
    "#;

pub fn impact_parameter_perp() -> SourceFunction {
    let desc = FunctionDescriptor::new("impact_parameter_perp")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("species_a", particle_type()))
        .param(ParamDescriptor::required("species_b", particle_type()))
        .returns(UnitAnnotation::unit("m"))
        .doc(IMPACT_PARAMETER_PERP_DOC);
    SourceFunction::new(desc, |a| {
        let f = "impact_parameter_perp";
        let t = args::positive(f, a, 0, "T")?;
        let (sa, sb) = species(f, a, 1)?;
        Ok(quantity(perp_value(t, sa, sb), "m"))
    })
}

const IMPACT_PARAMETER_DOC: &str = r#"Impact parameters for classical and quantum Coulomb collision.

    Parameters
    ----------
    T : ~formulink.Quantity
        Temperature in units of temperature or energy per particle.

    n_e : ~formulink.Quantity
        The electron density in units convertible to per cubic meter.

    species_a : str
        The first particle species.

    species_b : str
        The second particle species.

    Returns
    -------
    bmin, bmax : tuple of floats
        The minimum and maximum impact parameters (distances) for a
        Coulomb collision.
    "#;

pub fn impact_parameter() -> SourceFunction {
    let desc = FunctionDescriptor::new("impact_parameter")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("species_a", particle_type()))
        .param(ParamDescriptor::required("species_b", particle_type()))
        .returns(UnitAnnotation::type_name("typing.Tuple[float, float]"))
        .doc(IMPACT_PARAMETER_DOC);
    SourceFunction::new(desc, |a| {
        let f = "impact_parameter";
        let t = args::positive(f, a, 0, "T")?;
        let n_e = args::positive(f, a, 1, "n_e")?;
        let (sa, sb) = species(f, a, 2)?;
        let mu = reduced_mass(sa, sb);
        let quantum = HBAR / (2.0 * mu * relative_speed(t, sa, sb));
        let b_min = perp_value(t, sa, sb).max(quantum);
        Ok(Value::List(vec![quantity(b_min, "m"), quantity(debye(t, n_e), "m")]))
    })
}

const COLLISION_FREQUENCIES_DOC: &str = r#"Collision frequencies of a test species on a field species
    and of the field species on the test species.

    Parameters
    ----------
    T : ~formulink.Quantity
        Temperature in units of temperature or energy per particle.

    n : ~formulink.Quantity
        The density in units convertible to per cubic meter.

    species_a : str
        The test particle species.

    species_b : str
        The field particle species.

    Returns
    -------
    nu_a, nu_b : tuple of ~formulink.Quantity
        The collision frequency of each species on the other.
    "#;

pub fn collision_frequencies() -> SourceFunction {
    let desc = FunctionDescriptor::new("collision_frequencies")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("species_a", particle_type()))
        .param(ParamDescriptor::required("species_b", particle_type()))
        .returns(UnitAnnotation::type_name("typing.Tuple[Quantity, Quantity]"))
        .doc(COLLISION_FREQUENCIES_DOC);
    SourceFunction::new(desc, |a| {
        let f = "collision_frequencies";
        let t = args::positive(f, a, 0, "T")?;
        let n = args::positive(f, a, 1, "n")?;
        let (sa, sb) = species(f, a, 2)?;
        let ln_lambda = coulomb_log_value(f, t, n, sa, sb)?;
        let nu_ab = collision_rate(t, n, sa, sb, ln_lambda);
        let nu_ba = nu_ab * sa.mass / sb.mass;
        Ok(Value::List(vec![quantity(nu_ab, "1 / s"), quantity(nu_ba, "1 / s")]))
    })
}

const SPITZER_RESISTIVITY_DOC: &str = r#"Spitzer resistivity of a plasma.

    Parameters
    ----------
    T : ~formulink.Quantity
        Temperature in units of temperature.

    n : ~formulink.Quantity
        The density in units convertible to per cubic meter.

    species_a : str
        The electron species.

    species_b : str
        The ion species.

    coulomb_log : float, optional
        Preset value for the Coulomb logarithm.

    Returns
    -------
    spitzer : float or numpy.ndarray
        The resistivity of the plasma in ohm meters.
    "#;

pub fn spitzer_resistivity() -> SourceFunction {
    let desc = FunctionDescriptor::new("Spitzer_resistivity")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("species_a", particle_type()))
        .param(ParamDescriptor::required("species_b", particle_type()))
        .param(ParamDescriptor::optional("coulomb_log", optional_real(), Value::Null))
        .returns(UnitAnnotation::unit("Ohm m"))
        .doc(SPITZER_RESISTIVITY_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Spitzer_resistivity";
        let t = args::positive(f, a, 0, "T")?;
        let n = args::positive(f, a, 1, "n")?;
        let (sa, sb) = species(f, a, 2)?;
        let ln_lambda = match args::optional_number(f, a, 4, "coulomb_log")? {
            Some(value) => value,
            None => coulomb_log_value(f, t, n, sa, sb)?,
        };
        let nu = collision_rate(t, n, sa, sb, ln_lambda);
        Ok(quantity(sa.mass * nu / (n * sa.charge().powi(2)), "Ohm m"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn electron_proton(t: f64, n: f64) -> Vec<Value> {
        vec![Value::Number(t), Value::Number(n), "e-".into(), "p+".into()]
    }

    #[test]
    fn test_coulomb_logarithm_is_plausible() {
        let ln = coulomb_logarithm().call(&electron_proton(1e5, 1e19));
        let ln = ln.as_f64().unwrap();
        assert!(ln > 5.0 && ln < 20.0, "got {}", ln);
    }

    #[test]
    fn test_coulomb_logarithm_rejects_neutral_species() {
        let v = coulomb_logarithm().call(&[Value::Number(1e5), Value::Number(1e19), "n".into(), "p+".into()]);
        assert!(v.is_error());
    }

    #[test]
    fn test_impact_parameter_perp_scales_inversely_with_temperature() {
        let f = impact_parameter_perp();
        let cold = f.call(&[Value::Number(1e4), "e-".into(), "p+".into()]).as_f64().unwrap();
        let hot = f.call(&[Value::Number(1e5), "e-".into(), "p+".into()]).as_f64().unwrap();
        assert!(((cold / hot) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_impact_parameter_returns_pair() {
        let v = impact_parameter().call(&electron_proton(1e5, 1e19));
        let pair = v.as_list().unwrap();
        assert_eq!(pair.len(), 2);
        assert!(pair[0].as_f64().unwrap() < pair[1].as_f64().unwrap());
    }

    #[test]
    fn test_collision_frequencies_returns_pair() {
        let v = collision_frequencies().call(&electron_proton(1e5, 1e19));
        assert_eq!(v.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_spitzer_resistivity_independent_of_density() {
        let f = spitzer_resistivity();
        let mut low = electron_proton(1e5, 1e19);
        low.push(Value::Number(10.0));
        let mut high = electron_proton(1e5, 1e21);
        high.push(Value::Number(10.0));
        let low = f.call(&low);
        let high = f.call(&high);
        assert_eq!(low.as_quantity().unwrap().unit, "Ohm m");
        let (low, high) = (low.as_f64().unwrap(), high.as_f64().unwrap());
        assert!(((low - high) / low).abs() < 1e-9);
    }
}
