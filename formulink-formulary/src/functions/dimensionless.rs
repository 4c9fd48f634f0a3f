//! Dimensionless numbers

use super::{optional_real, particle_type};
use crate::args::{self, quantity};
use crate::constants::*;
use crate::functions::collisions::{coulomb_log_value, collision_rate};
use crate::functions::quantum::fermi_energy_value;
use formulink_core::prelude::*;

pub const PATH: &str = "plasma.formulary.dimensionless";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(reynolds_number())
        .with_alias("Re_", "Reynolds_number")
        .with_function(mag_reynolds())
        .with_alias("Rm_", "Mag_Reynolds")
        .with_function(beta())
        .with_function(quantum_theta())
        .with_function(hall_parameter())
        .with_alias("betaH_", "Hall_parameter")
}

const REYNOLDS_NUMBER_DOC: &str = r#"Compute the Reynolds number.

    Parameters
    ----------
    rho : ~formulink.Quantity
        The density of the plasma.

    U : ~formulink.Quantity
        The flow velocity of the plasma.

    L : ~formulink.Quantity
        The characteristic length scale.

    mu : ~formulink.Quantity
        The dynamic viscosity of the plasma.

    Returns
    -------
    Re : ~formulink.Quantity
        Dimensionless quantity.

    Aliases
    -------
    `Re_`
    "#;

pub fn reynolds_number() -> SourceFunction {
    let desc = FunctionDescriptor::new("Reynolds_number")
        .param(ParamDescriptor::required("rho", UnitAnnotation::unit("kg / m**3")))
        .param(ParamDescriptor::required("U", UnitAnnotation::unit("m / s")))
        .param(ParamDescriptor::required("L", UnitAnnotation::unit("m")))
        .param(ParamDescriptor::required("mu", UnitAnnotation::unit("kg / (m s)")))
        .returns(UnitAnnotation::unit(""))
        .doc(REYNOLDS_NUMBER_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Reynolds_number";
        let rho = args::number(f, a, 0, "rho")?;
        let u = args::number(f, a, 1, "U")?;
        let l = args::number(f, a, 2, "L")?;
        let mu = args::positive(f, a, 3, "mu")?;
        Ok(quantity(rho * u.abs() * l / mu, ""))
    })
}

const MAG_REYNOLDS_DOC: &str = r#"Compute the magnetic Reynolds number.

    Parameters
    ----------
    U : ~formulink.Quantity
        The velocity scale of the plasma.

    L : ~formulink.Quantity
        The length scale of the plasma.

    sigma : ~formulink.Quantity
        The conductivity of the plasma.

    Returns
    -------
    Rm : ~formulink.Quantity
        Dimensionless quantity.

    Aliases
    -------
    `Rm_`
    "#;

pub fn mag_reynolds() -> SourceFunction {
    let desc = FunctionDescriptor::new("Mag_Reynolds")
        .param(ParamDescriptor::required("U", UnitAnnotation::unit("m / s")))
        .param(ParamDescriptor::required("L", UnitAnnotation::unit("m")))
        .param(ParamDescriptor::required("sigma", UnitAnnotation::unit("S / m")))
        .returns(UnitAnnotation::unit(""))
        .doc(MAG_REYNOLDS_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Mag_Reynolds";
        let u = args::number(f, a, 0, "U")?;
        let l = args::number(f, a, 1, "L")?;
        let sigma = args::number(f, a, 2, "sigma")?;
        Ok(quantity(u.abs() * l * MU_0 * sigma, ""))
    })
}

const BETA_DOC: &str = r#"Compute the ratio of thermal pressure to magnetic pressure.

    Parameters
    ----------
    T : ~formulink.Quantity
        The temperature of the plasma.

    n : ~formulink.Quantity
        The particle density of the plasma.

    B : ~formulink.Quantity
        The magnetic field in the plasma.

    Returns
    -------
    beta : ~formulink.Quantity
        Dimensionless quantity.
    "#;

pub fn beta() -> SourceFunction {
    let desc = FunctionDescriptor::new("beta")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .returns(UnitAnnotation::unit(""))
        .doc(BETA_DOC);
    SourceFunction::new(desc, |a| {
        let f = "beta";
        let t = args::number(f, a, 0, "T")?;
        let n = args::number(f, a, 1, "n")?;
        let b = args::number(f, a, 2, "B")?;
        if b == 0.0 {
            return Err(CallError::domain_error(f, "B must be non-zero"));
        }
        let thermal = n * K_B * t;
        let magnetic = b * b / (2.0 * MU_0);
        Ok(quantity(thermal / magnetic, ""))
    })
}

const QUANTUM_THETA_DOC: &str = r#"Compare Fermi energy to thermal kinetic energy to check if
    quantum effects are important.

    Parameters
    ----------
    T : ~formulink.Quantity
        The temperature of the plasma.

    n_e : ~formulink.Quantity
        The electron number density of the plasma.

    Returns
    -------
    theta : ~formulink.Quantity
        Dimensionless quantity.
    "#;

pub fn quantum_theta() -> SourceFunction {
    let desc = FunctionDescriptor::new("quantum_theta")
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .returns(UnitAnnotation::unit(""))
        .doc(QUANTUM_THETA_DOC);
    SourceFunction::new(desc, |a| {
        let f = "quantum_theta";
        let t = args::number(f, a, 0, "T")?;
        let n_e = args::positive(f, a, 1, "n_e")?;
        Ok(quantity(K_B * t / fermi_energy_value(n_e), ""))
    })
}

const HALL_PARAMETER_DOC: &str = r#"Calculate the ratio of the gyrofrequency to the collision
    frequency of a particle species.

    Parameters
    ----------
    n : ~formulink.Quantity
        The density associated with the particle species.

    T : ~formulink.Quantity
        The temperature of associated with the particle species.

    B : ~formulink.Quantity
        The magnetic field.

    ion : str
        The type of ion the particle is colliding with.

    particle : str
        The particle species for which the Hall parameter is calculated.

    coulomb_log : float, optional
        Preset value for the Coulomb logarithm. Computed from T and n
        when left unset.

    Returns
    -------
    ~formulink.Quantity
        Hall parameter for a given species.

    Aliases
    -------
    `betaH_`
    "#;

pub fn hall_parameter() -> SourceFunction {
    let desc = FunctionDescriptor::new("Hall_parameter")
        .param(ParamDescriptor::required("n", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("T", UnitAnnotation::unit("K")))
        .param(ParamDescriptor::required("B", UnitAnnotation::unit("T")))
        .param(ParamDescriptor::required("ion", particle_type()))
        .param(ParamDescriptor::required("particle", particle_type()))
        .param(ParamDescriptor::optional("coulomb_log", optional_real(), Value::Null))
        .returns(UnitAnnotation::unit(""))
        .doc(HALL_PARAMETER_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Hall_parameter";
        let n = args::positive(f, a, 0, "n")?;
        let t = args::positive(f, a, 1, "T")?;
        let b = args::number(f, a, 2, "B")?.abs();
        let ion = args::charged(f, a, 3, "ion")?;
        let particle = args::charged(f, a, 4, "particle")?;
        let ln_lambda = match args::optional_number(f, a, 5, "coulomb_log")? {
            Some(value) => value,
            None => coulomb_log_value(f, t, n, particle, ion)?,
        };
        let gyro = particle.charge().abs() * b / particle.mass;
        let nu = collision_rate(t, n, particle, ion, ln_lambda);
        Ok(quantity(gyro / nu, ""))
    })
}
