//! Relativistic factors

use crate::args::{self, quantity};
use crate::constants::C;
use formulink_core::prelude::*;

pub const PATH: &str = "plasma.formulary.relativity";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(lorentz_factor())
        .with_function(relativistic_energy())
}

fn gamma(f: &str, v: f64) -> Result<f64, CallError> {
    let beta = v.abs() / C;
    if beta > 1.0 {
        return Err(CallError::domain_error(f, "speed cannot exceed the speed of light"));
    }
    if beta == 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok(1.0 / (1.0 - beta * beta).sqrt())
}

const LORENTZ_FACTOR_DOC: &str = r#"Return the Lorentz factor.

    Parameters
    ----------
    V : ~formulink.Quantity
        The velocity in units convertible to meters per second.

    Returns
    -------
    gamma : float or ~numpy.ndarray
        The Lorentz factor associated with the inputted velocities.
    "#;

pub fn lorentz_factor() -> SourceFunction {
    let desc = FunctionDescriptor::new("Lorentz_factor")
        .param(ParamDescriptor::required("V", UnitAnnotation::unit("m / s")))
        .doc(LORENTZ_FACTOR_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Lorentz_factor";
        let v = args::number(f, a, 0, "V")?;
        Ok(Value::Number(gamma(f, v)?))
    })
}

const RELATIVISTIC_ENERGY_DOC: &str = r#"Calculate the relativistic energy (in joules) of an object
    of mass m and velocity v.

    Parameters
    ----------
    m : ~formulink.Quantity
        The mass in units convertible to kilograms.

    v : ~formulink.Quantity
        The velocity in units convertible to meters per second.

    Returns
    -------
    E : ~formulink.Quantity
        The relativistic energy (in joules) of an object of mass m
        moving at velocity v.
    "#;

pub fn relativistic_energy() -> SourceFunction {
    let desc = FunctionDescriptor::new("relativistic_energy")
        .param(ParamDescriptor::required("m", UnitAnnotation::unit("kg")))
        .param(ParamDescriptor::required("v", UnitAnnotation::unit("m / s")))
        .returns(UnitAnnotation::unit("J"))
        .doc(RELATIVISTIC_ENERGY_DOC);
    SourceFunction::new(desc, |a| {
        let f = "relativistic_energy";
        let m = args::number(f, a, 0, "m")?;
        if m < 0.0 {
            return Err(CallError::domain_error(f, "mass must be non-negative"));
        }
        let v = args::number(f, a, 1, "v")?;
        Ok(quantity(gamma(f, v)? * m * C * C, "J"))
    })
}
