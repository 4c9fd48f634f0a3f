//! Mathematical functions that appear in plasma formulae

use crate::args;
use formulink_core::prelude::*;
use std::f64::consts::PI;

pub const PATH: &str = "plasma.formulary.mathematics";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(chandrasekhar_g())
}

/// Error function, Abramowitz and Stegun 7.1.26 (|error| < 1.5e-7)
pub(crate) fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t * (0.254829592
        + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

const CHANDRASEKHAR_G_DOC: &str = r#"Calculate the Chandrasekhar function G(x), the dimensionless
    friction coefficient of a Maxwellian field population.

    Parameters
    ----------
    x : float
        The normalized velocity of the test particle.

    Returns
    -------
    G : float
        The value of the Chandrasekhar function at x.
    "#;

pub fn chandrasekhar_g() -> SourceFunction {
    let desc = FunctionDescriptor::new("Chandrasekhar_G")
        .param(ParamDescriptor::bare("x"))
        .doc(CHANDRASEKHAR_G_DOC);
    SourceFunction::new(desc, |a| {
        let x = args::number("Chandrasekhar_G", a, 0, "x")?;
        if x == 0.0 {
            return Ok(Value::Number(0.0));
        }
        let derivative = 2.0 / PI.sqrt() * (-x * x).exp();
        Ok(Value::Number((erf(x) - x * derivative) / (2.0 * x * x)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.8427007929).abs() < 2e-7);
        assert!((erf(-1.0) + 0.8427007929).abs() < 2e-7);
    }

    #[test]
    fn test_chandrasekhar_g_is_odd_and_peaks_near_one() {
        let g = |x: f64| chandrasekhar_g().call(&[Value::Number(x)]).as_f64().unwrap();
        assert_eq!(g(0.0), 0.0);
        assert!((g(0.5) + g(-0.5)).abs() < 1e-9);
        assert!(g(1.0) > g(0.3));
        assert!(g(1.0) > g(3.0));
        assert!((g(10.0) - 1.0 / 200.0).abs() < 1e-6);
    }
}
