//! Ionization balance

use crate::args::{self, quantity};
use crate::constants::*;
use formulink_core::prelude::*;
use std::f64::consts::PI;

pub const PATH: &str = "plasma.formulary.ionization";

pub fn module() -> SourceModule {
    SourceModule::new(PATH)
        .with_function(z_bal())
        .with_function(saha())
}

const Z_BAL_DOC: &str = r#"Calculate the average ionization state from the ionic fractions.

    Parameters
    ----------
    ionic_fractions : numpy.ndarray
        Fraction of atoms in each ionization state, starting with the
        neutral state.

    Returns
    -------
    Z : float
        The average ionization state of the ions in the plasma.
    "#;

pub fn z_bal() -> SourceFunction {
    let desc = FunctionDescriptor::new("Z_bal")
        .param(ParamDescriptor::required("ionic_fractions", UnitAnnotation::type_name("<class 'numpy.ndarray'>")))
        .doc(Z_BAL_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Z_bal";
        let fractions = match a.first() {
            Some(Value::List(items)) => items,
            Some(other) => return Err(CallError::arg_type(f, "ionic_fractions", "List", other.type_name())),
            None => return Err(CallError::missing_arg(f, "ionic_fractions")),
        };
        let mut total = 0.0;
        let mut weighted = 0.0;
        for (state, item) in fractions.iter().enumerate() {
            let fraction = item.as_f64()
                .ok_or_else(|| CallError::arg_type(f, "ionic_fractions", "Number", item.type_name()))?;
            if fraction < 0.0 {
                return Err(CallError::domain_error(f, "ionic fractions must be non-negative"));
            }
            total += fraction;
            weighted += state as f64 * fraction;
        }
        if total == 0.0 {
            return Err(CallError::domain_error(f, "ionic fractions sum to zero"));
        }
        Ok(Value::Number(weighted / total))
    })
}

const SAHA_DOC: &str = r#"Return the ratio of populations of two ionization states.

    Parameters
    ----------
    g_j : int
        The degeneracy of ionization state j.

    g_k : int
        The degeneracy of ionization state k.

    n_e : ~formulink.Quantity
        The electron number density in units of inverse cubic meters.

    E_jk : ~formulink.Quantity
        The ionization energy between ionization states j and k in joules.

    T_e : ~formulink.Quantity
        The electron temperature in kelvin.

    Returns
    -------
    ratio : ~formulink.Quantity
        The ratio of population of ions in ionization state j to state k.
    "#;

pub fn saha() -> SourceFunction {
    let degeneracy = || UnitAnnotation::type_name("typing.Union[int, float]");
    let desc = FunctionDescriptor::new("Saha")
        .param(ParamDescriptor::required("g_j", degeneracy()))
        .param(ParamDescriptor::required("g_k", degeneracy()))
        .param(ParamDescriptor::required("n_e", UnitAnnotation::unit("1 / m**3")))
        .param(ParamDescriptor::required("E_jk", UnitAnnotation::unit("J")))
        .param(ParamDescriptor::required("T_e", UnitAnnotation::unit("K")))
        .returns(UnitAnnotation::unit(""))
        .doc(SAHA_DOC);
    SourceFunction::new(desc, |a| {
        let f = "Saha";
        let g_j = args::positive(f, a, 0, "g_j")?;
        let g_k = args::positive(f, a, 1, "g_k")?;
        let n_e = args::positive(f, a, 2, "n_e")?;
        let e_jk = args::number(f, a, 3, "E_jk")?;
        let t_e = args::positive(f, a, 4, "T_e")?;
        let kt = K_B * t_e;
        let thermal = (2.0 * PI * M_E * kt / (H * H)).powf(1.5);
        let ratio = 2.0 * (g_k / g_j) * thermal / n_e * (-e_jk / kt).exp();
        Ok(quantity(ratio, ""))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_bal() {
        let fractions = Value::List(vec![Value::Number(0.0), Value::Number(0.5), Value::Number(0.5)]);
        assert_eq!(z_bal().call(&[fractions]), Value::Number(1.5));
    }

    #[test]
    fn test_z_bal_rejects_scalar() {
        assert!(z_bal().call(&[Value::Number(1.0)]).is_error());
        assert!(z_bal().call(&[Value::List(vec![])]).is_error());
    }

    #[test]
    fn test_saha_grows_with_temperature() {
        let f = saha();
        let args = |t: f64| [
            Value::Number(2.0), Value::Number(1.0), Value::Number(1e20),
            Value::Number(13.6 * E_CHARGE), Value::Number(t),
        ];
        let cold = f.call(&args(5e3)).as_f64().unwrap();
        let hot = f.call(&args(2e4)).as_f64().unwrap();
        assert!(hot > cold);
        assert!(cold > 0.0);
    }
}
