//! Argument extraction for formulary function bodies
//!
//! Bodies receive arguments already bound to their parameters, so a missing
//! index only happens when a body reads past its own signature.

use crate::particles::{self, Particle};
use formulink_core::{CallError, Quantity, Value};

fn get<'a>(func: &str, args: &'a [Value], i: usize, name: &str) -> Result<&'a Value, CallError> {
    match args.get(i) {
        Some(Value::Error(e)) => Err(e.clone()),
        Some(v) => Ok(v),
        None => Err(CallError::missing_arg(func, name)),
    }
}

/// Magnitude of a bare number or a quantity
pub fn number(func: &str, args: &[Value], i: usize, name: &str) -> Result<f64, CallError> {
    let v = get(func, args, i, name)?;
    v.as_f64().ok_or_else(|| CallError::arg_type(func, name, "Number", v.type_name()))
}

/// A number that may be left as `Null`
pub fn optional_number(func: &str, args: &[Value], i: usize, name: &str) -> Result<Option<f64>, CallError> {
    match get(func, args, i, name)? {
        Value::Null => Ok(None),
        _ => number(func, args, i, name).map(Some),
    }
}

/// Strictly positive number
pub fn positive(func: &str, args: &[Value], i: usize, name: &str) -> Result<f64, CallError> {
    let x = number(func, args, i, name)?;
    if x > 0.0 {
        Ok(x)
    } else {
        Err(CallError::domain_error(func, format!("{} must be positive, got {}", name, x)))
    }
}

pub fn flag(func: &str, args: &[Value], i: usize, name: &str) -> Result<bool, CallError> {
    let v = get(func, args, i, name)?;
    v.as_bool().ok_or_else(|| CallError::arg_type(func, name, "Bool", v.type_name()))
}

pub fn text<'a>(func: &str, args: &'a [Value], i: usize, name: &str) -> Result<&'a str, CallError> {
    let v = get(func, args, i, name)?;
    v.as_text().ok_or_else(|| CallError::arg_type(func, name, "Text", v.type_name()))
}

/// Particle given by its symbol
pub fn particle(func: &str, args: &[Value], i: usize, name: &str) -> Result<&'static Particle, CallError> {
    let symbol = text(func, args, i, name)?;
    particles::lookup(symbol).map_err(|e| e.in_function(func))
}

/// Charged particle given by its symbol
pub fn charged(func: &str, args: &[Value], i: usize, name: &str) -> Result<&'static Particle, CallError> {
    let p = particle(func, args, i, name)?;
    if !p.is_charged() {
        return Err(CallError::domain_error(func, format!("{} must be charged, got {}", name, p.symbol)));
    }
    Ok(p)
}

/// The unit attached to an argument, if it carries one
pub fn unit_of<'a>(args: &'a [Value], i: usize) -> Option<&'a str> {
    args.get(i).and_then(Value::as_quantity).map(|q| q.unit.as_str())
}

pub fn quantity(value: f64, unit: &str) -> Value {
    Value::Quantity(Quantity::new(value, unit))
}
