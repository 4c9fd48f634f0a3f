//! Source function descriptors
//!
//! A descriptor is the fixed-shape record of everything the adapter needs to
//! know about a formulary function: its identifier, its ordered parameters
//! with their unit annotations and defaults, its return annotation, and its
//! documentation text. Descriptors are plain data.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the boolean parameter that switches angular-rate output to frequency
pub const TO_HZ: &str = "to_hz";

/// Annotation attached to a parameter or return value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum UnitAnnotation {
    /// A physical unit in compact source form, e.g. `"1 / m3"`
    Unit(String),
    /// Any of several units, e.g. number density or mass density
    OneOf(Vec<String>),
    /// A non-unit type, e.g. `class Particle` or `typing.Optional[Real]`
    Type(String),
}

impl UnitAnnotation {
    pub fn unit(text: impl Into<String>) -> Self {
        UnitAnnotation::Unit(text.into())
    }

    pub fn one_of(units: &[&str]) -> Self {
        UnitAnnotation::OneOf(units.iter().map(|u| u.to_string()).collect())
    }

    pub fn type_name(text: impl Into<String>) -> Self {
        UnitAnnotation::Type(text.into())
    }

    /// Compact unit form. Only plain units have one.
    pub fn compact(&self) -> Option<&str> {
        match self {
            UnitAnnotation::Unit(u) => Some(u),
            _ => None,
        }
    }
}

impl fmt::Display for UnitAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitAnnotation::Unit(u) => write!(f, "{}", u),
            UnitAnnotation::OneOf(units) => write!(f, "[{}]", units.join(", ")),
            UnitAnnotation::Type(t) => write!(f, "{}", t),
        }
    }
}

/// One parameter of a formulary function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<UnitAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamDescriptor {
    pub fn required(name: &str, annotation: UnitAnnotation) -> Self {
        Self { name: name.to_string(), annotation: Some(annotation), default: None }
    }

    pub fn optional(name: &str, annotation: UnitAnnotation, default: impl Into<Value>) -> Self {
        Self { name: name.to_string(), annotation: Some(annotation), default: Some(default.into()) }
    }

    /// Parameter with no annotation at all
    pub fn bare(name: &str) -> Self {
        Self { name: name.to_string(), annotation: None, default: None }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Everything the adapter reads from a formulary function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub params: Vec<ParamDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<UnitAnnotation>,
    pub doc: String,
}

impl FunctionDescriptor {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), params: Vec::new(), returns: None, doc: String::new() }
    }

    pub fn param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, annotation: UnitAnnotation) -> Self {
        self.returns = Some(annotation);
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    pub fn param_named(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// True when the function declares the angular-rate/frequency switch
    pub fn is_dual_mode(&self) -> bool {
        self.param_named(TO_HZ).is_some()
    }

    /// Declared default of the `to_hz` switch, if it is a boolean
    pub fn to_hz_default(&self) -> Option<bool> {
        self.param_named(TO_HZ)
            .and_then(|p| p.default.as_ref())
            .and_then(Value::as_bool)
    }
}
