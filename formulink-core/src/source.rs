//! Source library surface: callables, functions, modules

use crate::{CallError, FunctionDescriptor, ParamDescriptor, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Anything that can be invoked with positional arguments
pub trait Callable: Send + Sync {
    /// Name used in error messages
    fn name(&self) -> &str;

    /// Exposed parameters, in calling order
    fn params(&self) -> &[ParamDescriptor];

    fn call(&self, args: &[Value]) -> Value;
}

/// Fill omitted trailing arguments with their declared defaults.
pub fn bind_args(func: &str, params: &[ParamDescriptor], args: &[Value]) -> Result<Vec<Value>, CallError> {
    if args.len() > params.len() {
        return Err(CallError::arg_count(func, params.len(), args.len()));
    }

    let mut bound = args.to_vec();
    for param in &params[args.len()..] {
        match &param.default {
            Some(default) => bound.push(default.clone()),
            None => return Err(CallError::missing_arg(func, &param.name)),
        }
    }
    Ok(bound)
}

type Body = dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync;

/// A formulary function: its descriptor plus the code that computes it
#[derive(Clone)]
pub struct SourceFunction {
    descriptor: FunctionDescriptor,
    body: Arc<Body>,
}

impl SourceFunction {
    pub fn new<F>(descriptor: FunctionDescriptor, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self { descriptor, body: Arc::new(body) }
    }

    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }
}

impl Callable for SourceFunction {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.descriptor.params
    }

    fn call(&self, args: &[Value]) -> Value {
        let bound = match bind_args(&self.descriptor.name, &self.descriptor.params, args) {
            Ok(b) => b,
            Err(e) => return Value::Error(e),
        };
        match (self.body)(&bound) {
            Ok(v) => v,
            Err(e) if e.function.is_none() => Value::Error(e.in_function(&self.descriptor.name)),
            Err(e) => Value::Error(e),
        }
    }
}

impl std::fmt::Debug for SourceFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFunction")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// A module of the source library with its ordered export list
#[derive(Debug, Clone, Default)]
pub struct SourceModule {
    path: String,
    exports: Vec<String>,
    functions: HashMap<String, Arc<SourceFunction>>,
}

impl SourceModule {
    pub fn new(path: &str) -> Self {
        Self { path: path.to_string(), ..Default::default() }
    }

    /// Export a function under its own name
    pub fn with_function(mut self, function: SourceFunction) -> Self {
        let name = function.descriptor().name.clone();
        self.exports.push(name.clone());
        self.functions.insert(name, Arc::new(function));
        self
    }

    /// Export an additional name for an already exported function
    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        if let Some(f) = self.functions.get(target).cloned() {
            self.exports.push(alias.to_string());
            self.functions.insert(alias.to_string(), f);
        }
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|s| s.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<SourceFunction>> {
        self.functions.get(name)
    }
}

/// Discoverable set of modules
pub trait SourceLibrary {
    fn module(&self, path: &str) -> Option<&SourceModule>;

    fn modules(&self) -> Vec<&SourceModule>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitAnnotation;

    fn doubler() -> SourceFunction {
        let desc = FunctionDescriptor::new("double")
            .param(ParamDescriptor::required("x", UnitAnnotation::unit("m")))
            .param(ParamDescriptor::optional("factor", UnitAnnotation::unit(""), 2.0));
        SourceFunction::new(desc, |args| {
            let x = args[0].as_f64().ok_or_else(|| CallError::arg_type("double", "x", "Number", args[0].type_name()))?;
            let k = args[1].as_f64().unwrap_or(2.0);
            Ok(Value::Number(x * k))
        })
    }

    #[test]
    fn test_defaults_fill_trailing_args() {
        let f = doubler();
        assert_eq!(f.call(&[Value::Number(3.0)]), Value::Number(6.0));
        assert_eq!(f.call(&[Value::Number(3.0), Value::Number(3.0)]), Value::Number(9.0));
    }

    #[test]
    fn test_missing_required_arg() {
        let f = doubler();
        match f.call(&[]) {
            Value::Error(e) => {
                assert_eq!(e.code, crate::codes::ARG_COUNT);
                assert!(e.message.contains("'x'"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_args() {
        let f = doubler();
        let v = f.call(&[Value::Number(1.0), Value::Number(1.0), Value::Number(1.0)]);
        assert!(v.is_error());
    }

    #[test]
    fn test_body_errors_carry_function_name() {
        let f = doubler();
        match f.call(&[Value::Text("x".into())]) {
            Value::Error(e) => assert_eq!(e.function.as_deref(), Some("double")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_module_exports_keep_order_and_aliases() {
        let m = SourceModule::new("demo").with_function(doubler()).with_alias("double_", "double");
        let exports: Vec<&str> = m.exports().collect();
        assert_eq!(exports, vec!["double", "double_"]);
        assert!(Arc::ptr_eq(m.get("double").unwrap(), m.get("double_").unwrap()));
        assert!(m.get("missing").is_none());
    }
}
