//! Callables handed to the registry
//!
//! A formulary function is wrapped so that its quantity results come back as
//! bare numbers. Functions with a `to_hz` switch are additionally bound to
//! each setting, giving two callables that no longer take the switch.

use crate::resolve::output_unit;
use formulink_core::{bind_args, Callable, FunctionDescriptor, ParamDescriptor, Value, TO_HZ};
use formulink_registry::EntryMeta;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Strips the unit from a quantity result. Other results pass through.
pub struct StripUnits {
    inner: Arc<dyn Callable>,
}

impl StripUnits {
    pub fn new(inner: Arc<dyn Callable>) -> Self {
        Self { inner }
    }
}

impl Callable for StripUnits {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn params(&self) -> &[ParamDescriptor] {
        self.inner.params()
    }

    fn call(&self, args: &[Value]) -> Value {
        self.inner.call(args).into_bare()
    }
}

/// A callable with one parameter fixed to a value and removed from its
/// signature
pub struct BoundFlag {
    inner: Arc<dyn Callable>,
    value: Value,
    position: usize,
    params: Vec<ParamDescriptor>,
}

impl BoundFlag {
    /// Bind `flag` of `inner` to `value`. None if `inner` has no such parameter.
    pub fn new(inner: Arc<dyn Callable>, flag: &str, value: Value) -> Option<Self> {
        let position = inner.params().iter().position(|p| p.name == flag)?;
        let params = inner.params().iter()
            .filter(|p| p.name != flag)
            .cloned()
            .collect();
        Some(Self { inner, value, position, params })
    }

    pub fn bound_value(&self) -> &Value {
        &self.value
    }
}

impl Callable for BoundFlag {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn call(&self, args: &[Value]) -> Value {
        let mut bound = match bind_args(self.inner.name(), &self.params, args) {
            Ok(b) => b,
            Err(e) => return Value::Error(e),
        };
        bound.insert(self.position, self.value.clone());
        self.inner.call(&bound)
    }
}

/// A callable and its metadata, ready for `Registry::insert`
pub struct PreparedEntry {
    pub key: String,
    pub callable: Arc<dyn Callable>,
    pub meta: EntryMeta,
}

impl std::fmt::Debug for PreparedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedEntry")
            .field("key", &self.key)
            .field("function", &self.callable.name())
            .field("meta", &self.meta)
            .finish()
    }
}

/// Build the registry entries for one function.
///
/// A plain function yields one entry under `key`. A dual-mode function
/// yields `key1` (angular rate) and `key2` (frequency) with `to_hz` hidden.
pub fn prepare_entries(
    function: Arc<dyn Callable>,
    desc: &FunctionDescriptor,
    key: &str,
    arg_units: &BTreeMap<String, String>,
    citation: &str,
) -> Vec<PreparedEntry> {
    let stripped: Arc<dyn Callable> = Arc::new(StripUnits::new(function));

    if !desc.is_dual_mode() {
        let meta = EntryMeta::new(output_unit(desc, None))
            .with_arg_units(arg_units.clone())
            .with_citation(citation);
        return vec![PreparedEntry { key: key.to_string(), callable: stripped, meta }];
    }

    [(false, "1"), (true, "2")]
        .into_iter()
        .filter_map(|(to_hz, suffix)| {
            let bound = BoundFlag::new(stripped.clone(), TO_HZ, Value::Bool(to_hz))?;
            let meta = EntryMeta::new(output_unit(desc, Some(to_hz)))
                .with_arg_units(arg_units.clone())
                .with_hidden_arg(TO_HZ)
                .with_citation(citation);
            Some(PreparedEntry {
                key: format!("{}{}", key, suffix),
                callable: Arc::new(bound),
                meta,
            })
        })
        .collect()
}
