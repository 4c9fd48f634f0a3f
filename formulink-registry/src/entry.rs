//! Registry entries and their metadata

use formulink_core::{Callable, ParamDescriptor, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Metadata attached to a registered callable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// Output unit in registry grammar
    pub units: String,
    /// Unit of each argument, in registry grammar
    pub arg_units: BTreeMap<String, String>,
    /// Arguments callers never pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

impl EntryMeta {
    pub fn new(units: impl Into<String>) -> Self {
        Self { units: units.into(), ..Default::default() }
    }

    pub fn with_arg_units(mut self, arg_units: BTreeMap<String, String>) -> Self {
        self.arg_units = arg_units;
        self
    }

    pub fn with_hidden_arg(mut self, name: impl Into<String>) -> Self {
        self.hidden_args.push(name.into());
        self
    }

    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden_args.iter().any(|h| h == name)
    }
}

/// A stored callable with its metadata
#[derive(Clone)]
pub struct Entry {
    pub(crate) callable: Arc<dyn Callable>,
    pub(crate) meta: EntryMeta,
}

impl Entry {
    pub fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    /// Parameters callers pass, in order
    pub fn params(&self) -> &[ParamDescriptor] {
        self.callable.params()
    }

    pub fn arg_names(&self) -> Vec<&str> {
        self.params().iter().map(|p| p.name.as_str()).collect()
    }

    pub fn call(&self, args: &[Value]) -> Value {
        self.callable.call(args)
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("function", &self.callable.name())
            .field("args", &self.arg_names())
            .field("meta", &self.meta)
            .finish()
    }
}
