//! Per-function import failures
//!
//! None of these abort a batch. The drivers turn each one into a
//! diagnostic and move on to the next function.

use formulink_registry::RegistryError;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("module {module} is not in the allow-list")]
    ModuleNotAllowed { module: String },

    #[error("{function} is known to return incompatible data")]
    Denied { function: String },

    #[error("module {module} was not found in the source library")]
    ModuleMissing { module: String },

    #[error("{module} has no function named {function}")]
    FunctionMissing { module: String, function: String },

    #[error("the {function} function returns more than one value ({returns})")]
    MultiValue { function: String, returns: String },

    #[error("registering {function} as {key} failed (units: {units}, arg units: {arg_units:?}): {source}")]
    Insert {
        function: String,
        key: String,
        units: String,
        arg_units: BTreeMap<String, String>,
        #[source]
        source: RegistryError,
    },
}
