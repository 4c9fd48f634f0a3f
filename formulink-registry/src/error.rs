//! Insertion errors

use formulink_units::UnitError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("'{0}' is not a valid identifier")]
    InvalidKey(String),

    #[error("'{0}' is already registered")]
    DuplicateKey(String),

    #[error("{key}: output unit '{units}' is not accepted: {source}")]
    InvalidUnits {
        key: String,
        units: String,
        #[source]
        source: UnitError,
    },

    #[error("{key}: unit '{units}' of argument '{arg}' is not accepted: {source}")]
    InvalidArgUnits {
        key: String,
        arg: String,
        units: String,
        #[source]
        source: UnitError,
    },

    #[error("{key}: unit given for unknown argument '{arg}'")]
    UnknownArgument { key: String, arg: String },
}
