//! Formulink - formulary functions in a unit-aware registry
//!
//! Reads the unit annotations and documentation of formulary functions and
//! registers each one under a collision-free name, with its output and
//! argument units re-expressed in the registry's unit grammar. Registered
//! callables return bare numbers.
//!
//! ```ignore
//! use formulink::{Importer, Verbosity};
//! use formulink_core::Value;
//! use formulink_formulary::Formulary;
//!
//! let formulary = Formulary::standard();
//! let report = Importer::new(&formulary).with_verbosity(Verbosity::Quiet).import_all(None);
//! let omega = report.registry.call("omega_p1", &[Value::Number(1e19), Value::from("e-")]);
//! ```

mod config;
mod driver;
mod error;
mod naming;
mod normalize;
mod resolve;
mod wrap;

pub use config::{BridgeConfig, ConfigError, DEFAULT_CITATION, DEFAULT_DENY, DEFAULT_MODULES};
pub use driver::{import_all, import_list, Diagnostic, DiagnosticKind, ImportReport, Importer, Verbosity};
pub use error::BridgeError;
pub use naming::{derive_name, disambiguate, resolve_name, NameCounter};
pub use normalize::{normalize_unit, UnitSource, DIMENSIONLESS};
pub use resolve::{arg_units, output_unit, ANGULAR_RATE, FREQUENCY};
pub use wrap::{prepare_entries, BoundFlag, PreparedEntry, StripUnits};

/// Everything needed to run an import
pub mod prelude {
    pub use crate::{BridgeConfig, ImportReport, Importer, Verbosity};
    pub use formulink_registry::prelude::*;
}
