//! Formulink Registry
//!
//! A keyed store of unit-annotated callables. Each entry records the unit of
//! its output and of every argument, in the registry's unit grammar, along
//! with hidden arguments and a citation.

mod entry;
mod error;
mod registry;
mod reserved;

pub use entry::{Entry, EntryMeta};
pub use error::RegistryError;
pub use registry::Registry;
pub use reserved::{is_reserved, RESERVED_IDENTIFIERS};

/// Re-export core types for registry users
pub mod prelude {
    pub use crate::{Entry, EntryMeta, Registry, RegistryError, is_reserved};
    pub use formulink_core::prelude::*;
}
