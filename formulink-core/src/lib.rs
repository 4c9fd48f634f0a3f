//! Formulink Core - Fundamental types
//!
//! This crate provides the core types shared by the formulary and the adapter:
//! - `Value`: runtime values, with unit-bearing quantities kept distinct from bare numbers
//! - `CallError`: structured errors raised by function invocations
//! - `FunctionDescriptor`: the data shape of a source function
//! - `Callable`, `SourceFunction`, `SourceModule`, `SourceLibrary`: the source library surface

mod value;
mod error;
mod descriptor;
mod source;

pub use value::{Value, Quantity};
pub use error::{CallError, codes};
pub use descriptor::{FunctionDescriptor, ParamDescriptor, UnitAnnotation, TO_HZ};
pub use source::{Callable, SourceFunction, SourceModule, SourceLibrary, bind_args};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Value, Quantity, CallError,
        FunctionDescriptor, ParamDescriptor, UnitAnnotation,
        Callable, SourceFunction, SourceModule, SourceLibrary,
    };
    pub use crate::error::codes;
}
