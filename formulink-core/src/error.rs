//! Structured call errors
//!
//! Errors raised while invoking a formulary function never panic. They are
//! values carried inside `Value::Error` so a registry caller can inspect them.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const UNKNOWN_PARTICLE: &str = "UNKNOWN_PARTICLE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Error produced by a function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Function the error was raised in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl CallError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            function: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: record the function name
    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        self.function = Some(name.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .in_function(func)
    }

    pub fn missing_arg(func: &str, arg: &str) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() missing required argument '{}'", func, arg))
            .in_function(func)
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
            .in_function(func)
    }

    pub fn domain_error(func: &str, details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
            .in_function(func)
    }

    pub fn unknown_particle(symbol: &str) -> Self {
        Self::new(codes::UNKNOWN_PARTICLE, format!("Unknown particle: {}", symbol))
            .with_suggestion("Use one of: e-, p+, n, alpha, D+")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for CallError {}
