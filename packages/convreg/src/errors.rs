//! Error types for the convreg crate
//!
//! Registry-level failures are categorized here and mapped to Python
//! exceptions in one place. Adapter-internal failures (element extraction,
//! iteration errors) stay as raw `PyErr`s so host error semantics pass
//! through untouched.

use pyo3::exceptions::{PyRuntimeError, PyTypeError};
use pyo3::PyErr;
use thiserror::Error;

/// Registry dispatch error
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Entries exist for the target type, but none accepts this input.
    #[error("no registered converter accepts Python '{input}' as {target}")]
    NotConvertible {
        input: String,
        target: &'static str,
    },

    /// Nothing was registered for the target type at all.
    #[error("no converter registered for {target}")]
    MissingConverter { target: &'static str },

    /// An adapter produced a value of the wrong type. Registry bug.
    #[error("converter for {target} produced a value of an unexpected type")]
    TypeMismatch { target: &'static str },
}

impl From<ConvertError> for PyErr {
    fn from(err: ConvertError) -> PyErr {
        match err {
            ConvertError::TypeMismatch { .. } => PyRuntimeError::new_err(err.to_string()),
            _ => PyTypeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConvertError>;
