//! Error handling for Python bindings.
//!
//! Engine errors are raised as subclasses of `LogfeatError`, itself a
//! `RuntimeError`, so callers catching `RuntimeError` see every engine failure.

use pyo3::create_exception;
use pyo3::exceptions::{PyRuntimeError, PyTypeError};
use pyo3::prelude::*;
use thiserror::Error;

use logfeat::FeatureError;

// =============================================================================
// Python Exception Classes
// =============================================================================

create_exception!(_logfeat, LogfeatError, PyRuntimeError, "Base class of logfeat errors.");
create_exception!(
    _logfeat,
    InvalidArgumentError,
    LogfeatError,
    "A parameter is outside its allowed domain."
);
create_exception!(
    _logfeat,
    SchemaMismatchError,
    LogfeatError,
    "Required columns are missing or have an incompatible type."
);
create_exception!(
    _logfeat,
    WorkerFailureError,
    LogfeatError,
    "One or more partitions failed during parallel extraction."
);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur in the logfeat Python bindings.
#[derive(Debug, Error)]
pub enum LogfeatPyError {
    /// Error raised by the extraction engine.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// A Python argument is not the expected pyarrow object.
    #[error("Expected {expected}, got {got}")]
    NotArrow { expected: &'static str, got: String },
}

/// Python exception class an error is raised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionClass {
    InvalidArgument,
    SchemaMismatch,
    WorkerFailure,
    Logfeat,
    Type,
}

impl LogfeatPyError {
    pub fn exception_class(&self) -> ExceptionClass {
        match self {
            Self::Feature(FeatureError::InvalidArgument { .. }) => ExceptionClass::InvalidArgument,
            Self::Feature(FeatureError::SchemaMismatch(_)) => ExceptionClass::SchemaMismatch,
            Self::Feature(FeatureError::WorkerFailure { .. }) => ExceptionClass::WorkerFailure,
            Self::Feature(_) => ExceptionClass::Logfeat,
            Self::NotArrow { .. } => ExceptionClass::Type,
        }
    }
}

impl From<LogfeatPyError> for PyErr {
    fn from(err: LogfeatPyError) -> PyErr {
        let message = err.to_string();
        match err.exception_class() {
            ExceptionClass::InvalidArgument => InvalidArgumentError::new_err(message),
            ExceptionClass::SchemaMismatch => SchemaMismatchError::new_err(message),
            ExceptionClass::WorkerFailure => WorkerFailureError::new_err(message),
            ExceptionClass::Logfeat => LogfeatError::new_err(message),
            ExceptionClass::Type => PyTypeError::new_err(message),
        }
    }
}

/// Register the exception classes on the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("LogfeatError", py.get_type_bound::<LogfeatError>())?;
    m.add("InvalidArgumentError", py.get_type_bound::<InvalidArgumentError>())?;
    m.add("SchemaMismatchError", py.get_type_bound::<SchemaMismatchError>())?;
    m.add("WorkerFailureError", py.get_type_bound::<WorkerFailureError>())?;
    Ok(())
}
