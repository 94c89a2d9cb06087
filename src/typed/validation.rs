//! Validation errors.

use crate::value::Value;
use thiserror::Error;

/// ValidationError is the first violation found while validating a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No pattern in the definition matches the path.
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// The path is declared but the value fails its type.
    #[error("invalid value at {path}: {value}")]
    InvalidValue { path: String, value: Value },

    /// The declared type name (or every alternative) is not registered.
    #[error("{path}: unknown type: {type_name}")]
    UnknownType { path: String, type_name: String },
}

impl ValidationError {
    /// Creates an invalid path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        ValidationError::InvalidPath { path: path.into() }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(path: impl Into<String>, value: Value) -> Self {
        ValidationError::InvalidValue {
            path: path.into(),
            value,
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        ValidationError::UnknownType {
            path: path.into(),
            type_name: type_name.into(),
        }
    }

    /// Returns the path the error was raised at.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::InvalidPath { path }
            | ValidationError::InvalidValue { path, .. }
            | ValidationError::UnknownType { path, .. } => path,
        }
    }
}
