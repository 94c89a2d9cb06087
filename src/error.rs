//! Crate-level error type.

use crate::typed::ValidationError;
use thiserror::Error;

/// Result type alias for tree-schema operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading documents or schemas, or validating trees.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
