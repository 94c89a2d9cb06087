//! Typed module - Operations on trees with a compiled definition.
//!
//! This module provides validation and the [`TreeSchema`] facade that
//! validates the results of set, update and merge.

mod tree_schema;
mod validation;
mod validator;

#[cfg(test)]
mod tree_schema_test;

pub use tree_schema::*;
pub use validation::*;
pub use validator::*;
