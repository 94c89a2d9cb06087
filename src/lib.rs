//! # Tree Schema
//!
//! Schema-driven editing of JSON/YAML-like trees.
//!
//! A definition maps path patterns such as `items.[].name` or
//! `stuff.{}.id` to leaf type names. A compiled definition validates trees,
//! writes values at nested paths, applies flat change sets, and merges two
//! trees that diverged from a common ancestor. Every write prunes nulls and
//! empty containers from the result.
//!
//! ## Modules
//!
//! - [`value`] - In-memory tree representation, copy-on-write deep set and pruning
//! - [`fieldpath`] - Dotted path parsing and lookup
//! - [`schema`] - Definitions, leaf types and the pattern matcher
//! - [`typed`] - Validation and the [`TreeSchema`] facade
//! - [`merge`] - Flat diffs and three-way style merging

pub mod error;
pub mod fieldpath;
pub mod merge;
pub mod schema;
pub mod typed;
pub mod value;

pub use error::{Error, Result};
pub use fieldpath::{Path, Segment};
pub use merge::{get_changes, merge_objects, Conflict, Conflicts, DiffOptions, MergeResult};
pub use schema::{Definition, LeafKind, Matcher, Registry, TypeDecl};
pub use typed::{build_definition, build_definition_with, TreeSchema, ValidationError};
pub use value::{apply_changes, deep_set, prune, Changes, Map, Value};
