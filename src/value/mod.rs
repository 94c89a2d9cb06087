//! Value module - In-memory representation of JSON/YAML trees.
//!
//! Besides the tree model itself this module holds the two structural
//! operations every write goes through: the deep setter and the pruner.

mod deep_set;
mod prune;
mod value;

pub use deep_set::{apply_changes, deep_set, Changes};
pub use prune::{prune, prune_in_place};
pub use value::*;
