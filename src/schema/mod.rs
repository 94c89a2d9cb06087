//! Schema module - Declares the shape of a tree as path patterns.
//!
//! A definition maps dot-joined path patterns to leaf type names. The
//! [`Matcher`] compiled from it resolves concrete paths to their declared
//! type, and the [`Registry`] turns type names into predicates.

mod elements;
mod leaf;
mod matcher;

pub use elements::*;
pub use leaf::*;
pub use matcher::*;
