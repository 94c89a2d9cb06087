//! Merge module - Diffing and merging of trees.
//!
//! [`get_changes`] flattens the difference between two trees into a map of
//! changed paths; [`merge_objects`] uses it in both directions to combine
//! two diverged trees and report the paths they disagree on.

mod conflict;
mod diff;
mod merger;

#[cfg(test)]
mod merge_test;

pub use crate::value::Changes;
pub use conflict::*;
pub use diff::*;
pub use merger::*;
