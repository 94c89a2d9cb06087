//! Field path module - Addresses locations inside nested trees.
//!
//! Paths are written as dot-joined strings; a `[n]` segment is an explicit
//! array index and everything else is an object key.

mod path;

pub use path::*;
