//! Conflict types for merge operations.

use crate::value::Value;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Conflict is a path both sides changed to different values.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    /// The conflicting path, as reported by the diff.
    pub path: String,
    /// The value the first tree holds at `path`.
    pub ours: Value,
    /// The value the second tree holds at `path`.
    pub theirs: Value,
}

impl Conflict {
    /// Creates a new conflict.
    pub fn new(path: impl Into<String>, ours: Value, theirs: Value) -> Self {
        Conflict {
            path: path.into(),
            ours,
            theirs,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conflict at {}: {} vs {}", self.path, self.ours, self.theirs)
    }
}

impl Serialize for Conflict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_seq(Some(2))?;
        pair.serialize_element(&self.ours)?;
        pair.serialize_element(&self.theirs)?;
        pair.end()
    }
}

/// Conflicts is a collection of conflicts, ordered by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conflicts {
    conflicts: Vec<Conflict>,
}

impl Conflicts {
    /// Creates a new empty Conflicts collection.
    pub fn new() -> Self {
        Conflicts {
            conflicts: Vec::new(),
        }
    }

    /// Adds a conflict.
    pub fn add(&mut self, conflict: Conflict) {
        self.conflicts.push(conflict);
    }

    /// Returns true if there are no conflicts.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Returns the number of conflicts.
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// Returns an iterator over the conflicts.
    pub fn iter(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter()
    }

    /// Returns the conflict recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&Conflict> {
        self.conflicts.iter().find(|c| c.path == path)
    }

    /// Returns the conflicting paths.
    pub fn paths(&self) -> Vec<&str> {
        self.conflicts.iter().map(|c| c.path.as_str()).collect()
    }
}

impl IntoIterator for Conflicts {
    type Item = Conflict;
    type IntoIter = std::vec::IntoIter<Conflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.conflicts.into_iter()
    }
}

impl FromIterator<Conflict> for Conflicts {
    fn from_iter<T: IntoIterator<Item = Conflict>>(iter: T) -> Self {
        Conflicts {
            conflicts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Conflicts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conflict) in self.conflicts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", conflict)?;
        }
        Ok(())
    }
}

/// Serializes as a map from path to `[ours, theirs]`.
impl Serialize for Conflicts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.conflicts.len()))?;
        for conflict in &self.conflicts {
            map.serialize_entry(&conflict.path, conflict)?;
        }
        map.end()
    }
}
