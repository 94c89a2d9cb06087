//! Merging two trees that evolved from a common ancestor.

use super::conflict::{Conflict, Conflicts};
use super::diff::{get_changes, DiffOptions};
use crate::fieldpath::{get_in, Path};
use crate::value::{apply_changes, Changes, Value};
use serde::Serialize;

/// MergeResult holds the merged tree and any unresolved conflicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeResult {
    /// The first tree with every non-conflicting change folded in.
    pub updated: Value,
    /// Paths both sides changed differently. Not applied to `updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Conflicts>,
}

impl MergeResult {
    fn clean(updated: Value) -> Self {
        MergeResult {
            updated,
            conflicts: None,
        }
    }

    /// Returns true if there are conflicts to resolve.
    pub fn has_conflicts(&self) -> bool {
        self.conflicts.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Merges `obj2` into `obj1`.
///
/// Each side's additions are what it has that the other lacks or holds
/// differently; deletions are never merged. When only one side added
/// anything, those additions are applied to the other side. When both did,
/// every path added by exactly one side is applied to `obj1` and every path
/// added by both becomes a [`Conflict`] carrying the values `obj1` and
/// `obj2` hold there. Conflicting paths keep `obj1`'s value.
pub fn merge_objects(obj1: &Value, obj2: &Value) -> MergeResult {
    let additions_only = DiffOptions::new().include_deletions(false);
    let added_by_obj2 = get_changes(obj1, obj2, &additions_only);
    let added_by_obj1 = get_changes(obj2, obj1, &additions_only);

    let (added_by_obj1, added_by_obj2) = match (added_by_obj1, added_by_obj2) {
        (None, None) => return MergeResult::clean(obj1.clone()),
        (None, Some(added)) => return MergeResult::clean(apply_changes(obj1, &added, false)),
        (Some(added), None) => return MergeResult::clean(apply_changes(obj2, &added, false)),
        (Some(a1), Some(a2)) => (a1, a2),
    };

    let mut conflicts = Conflicts::new();
    let mut not_conflicted = Changes::new();
    for (path, value) in &added_by_obj2 {
        if added_by_obj1.contains_key(path) {
            let parsed = Path::parse(path);
            conflicts.add(Conflict::new(
                path.clone(),
                get_in(obj1, &parsed).cloned().unwrap_or_default(),
                get_in(obj2, &parsed).cloned().unwrap_or_default(),
            ));
        } else {
            not_conflicted.insert(path.clone(), value.clone());
        }
    }
    for (path, value) in added_by_obj1 {
        if !added_by_obj2.contains_key(&path) {
            not_conflicted.insert(path, value);
        }
    }

    if !conflicts.is_empty() {
        tracing::debug!(
            conflicts = conflicts.len(),
            applied = not_conflicted.len(),
            "merge found conflicting paths"
        );
    }

    MergeResult {
        updated: apply_changes(obj1, &not_conflicted, false),
        conflicts: if conflicts.is_empty() {
            None
        } else {
            Some(conflicts)
        },
    }
}
