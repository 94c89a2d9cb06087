//! Copy-on-write writes at nested paths.

use super::prune::prune_in_place;
use super::{Map, Value};
use crate::fieldpath::{Path, Segment};
use std::collections::BTreeMap;

/// Changes is a flat mapping from path string to new value.
///
/// A `Null` value means "delete whatever is at this path".
pub type Changes = BTreeMap<String, Value>;

/// Writes `update` at `path` into a copy of `source` and prunes the result.
///
/// A `Null` update deletes the final segment from its parent: list members
/// are spliced out, map keys removed. Missing intermediate containers are
/// created as lists when the following segment is an explicit index and as
/// maps otherwise. With `merge_object_leaves`, a map update is shallowly
/// merged into an existing map at the target (new keys win) instead of
/// replacing it.
///
/// `source` itself is never modified.
pub fn deep_set(source: &Value, path: &str, update: &Value, merge_object_leaves: bool) -> Value {
    let mut updated = source.clone();
    write_at(&mut updated, &Path::parse(path), update, merge_object_leaves);
    prune_in_place(&mut updated);
    updated
}

/// Applies every entry of `changes` to a copy of `source`.
///
/// The map carries no order of its own, so entries are applied in a fixed
/// order: writes in ascending path order, then deletions in descending
/// path order. Deleting the highest list positions first means a diff that
/// shortens a list removes exactly the trailing members it names.
pub fn apply_changes(source: &Value, changes: &Changes, merge_object_leaves: bool) -> Value {
    let mut writes = Vec::new();
    let mut deletions = Vec::new();
    for (key, value) in changes {
        let path = Path::parse(key);
        if value.is_null() {
            deletions.push(path);
        } else {
            writes.push((path, value));
        }
    }
    writes.sort_by(|a, b| a.0.cmp(&b.0));
    deletions.sort_by(|a, b| b.cmp(a));

    tracing::trace!(
        writes = writes.len(),
        deletions = deletions.len(),
        "applying changes"
    );

    let mut updated = source.clone();
    for (path, value) in writes {
        write_at(&mut updated, &path, value, merge_object_leaves);
        prune_in_place(&mut updated);
    }
    for path in deletions {
        write_at(&mut updated, &path, &Value::Null, merge_object_leaves);
        prune_in_place(&mut updated);
    }
    updated
}

/// Performs a single write in place, without pruning.
fn write_at(root: &mut Value, path: &Path, update: &Value, merge_object_leaves: bool) {
    tracing::trace!(path = %path, delete = update.is_null(), "write");

    let Some((last, parents)) = path.as_slice().split_last() else {
        *root = if update.is_null() {
            Value::Map(Map::new())
        } else {
            merged_leaf(root, update, merge_object_leaves)
        };
        return;
    };

    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        make_container_for(current, segment);
        current = match child_slot(current, segment) {
            Some(child) => child,
            None => return,
        };
        let next = parents.get(i + 1).unwrap_or(last);
        make_container_for(current, next);
    }
    make_container_for(current, last);

    if update.is_null() {
        remove_member(current, last);
    } else if let Some(slot) = child_slot(current, last) {
        *slot = merged_leaf(slot, update, merge_object_leaves);
    }
}

/// Makes sure `node` is a container that `segment` can address.
///
/// Maps accept every segment (indices become decimal keys). Lists accept
/// indices and bare decimal keys. Anything else is replaced by an empty
/// container of the kind the segment asks for.
fn make_container_for(node: &mut Value, segment: &Segment) {
    let fits = match node {
        Value::Map(_) => true,
        Value::List(_) => segment.list_position().is_some(),
        _ => false,
    };
    if !fits {
        *node = if segment.is_index() {
            Value::List(Vec::new())
        } else {
            Value::Map(Map::new())
        };
    }
}

/// Returns the slot `segment` addresses inside `node`, creating it as null.
///
/// A position past the end of a list addresses a new slot appended at the
/// end, which is where pruning would compact it to anyway.
fn child_slot<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match node {
        Value::Map(m) => Some(m.fields.entry(segment.map_key()).or_insert(Value::Null)),
        Value::List(l) => {
            let pos = segment.list_position()?;
            if pos >= l.len() {
                l.push(Value::Null);
                return l.last_mut();
            }
            l.get_mut(pos)
        }
        _ => None,
    }
}

fn remove_member(node: &mut Value, segment: &Segment) {
    match node {
        Value::Map(m) => {
            m.delete(&segment.map_key());
        }
        Value::List(l) => {
            if let Some(pos) = segment.list_position().filter(|pos| *pos < l.len()) {
                l.remove(pos);
            }
        }
        _ => {}
    }
}

fn merged_leaf(existing: &Value, update: &Value, merge_object_leaves: bool) -> Value {
    match (existing, update) {
        (Value::Map(old), Value::Map(new)) if merge_object_leaves => {
            let mut merged = old.clone();
            for (key, value) in new.iter() {
                merged.set(key.clone(), value.clone());
            }
            Value::Map(merged)
        }
        _ => update.clone(),
    }
}
