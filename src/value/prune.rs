//! Removal of nulls and empty containers.

use super::Value;

/// Returns `tree` with every null member and every empty list or map removed.
///
/// Removal cascades upward: a container that only held removable members is
/// itself removed from its parent. List members are spliced out, so later
/// elements shift down. The root is never removed, only emptied.
pub fn prune(tree: &Value) -> Value {
    let mut pruned = tree.clone();
    prune_in_place(&mut pruned);
    pruned
}

/// In-place form of [`prune`]. Returns how many members were removed.
///
/// Children are pruned before their parent is inspected, so a single
/// post-order pass already reaches the fixed point.
pub fn prune_in_place(tree: &mut Value) -> usize {
    let mut removed = 0;
    match tree {
        Value::Map(m) => {
            for child in m.fields.values_mut() {
                removed += prune_in_place(child);
            }
            let before = m.len();
            m.fields.retain(|_, child| !child.is_empty_or_null());
            removed += before - m.len();
        }
        Value::List(l) => {
            for child in l.iter_mut() {
                removed += prune_in_place(child);
            }
            let before = l.len();
            l.retain(|child| !child.is_empty_or_null());
            removed += before - l.len();
        }
        _ => {}
    }
    if removed > 0 {
        tracing::trace!(removed, "pruned empty members");
    }
    removed
}
