//! Flat diffs between two trees.

use crate::fieldpath::{Path, Segment};
use crate::value::{parse_index, Changes, Value};
use std::collections::BTreeSet;

/// DiffOptions controls what [`get_changes`] reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Report keys missing from `after` as `Null`.
    pub include_deletions: bool,
    /// Keys skipped at the top level only.
    pub ignored_keys: BTreeSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            include_deletions: true,
            ignored_keys: BTreeSet::new(),
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        DiffOptions::default()
    }

    pub fn include_deletions(mut self, include: bool) -> Self {
        self.include_deletions = include;
        self
    }

    pub fn ignore_key(mut self, key: impl Into<String>) -> Self {
        self.ignored_keys.insert(key.into());
        self
    }

    pub fn ignore_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_keys.extend(keys.into_iter().map(Into::into));
        self
    }
}

/// Computes the changes that turn `before` into `after`.
///
/// Every changed leaf is reported under its full path; members of lists
/// are addressed with bracketed indices (`items.[0].name`). A key that
/// disappears is reported as `Null` when deletions are included. Nested
/// containers are always walked, never compared as a whole, so only the
/// leaves that differ show up.
///
/// Returns `None` when there is nothing to report.
pub fn get_changes(before: &Value, after: &Value, options: &DiffOptions) -> Option<Changes> {
    let mut changes = Changes::new();
    diff_members(
        before,
        after,
        options.include_deletions,
        Some(&options.ignored_keys),
        &Path::new(),
        &mut changes,
    );
    if changes.is_empty() {
        None
    } else {
        Some(changes)
    }
}

fn diff_members(
    before: &Value,
    after: &Value,
    include_deletions: bool,
    ignored_keys: Option<&BTreeSet<String>>,
    prefix: &Path,
    changes: &mut Changes,
) {
    let mut keys: Vec<String> = before.members().into_iter().map(|(k, _)| k).collect();
    for (key, _) in after.members() {
        if before.member(&key).is_none() {
            keys.push(key);
        }
    }

    for key in keys {
        if ignored_keys.is_some_and(|ignored| ignored.contains(&key)) {
            continue;
        }
        let segment = match (after, parse_index(&key)) {
            (Value::List(_), Some(i)) => Segment::Index(i),
            _ => Segment::Key(key.clone()),
        };
        let path = prefix.with(segment);

        match (before.member(&key), after.member(&key)) {
            (Some(_), None) => {
                if include_deletions {
                    changes.insert(path.to_string(), Value::Null);
                }
            }
            (old, Some(new)) if new.is_composite() => {
                diff_members(
                    old.unwrap_or(&Value::Null),
                    new,
                    include_deletions,
                    None,
                    &path,
                    changes,
                );
            }
            (old, Some(new)) => {
                if old != Some(new) {
                    changes.insert(path.to_string(), new.clone());
                }
            }
            (None, None) => {}
        }
    }
}
