//! The schema facade: validate, set, update and merge against a definition.

use super::validation::ValidationError;
use super::validator::Validator;
use crate::error::Result;
use crate::merge::{merge_objects, MergeResult};
use crate::schema::{Definition, Matcher, Registry, SchemaFile};
use crate::value::{apply_changes, deep_set, Changes, Value};

/// TreeSchema binds a compiled definition to a type registry.
///
/// Every write returns a new tree; the input is never modified. Writes
/// optionally validate their result and hand it back only if it passes.
#[derive(Debug, Clone)]
pub struct TreeSchema {
    matcher: Matcher,
    registry: Registry,
}

/// Compiles `definition` against the built-in leaf types.
pub fn build_definition(definition: &Definition) -> TreeSchema {
    build_definition_with(definition, Registry::default_ref().clone())
}

/// Compiles `definition` against a custom registry.
pub fn build_definition_with(definition: &Definition, registry: Registry) -> TreeSchema {
    TreeSchema {
        matcher: Matcher::compile(definition),
        registry,
    }
}

impl TreeSchema {
    /// Builds a schema from a YAML or JSON schema file.
    ///
    /// Literal-set types listed under `matches` are registered on top of
    /// the built-in ones.
    pub fn from_yaml(yaml: &str) -> Result<TreeSchema> {
        let schema = match SchemaFile::from_yaml(yaml)? {
            SchemaFile::Plain(definition) => build_definition(&definition),
            SchemaFile::Extended {
                definition,
                matches,
            } => {
                let mut registry = Registry::builtin();
                for (name, values) in matches {
                    registry.register_matches(name, values);
                }
                build_definition_with(&definition, registry)
            }
        };
        Ok(schema)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validates `tree`, returning the first violation.
    pub fn validate(&self, tree: &Value) -> std::result::Result<(), ValidationError> {
        Validator::new(&self.matcher, &self.registry).validate(tree)
    }

    /// Writes `value` at `path`; a `Null` value deletes. Map values are
    /// merged into an existing map at `path`.
    pub fn set_value(
        &self,
        tree: &Value,
        path: &str,
        value: &Value,
        validate: bool,
    ) -> std::result::Result<Value, ValidationError> {
        let updated = deep_set(tree, path, value, true);
        self.checked(updated, validate)
    }

    /// Applies every entry of `changes`, validating once at the end.
    ///
    /// `changes` is keyed by path, so the caller's insertion order is not
    /// kept. Writes run first in ascending path order, then deletions in
    /// descending order, so list deletions address the positions the list
    /// had before any of them ran. `{"stuff.[0]": null, "stuff.[1]": null}`
    /// removes the first two members, not the first and third.
    pub fn update(
        &self,
        tree: &Value,
        changes: &Changes,
        validate: bool,
    ) -> std::result::Result<Value, ValidationError> {
        tracing::debug!(entries = changes.len(), "updating tree");
        let updated = apply_changes(tree, changes, true);
        self.checked(updated, validate)
    }

    /// Merges two diverged trees. Only the merged tree is validated.
    pub fn merge(
        &self,
        tree1: &Value,
        tree2: &Value,
        validate: bool,
    ) -> std::result::Result<MergeResult, ValidationError> {
        let result = merge_objects(tree1, tree2);
        if validate {
            self.validate(&result.updated)?;
        }
        Ok(result)
    }

    fn checked(&self, updated: Value, validate: bool) -> std::result::Result<Value, ValidationError> {
        if validate {
            self.validate(&updated)?;
        }
        Ok(updated)
    }
}
