//! Recursive validation of a tree against a compiled definition.

use super::validation::ValidationError;
use crate::schema::{LeafKind, Matcher, Registry, TypeDecl};
use crate::value::Value;

/// Validator walks a tree and checks every leaf against its declared type.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    matcher: &'a Matcher,
    registry: &'a Registry,
}

impl<'a> Validator<'a> {
    pub fn new(matcher: &'a Matcher, registry: &'a Registry) -> Self {
        Validator { matcher, registry }
    }

    /// Validates `tree`, stopping at the first violation.
    ///
    /// Members are visited depth-first in key order (index order for
    /// lists). Paths are built from the member keys, so list members appear
    /// as bare indices (`items.0.value`).
    pub fn validate(&self, tree: &Value) -> Result<(), ValidationError> {
        self.validate_members(tree, "")
    }

    fn validate_members(&self, value: &Value, path: &str) -> Result<(), ValidationError> {
        for (key, member) in value.members() {
            // Null marks absence and is never type checked.
            if member.is_null() {
                continue;
            }
            let member_path = if path.is_empty() {
                key
            } else {
                format!("{}.{}", path, key)
            };
            let decl = self.matcher.resolve(&member_path);

            let opaque = decl.is_some_and(|d| d.is(LeafKind::Obj.name()));
            if member.is_composite() && !opaque {
                if member.is_empty_or_null() && decl.is_none() {
                    return Err(ValidationError::invalid_path(member_path));
                }
                self.validate_members(member, &member_path)?;
            } else {
                let decl = decl.ok_or_else(|| ValidationError::invalid_path(member_path.as_str()))?;
                self.check_leaf(&member_path, member, decl)?;
            }
        }
        Ok(())
    }

    fn check_leaf(&self, path: &str, value: &Value, decl: &TypeDecl) -> Result<(), ValidationError> {
        match decl {
            TypeDecl::One(name) => match self.registry.check(name, value) {
                None => Err(ValidationError::unknown_type(path, name.as_str())),
                Some(false) => Err(ValidationError::invalid_value(path, value.clone())),
                Some(true) => Ok(()),
            },
            TypeDecl::AnyOf(names) => {
                let mut known = false;
                for name in names {
                    match self.registry.check(name, value) {
                        Some(true) => return Ok(()),
                        Some(false) => known = true,
                        None => {}
                    }
                }
                if known {
                    Err(ValidationError::invalid_value(path, value.clone()))
                } else {
                    Err(ValidationError::unknown_type(path, decl.to_string()))
                }
            }
        }
    }
}
