//! Schema definition elements.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// TypeDecl is the type declared for a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// A single type name.
    One(String),
    /// Alternatives; a value is valid if it satisfies at least one.
    AnyOf(Vec<String>),
}

impl TypeDecl {
    pub fn one(name: impl Into<String>) -> Self {
        TypeDecl::One(name.into())
    }

    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDecl::AnyOf(names.into_iter().map(Into::into).collect())
    }

    /// Returns true for exactly `One(name)`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, TypeDecl::One(n) if n == name)
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            TypeDecl::One(n) => vec![n.as_str()],
            TypeDecl::AnyOf(ns) => ns.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for TypeDecl {
    fn from(name: &str) -> Self {
        TypeDecl::One(name.to_string())
    }
}

impl From<String> for TypeDecl {
    fn from(name: String) -> Self {
        TypeDecl::One(name)
    }
}

impl<S: Into<String>> From<Vec<S>> for TypeDecl {
    fn from(names: Vec<S>) -> Self {
        TypeDecl::any_of(names)
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDecl::One(n) => write!(f, "{}", n),
            TypeDecl::AnyOf(ns) => write!(f, "[{}]", ns.join(", ")),
        }
    }
}

/// Definition is an ordered list of path patterns and their declared types.
///
/// Order matters: when several wildcard patterns match the same path, the
/// one declared first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    entries: Vec<(String, TypeDecl)>,
}

impl Definition {
    pub fn new() -> Self {
        Definition::default()
    }

    /// Adds a pattern. A pattern declared twice keeps its first position
    /// but takes the latest declaration.
    pub fn insert(&mut self, pattern: impl Into<String>, decl: impl Into<TypeDecl>) {
        let pattern = pattern.into();
        let decl = decl.into();
        match self.entries.iter_mut().find(|(p, _)| *p == pattern) {
            Some(entry) => entry.1 = decl,
            None => self.entries.push((pattern, decl)),
        }
    }

    pub fn with(mut self, pattern: impl Into<String>, decl: impl Into<TypeDecl>) -> Self {
        self.insert(pattern, decl);
        self
    }

    pub fn get(&self, pattern: &str) -> Option<&TypeDecl> {
        self.entries.iter().find(|(p, _)| p == pattern).map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDecl)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d))
    }

    /// Parses a definition from YAML (or JSON, which is valid YAML).
    pub fn from_yaml(yaml: &str) -> Result<Definition, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl<P, D> FromIterator<(P, D)> for Definition
where
    P: Into<String>,
    D: Into<TypeDecl>,
{
    fn from_iter<T: IntoIterator<Item = (P, D)>>(iter: T) -> Self {
        let mut definition = Definition::new();
        for (pattern, decl) in iter {
            definition.insert(pattern, decl);
        }
        definition
    }
}

impl Serialize for Definition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(p, d)| (p, d)))
    }
}

impl<'de> Deserialize<'de> for Definition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DefinitionVisitor;

        impl<'de> Visitor<'de> for DefinitionVisitor {
            type Value = Definition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from path pattern to type name or list of type names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Definition, A::Error> {
                let mut definition = Definition::new();
                while let Some((pattern, decl)) = access.next_entry::<String, TypeDecl>()? {
                    definition.insert(pattern, decl);
                }
                Ok(definition)
            }
        }

        deserializer.deserialize_map(DefinitionVisitor)
    }
}

/// SchemaFile is the on-disk form of a definition.
///
/// Either the whole document is the pattern map, or it has a `definition`
/// section plus optional `matches` literal-set types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaFile {
    Extended {
        definition: Definition,
        #[serde(default)]
        matches: BTreeMap<String, Vec<crate::value::Value>>,
    },
    Plain(Definition),
}

impl SchemaFile {
    pub fn from_yaml(yaml: &str) -> Result<SchemaFile, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
