//! Leaf type predicates and the registry that names them.

use crate::value::Value;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Upper bound (exclusive) for `timestamp` values: 2200-01-01 in epoch ms.
pub const MAX_TIMESTAMP_MS: i64 = 7_258_147_200_000;

/// Predicate decides whether a leaf value has a given type.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// LeafKind enumerates the built-in leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Str,
    Bool,
    Num,
    Int,
    PositiveInt,
    Timestamp,
    Arr,
    Obj,
    Func,
}

impl LeafKind {
    pub const ALL: [LeafKind; 9] = [
        LeafKind::Str,
        LeafKind::Bool,
        LeafKind::Num,
        LeafKind::Int,
        LeafKind::PositiveInt,
        LeafKind::Timestamp,
        LeafKind::Arr,
        LeafKind::Obj,
        LeafKind::Func,
    ];

    /// The name a definition uses to refer to this kind.
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::Str => "str",
            LeafKind::Bool => "bool",
            LeafKind::Num => "num",
            LeafKind::Int => "int",
            LeafKind::PositiveInt => "positiveInt",
            LeafKind::Timestamp => "timestamp",
            LeafKind::Arr => "arr",
            LeafKind::Obj => "obj",
            LeafKind::Func => "func",
        }
    }

    pub fn from_name(name: &str) -> Option<LeafKind> {
        LeafKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn check(self, value: &Value) -> bool {
        match self {
            LeafKind::Str => value.is_string(),
            LeafKind::Bool => value.is_bool(),
            LeafKind::Num => value.is_number(),
            LeafKind::Int => value.as_integer().is_some(),
            LeafKind::PositiveInt => value.as_integer().is_some_and(|i| i >= 0),
            // Epoch milliseconds, strictly after 1970 and before 2200.
            LeafKind::Timestamp => value
                .as_integer()
                .is_some_and(|i| i > 0 && i < MAX_TIMESTAMP_MS),
            LeafKind::Arr => value.is_list(),
            LeafKind::Obj => value.is_map(),
            LeafKind::Func => value.is_func(),
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds a predicate accepting exactly the given literal values.
pub fn matches(values: Vec<Value>) -> Predicate {
    Arc::new(move |value: &Value| values.contains(value))
}

/// Registry maps type names to predicates.
#[derive(Clone, Default)]
pub struct Registry {
    predicates: HashMap<String, Predicate>,
}

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::builtin);

impl Registry {
    /// Creates a registry with no types at all.
    pub fn empty() -> Self {
        Registry::default()
    }

    /// Creates a registry holding every [`LeafKind`] under its name.
    pub fn builtin() -> Self {
        let mut registry = Registry::empty();
        for kind in LeafKind::ALL {
            registry.register(kind.name(), Arc::new(move |v: &Value| kind.check(v)));
        }
        registry
    }

    /// Returns the shared built-in registry.
    pub fn default_ref() -> &'static Registry {
        &DEFAULT_REGISTRY
    }

    /// Registers `predicate` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, predicate: Predicate) -> &mut Self {
        self.predicates.insert(name.into(), predicate);
        self
    }

    /// Registers a literal-set type under `name`.
    pub fn register_matches(&mut self, name: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.register(name, matches(values))
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Runs the predicate registered under `name`. `None` if there is none.
    pub fn check(&self, name: &str, value: &Value) -> Option<bool> {
        self.get(name).map(|predicate| predicate(value))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("names", &self.names()).finish()
    }
}
