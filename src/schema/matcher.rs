//! Path pattern compiler.
//!
//! A pattern is a dot-joined path where `{}` stands for any single key and
//! `[]` for any single list index. Patterns without wildcards are looked up
//! directly. Wildcard patterns are bucketed by segment count and then by
//! their literal prefix (the segments before the first wildcard), so a
//! lookup only tests patterns that can possibly match.

use super::elements::{Definition, TypeDecl};
use crate::fieldpath::{Path, Segment};
use crate::value::parse_index;
use std::collections::HashMap;
use std::fmt;

const ANY_KEY: &str = "{}";
const ANY_INDEX: &str = "[]";

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    AnyKey,
    AnyIndex,
}

impl PatternSegment {
    fn parse(raw: &str) -> Self {
        match raw {
            ANY_KEY => PatternSegment::AnyKey,
            ANY_INDEX => PatternSegment::AnyIndex,
            _ => PatternSegment::Literal(raw.to_string()),
        }
    }

    fn is_wildcard(&self) -> bool {
        !matches!(self, PatternSegment::Literal(_))
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            PatternSegment::Literal(l) => l == segment,
            PatternSegment::AnyKey => !segment.is_empty(),
            PatternSegment::AnyIndex => is_index_segment(segment),
        }
    }

    /// Returns true if some concrete segment matches both.
    fn overlaps(&self, other: &PatternSegment) -> bool {
        match (self, other) {
            (PatternSegment::Literal(a), PatternSegment::Literal(b)) => a == b,
            (PatternSegment::Literal(l), wildcard) | (wildcard, PatternSegment::Literal(l)) => {
                wildcard.matches(l)
            }
            _ => true,
        }
    }
}

/// `[]` accepts bare decimal keys and bracketed indices.
fn is_index_segment(segment: &str) -> bool {
    parse_index(segment).is_some() || Segment::parse(segment).is_index()
}

/// CompiledPattern is a wildcard pattern ready for matching.
#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    segments: Vec<PatternSegment>,
    decl: TypeDecl,
    /// Position in the definition.
    order: usize,
}

impl CompiledPattern {
    fn new(source: &str, decl: &TypeDecl, order: usize) -> Self {
        CompiledPattern {
            source: source.to_string(),
            segments: source.split('.').map(PatternSegment::parse).collect(),
            decl: decl.clone(),
            order,
        }
    }

    fn has_wildcard(&self) -> bool {
        self.segments.iter().any(PatternSegment::is_wildcard)
    }

    fn literal_prefix(&self) -> Vec<String> {
        self.segments
            .iter()
            .map_while(|s| match s {
                PatternSegment::Literal(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    fn matches(&self, segments: &[&str]) -> bool {
        self.segments.len() == segments.len()
            && self
                .segments
                .iter()
                .zip(segments)
                .all(|(pattern, segment)| pattern.matches(segment))
    }

    fn overlaps(&self, other: &CompiledPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.overlaps(b))
    }
}

/// Wildcard patterns sharing a segment count and literal prefix.
#[derive(Debug, Clone)]
struct PrefixBucket {
    prefix: Vec<String>,
    patterns: Vec<CompiledPattern>,
}

/// Ambiguity is a pair of patterns that can match the same concrete path
/// while declaring different types. The first one always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub winner: String,
    pub shadowed: String,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' shadows '{}'", self.winner, self.shadowed)
    }
}

/// Matcher resolves concrete path strings to their declared types.
///
/// A matcher is immutable once compiled and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    definition: Definition,
    exact: HashMap<String, TypeDecl>,
    by_length: HashMap<usize, Vec<PrefixBucket>>,
}

impl Matcher {
    /// Compiles every pattern of `definition`.
    pub fn compile(definition: &Definition) -> Matcher {
        let mut exact = HashMap::new();
        let mut by_length: HashMap<usize, Vec<PrefixBucket>> = HashMap::new();
        let mut wildcard_count = 0usize;

        for (order, (source, decl)) in definition.iter().enumerate() {
            let pattern = CompiledPattern::new(source, decl, order);
            if !pattern.has_wildcard() {
                exact.insert(source.to_string(), decl.clone());
                continue;
            }
            wildcard_count += 1;
            let prefix = pattern.literal_prefix();
            let buckets = by_length.entry(pattern.segments.len()).or_default();
            match buckets.iter_mut().find(|b| b.prefix == prefix) {
                Some(bucket) => bucket.patterns.push(pattern),
                None => buckets.push(PrefixBucket {
                    prefix,
                    patterns: vec![pattern],
                }),
            }
        }

        tracing::debug!(
            exact = exact.len(),
            wildcard = wildcard_count,
            lengths = by_length.len(),
            "compiled path matcher"
        );

        Matcher {
            definition: definition.clone(),
            exact,
            by_length,
        }
    }

    /// Returns the type declared for `path`, or `None` for an unknown path.
    ///
    /// Exact patterns win over wildcard ones. Among wildcard patterns of
    /// the right length the first declared match wins.
    pub fn resolve(&self, path: &str) -> Option<&TypeDecl> {
        if let Some(decl) = self.exact.get(path) {
            return Some(decl);
        }
        let segments: Vec<&str> = path.split('.').collect();
        self.by_length
            .get(&segments.len())?
            .iter()
            .filter(|bucket| {
                bucket.prefix.len() <= segments.len()
                    && bucket.prefix.iter().zip(&segments).all(|(p, s)| p == s)
            })
            .flat_map(|bucket| bucket.patterns.iter())
            .filter(|pattern| pattern.matches(&segments))
            .min_by_key(|pattern| pattern.order)
            .map(|pattern| &pattern.decl)
    }

    /// Same as [`Matcher::resolve`] for an already parsed path.
    pub fn resolve_path(&self, path: &Path) -> Option<&TypeDecl> {
        self.resolve(&path.to_string())
    }

    /// Lists every pattern in declaration order.
    pub fn patterns(&self) -> Vec<&str> {
        self.definition.iter().map(|(pattern, _)| pattern).collect()
    }

    /// Returns the definition this matcher was compiled from.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Lists the pattern pairs whose overlap is settled only by declaration
    /// order.
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let patterns: Vec<CompiledPattern> = self
            .definition
            .iter()
            .enumerate()
            .map(|(order, (source, decl))| CompiledPattern::new(source, decl, order))
            .collect();
        let mut found = Vec::new();
        for (i, first) in patterns.iter().enumerate() {
            for second in &patterns[i + 1..] {
                if first.decl == second.decl || !first.overlaps(second) {
                    continue;
                }
                // Exact patterns always win over wildcard ones.
                let (winner, shadowed) = if second.has_wildcard() || !first.has_wildcard() {
                    (first, second)
                } else {
                    (second, first)
                };
                found.push(Ambiguity {
                    winner: winner.source.clone(),
                    shadowed: shadowed.source.clone(),
                });
            }
        }
        found
    }
}
