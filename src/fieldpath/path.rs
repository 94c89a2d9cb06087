//! Path segment and path types.

use crate::value::{parse_index, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Segment represents one level of path navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal object key. Numeric-looking keys stay keys.
    Key(String),
    /// Explicit array index, written `[n]` in path strings.
    Index(usize),
}

impl Segment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Segment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(i: usize) -> Self {
        Segment::Index(i)
    }

    /// Parses a single segment. `[n]` becomes an index, anything else a key.
    pub fn parse(raw: &str) -> Self {
        raw.strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(parse_index)
            .map(Segment::Index)
            .unwrap_or_else(|| Segment::Key(raw.to_string()))
    }

    /// Returns true if this is an explicit index segment.
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Returns the position this segment addresses inside a list, if any.
    ///
    /// Bare decimal keys address list positions too.
    pub fn list_position(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => parse_index(k),
        }
    }

    /// Returns the key this segment addresses inside a map.
    pub fn map_key(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Index(a), Segment::Index(b)) => a.cmp(b),
            (Segment::Key(a), Segment::Key(b)) => a.cmp(b),
            // Keys come before indices
            (Segment::Key(_), Segment::Index(_)) => Ordering::Less,
            (Segment::Index(_), Segment::Key(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Path is an ordered list of segments addressing a location in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Creates a path from a vector of segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path { segments }
    }

    /// Parses a dot-joined path string such as `items.[0].name`.
    ///
    /// The empty string is the empty path.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Path::new();
        }
        s.split('.').map(Segment::parse).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Creates a new path with the given segment appended.
    pub fn with(&self, segment: Segment) -> Self {
        let mut new_path = self.clone();
        new_path.push(segment);
        new_path
    }

    /// Creates a new path with `segment` in front of this one.
    pub fn prefixed(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment);
        segments.extend(self.segments.iter().cloned());
        Path { segments }
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Reads the value at `path`, or `None` if any step is missing.
///
/// Bracketed and bare indices are interchangeable here: `big.[1].x` and
/// `big.1.x` read the same location.
pub fn get_in<'a>(tree: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path {
        current = match (current, segment) {
            (Value::Map(m), seg) => m.get(&seg.map_key())?,
            (Value::List(l), seg) => l.get(seg.list_position()?)?,
            _ => return None,
        };
    }
    Some(current)
}
