//! # Data Paths — Typed Locations in an Audit Document
//!
//! A `DataPath` addresses one field inside a Building Document as a
//! sequence of object keys and array indices. Paths render as JSON
//! Pointer style strings (`/zone/zone_wall/0/side`) but are built and
//! compared structurally, never by string concatenation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step in a [`DataPath`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathSegment {
    /// Descend into an object field by name.
    Key(String),
    /// Descend into an array element by position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A path from the document root to one field.
///
/// The empty path addresses the root itself and renders as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataPath(Vec<PathSegment>);

impl DataPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from an iterator of segments.
    pub fn new(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` is a leading subsequence of this path.
    ///
    /// Used by the address-only entry point to filter the surface down
    /// to address-relevant fields.
    pub fn starts_with(&self, prefix: &DataPath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Convenience constructor from a `/`-separated pointer string.
///
/// Purely for tests and the legacy boundary; core code builds paths
/// segment by segment. Numeric components become indices.
impl From<&str> for DataPath {
    fn from(pointer: &str) -> Self {
        let segments = pointer
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();
        Self(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_slash() {
        assert_eq!(DataPath::root().to_string(), "/");
    }

    #[test]
    fn test_child_renders_pointer_style() {
        let path = DataPath::root()
            .child("zone")
            .child("zone_wall")
            .child(0)
            .child("side");
        assert_eq!(path.to_string(), "/zone/zone_wall/0/side");
    }

    #[test]
    fn test_parse_round_trip() {
        let path = DataPath::from("/systems/hvac/1/hvac_fraction");
        assert_eq!(path.to_string(), "/systems/hvac/1/hvac_fraction");
        assert_eq!(path.segments()[2], PathSegment::Index(1));
    }

    #[test]
    fn test_starts_with() {
        let full = DataPath::from("/address/address2");
        assert!(full.starts_with(&DataPath::from("/address")));
        assert!(full.starts_with(&DataPath::root()));
        assert!(!full.starts_with(&DataPath::from("/about")));
    }

    #[test]
    fn test_pop_returns_last_segment() {
        let mut path = DataPath::from("/about/year_built");
        assert_eq!(path.pop(), Some(PathSegment::Key("year_built".into())));
        assert_eq!(path.to_string(), "/about");
    }
}
