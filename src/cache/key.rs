//! Cache Key Module
//!
//! Opaque, equatable identifiers used to address cached query results.

use std::fmt;

// == Cache Key ==
/// Identifies one cached value.
///
/// Keys compare by structural content only. A key is usually built from the
/// logical parameters of a query, so that the same parameters always land on
/// the same slot (e.g. `CacheKey::from_parts(["festivals", "upcoming"])`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    // == Constructor ==
    /// Creates a key from any string-like value.
    pub fn new(repr: impl Into<String>) -> Self {
        Self(repr.into())
    }

    // == From Parts ==
    /// Builds a key from the components of a parameterized query.
    ///
    /// Components are joined with `:`. Callers are responsible for keeping
    /// the rendering injective (distinct parameter sets must produce
    /// distinct keys).
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        let repr = parts
            .into_iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(":");
        Self(repr)
    }

    // == Accessor ==
    /// Returns the key's string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
