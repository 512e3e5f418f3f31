//! Term identifiers
//!
//! A `TermId` is a CURIE-like `PREFIX:ID` pair such as `HP:0000118`.
//! The value is stored once behind an `Arc<str>` so clones are cheap; the graph
//! hands out clones of its own vertex ids from every query.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::{GraphError, Result};

/// Immutable ontology term identifier.
///
/// Ordered by prefix, then by local id, both lexicographically.
///
/// # Examples
///
/// ```rust
/// use ontograph_core::model::TermId;
///
/// let id = TermId::of("HP:0000118").unwrap();
/// assert_eq!(id.prefix(), "HP");
/// assert_eq!(id.id(), "0000118");
/// ```
#[derive(Clone)]
pub struct TermId {
    value: Arc<str>,
    /// Byte offset of the `:` separator
    sep: usize,
}

impl TermId {
    /// Parse a `PREFIX:ID` value. Both parts must be non-empty.
    pub fn of(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        match value.find(':') {
            Some(sep) if sep > 0 && sep + 1 < value.len() => Ok(Self {
                value: Arc::from(value),
                sep,
            }),
            _ => Err(GraphError::InvalidTermId(value.to_string())),
        }
    }

    /// Build from separate prefix and local id.
    pub fn from_parts(prefix: &str, id: &str) -> Result<Self> {
        Self::of(format!("{prefix}:{id}"))
    }

    /// `owl:Thing`, the default artificial root
    pub fn owl_thing() -> Self {
        Self {
            value: Arc::from("owl:Thing"),
            sep: 3,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.value[..self.sep]
    }

    pub fn id(&self) -> &str {
        &self.value[self.sep + 1..]
    }

    /// Full `PREFIX:ID` value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl PartialEq for TermId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for TermId {}

impl Hash for TermId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Ord for TermId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.prefix()
            .cmp(other.prefix())
            .then_with(|| self.id().cmp(other.id()))
    }
}

impl PartialOrd for TermId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermId({})", self.value)
    }
}

impl FromStr for TermId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        TermId::of(s)
    }
}

impl Serialize for TermId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for TermId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        TermId::of(&value).map_err(serde::de::Error::custom)
    }
}
