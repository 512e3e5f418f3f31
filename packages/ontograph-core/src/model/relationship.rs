//! Relationship types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A relationship type such as `is_a` or `part_of`.
///
/// Only propagating types take part in ancestor/descendant closures.
/// Equality and hashing use the `id` only; the label is descriptive.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct RelationshipType {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub propagates: bool,
}

impl RelationshipType {
    pub fn new(id: impl Into<String>, label: impl Into<String>, propagates: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            propagates,
        }
    }

    /// `is_a`, the primary hierarchy relation
    pub fn is_a() -> Self {
        Self::new("is_a", "is_a", true)
    }

    /// `part_of` (BFO:0000050)
    pub fn part_of() -> Self {
        Self::new("BFO:0000050", "part of", true)
    }

    /// `has_part` (BFO:0000051), non-propagating
    pub fn has_part() -> Self {
        Self::new("BFO:0000051", "has part", false)
    }
}

impl PartialEq for RelationshipType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for RelationshipType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Default for RelationshipType {
    fn default() -> Self {
        Self::is_a()
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationshipType{{id='{}', label='{}'}}", self.id, self.label)
    }
}
