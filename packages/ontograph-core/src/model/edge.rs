use serde::{Deserialize, Serialize};
use std::fmt;

use super::{RelationshipType, TermId};

/// A `(subject, object, relationship)` triple.
///
/// "Subject is-a object" reads as subject → object, i.e. child → parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OntologyGraphEdge {
    pub subject: TermId,
    pub object: TermId,
    pub relationship: RelationshipType,
}

impl OntologyGraphEdge {
    pub fn new(subject: TermId, object: TermId, relationship: RelationshipType) -> Self {
        Self {
            subject,
            object,
            relationship,
        }
    }

    /// Shorthand for an `is_a` edge
    pub fn is_a(subject: TermId, object: TermId) -> Self {
        Self::new(subject, object, RelationshipType::is_a())
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }
}

impl fmt::Display for OntologyGraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OntologyGraphEdge{{subject={}, object={}, relationshipType={}}}",
            self.subject, self.object, self.relationship
        )
    }
}
