//! Data model consumed from ontology loaders
//!
//! - `TermId`: the only externally visible vertex handle
//! - `RelationshipType`: id, label and the `propagates` flag
//! - `OntologyGraphEdge`: `(subject, object, relationship)` triple

mod edge;
mod relationship;
mod term_id;

pub use edge::OntologyGraphEdge;
pub use relationship::RelationshipType;
pub use term_id::TermId;
