//! ontograph-core: compressed-sparse-row ontology graphs
//!
//! Immutable, multi-relation hierarchy graphs for biomedical ontologies
//! (is_a, part_of, ...), with parent/child/ancestor/descendant queries.
//!
//! ## Core Principles
//!
//! 1. **Validate first**: input is checked for unknown endpoints, self-loops,
//!    duplicate edges and disconnected vertices before any array is allocated
//! 2. **Single root**: several top-level terms are linked to an artificial root
//! 3. **Build once, query many**: graphs are never mutated after construction
//!    and can be shared across threads
//!
//! ## Usage
//!
//! ```rust
//! use ontograph_core::{OntologyGraph, OntologyGraphBuilder, OntologyGraphEdge, TermId};
//!
//! let t = |s: &str| TermId::of(s).unwrap();
//! let vertices = vec![t("HP:01"), t("HP:02"), t("HP:1")];
//! let edges = vec![
//!     OntologyGraphEdge::is_a(t("HP:01"), t("HP:1")),
//!     OntologyGraphEdge::is_a(t("HP:02"), t("HP:1")),
//! ];
//!
//! let graph = OntologyGraphBuilder::new().build(vertices, edges)?;
//! assert_eq!(graph.size(), 3);
//! assert!(graph.is_child_of(&t("HP:01"), &t("HP:1"))?);
//! assert_eq!(graph.get_children(&t("HP:1"), false)?.len(), 2);
//! # Ok::<(), ontograph_core::GraphError>(())
//! ```
//!
//! Unknown first arguments fail with [`GraphError::NodeNotPresentInGraph`];
//! unknown second arguments of a pairwise test yield `false`.

pub mod config;
pub mod csr;
pub mod errors;
pub mod graph;
pub mod index;
pub mod model;
pub mod root;
pub mod validation;

pub use config::{ConfigError, ConfigResult, GraphBuildConfig, GraphKind};
pub use csr::{DataIndexer, PayloadWidth, RelationCodec, StaticCsrArray};
pub use errors::{ErrorKind, GraphError, Result};
pub use graph::{
    CsrMonoOntologyGraph, CsrOntologyGraph, CsrPolyOntologyGraph, OntologyGraph,
    OntologyGraphBuilder, PolyOntologyGraph,
};
pub use index::VertexIndex;
pub use model::{OntologyGraphEdge, RelationshipType, TermId};
pub use root::{find_root, RootResolution};
pub use validation::CompatibilityChecker;
