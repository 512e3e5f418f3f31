//! Structural validation of vertices and edges
//!
//! Runs before any CSR array is allocated. The checks run in a fixed order and
//! the first failure is returned:
//!
//! 1. both collections are non-empty and every edge endpoint is a declared vertex
//! 2. no self-loops and no edge seen twice for the same relationship type
//! 3. the vertices form a single weakly connected component
//!
//! [`CompatibilityChecker::check_hierarchy`] repeats step 3 over the hierarchy
//! edges alone, so that every vertex can reach the root.

use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::errors::{GraphError, Result};
use crate::index::VertexIndex;
use crate::model::{OntologyGraphEdge, RelationshipType, TermId};

/// Checks that vertices and edges describe a simple, connected graph.
pub struct CompatibilityChecker;

impl CompatibilityChecker {
    /// Validate `vertices` and `edges`. Pure: no side effects besides the result.
    pub fn check(vertices: &[TermId], edges: &[OntologyGraphEdge]) -> Result<()> {
        debug!(
            "Checking vertices ({}) and edges ({}) for compatibility",
            vertices.len(),
            edges.len()
        );
        if vertices.is_empty() || edges.is_empty() {
            return Err(GraphError::incompatible(format!(
                "Collection of vertices ({}) or edges ({}) must not be empty!",
                vertices.len(),
                edges.len()
            )));
        }

        Self::check_vertex_edge_compatibility(vertices, edges)?;
        debug!("Vertices and edges are compatible");

        Self::check_graph_is_simple(edges)?;
        debug!("Graph is simple");

        Self::check_graph_is_connected(vertices, edges.iter())?;
        debug!("Graph is connected");
        Ok(())
    }

    /// Check that the edges of the `hierarchy` relation alone connect every
    /// vertex. Vertices attached only through other relationships are reported
    /// as disconnected.
    pub fn check_hierarchy(
        vertices: &[TermId],
        edges: &[OntologyGraphEdge],
        hierarchy: &RelationshipType,
    ) -> Result<()> {
        let mut hierarchy_edges = edges.iter().filter(|e| &e.relationship == hierarchy).peekable();
        if hierarchy_edges.peek().is_none() {
            debug!("No {} edges among {} edges", hierarchy.id, edges.len());
            return Err(GraphError::NoRootCandidate);
        }

        Self::check_graph_is_connected(vertices, hierarchy_edges)?;
        debug!("Hierarchy {} is connected", hierarchy.id);
        Ok(())
    }

    fn check_vertex_edge_compatibility(
        vertices: &[TermId],
        edges: &[OntologyGraphEdge],
    ) -> Result<()> {
        let vertex_set: FxHashSet<&TermId> = vertices.iter().collect();
        for edge in edges {
            if !vertex_set.contains(&edge.subject) {
                return Err(GraphError::incompatible(format!(
                    "Unknown subject {} in edge {}",
                    edge.subject, edge
                )));
            }
            if !vertex_set.contains(&edge.object) {
                return Err(GraphError::incompatible(format!(
                    "Unknown object {} in edge {}",
                    edge.object, edge
                )));
            }
        }
        Ok(())
    }

    fn check_graph_is_simple(edges: &[OntologyGraphEdge]) -> Result<()> {
        let mut seen: FxHashSet<(&TermId, &TermId, &str)> =
            FxHashSet::with_capacity_and_hasher(edges.len(), Default::default());
        for edge in edges {
            if edge.is_self_loop() {
                return Err(GraphError::not_simple(format!(
                    "Self-loop edge for {}",
                    edge.subject
                )));
            }
            if !seen.insert((&edge.subject, &edge.object, edge.relationship.id.as_str())) {
                return Err(GraphError::not_simple(format!("Seen edge twice: {}", edge)));
            }
        }
        Ok(())
    }

    /// The component holding the subject of the first edge is the main one;
    /// every vertex outside of it is reported.
    fn check_graph_is_connected<'a>(
        vertices: &[TermId],
        edges: impl Iterator<Item = &'a OntologyGraphEdge>,
    ) -> Result<()> {
        let index = VertexIndex::new(vertices.iter().cloned());
        let mut components = UnionFind::<usize>::new(index.len());
        let mut first = None;

        for edge in edges {
            // Endpoints were checked above
            if let (Some(s), Some(o)) = (index.position(&edge.subject), index.position(&edge.object)) {
                components.union(s, o);
                first.get_or_insert(s);
            }
        }

        let main = match first {
            Some(idx) => components.find(idx),
            None => return Err(GraphError::incompatible("No edge joins two known vertices")),
        };

        let disconnected: Vec<TermId> = index
            .iter()
            .enumerate()
            .filter(|(idx, _)| components.find(*idx) != main)
            .map(|(_, term)| term.clone())
            .collect();

        if disconnected.is_empty() {
            Ok(())
        } else {
            Err(GraphError::not_connected(disconnected))
        }
    }
}
