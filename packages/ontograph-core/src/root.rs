//! Root resolution
//!
//! The root is the single vertex with no outgoing hierarchy edge. Ontologies such
//! as GO have several top-level terms; these get linked to an artificial root.

use rustc_hash::FxHashSet;
use std::ops::Range;
use tracing::{debug, info};

use crate::errors::{GraphError, Result};
use crate::model::{OntologyGraphEdge, RelationshipType, TermId};

/// Outcome of [`find_root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResolution {
    pub root: TermId,
    /// Top-level terms found before any synthesis, in first-seen order
    pub candidates: Vec<TermId>,
    /// Positions of the synthesized edges in the edge list; empty if the
    /// root was found in the input.
    pub added_edges: Range<usize>,
}

impl RootResolution {
    pub fn is_artificial(&self) -> bool {
        !self.added_edges.is_empty()
    }
}

/// Find the root of the `hierarchy` relation, synthesizing `artificial_root`
/// when more than one candidate exists.
///
/// Edge ids are positions in `edges`. Synthesized edges are appended, so their
/// ids continue from the current maximum; the artificial root is appended to
/// `vertices`.
pub fn find_root(
    vertices: &mut Vec<TermId>,
    edges: &mut Vec<OntologyGraphEdge>,
    hierarchy: &RelationshipType,
    artificial_root: &TermId,
) -> Result<RootResolution> {
    let mut subjects: FxHashSet<&TermId> = FxHashSet::default();
    let mut objects: Vec<&TermId> = Vec::new();
    let mut seen_objects: FxHashSet<&TermId> = FxHashSet::default();

    for edge in edges.iter().filter(|e| &e.relationship == hierarchy) {
        subjects.insert(&edge.subject);
        if seen_objects.insert(&edge.object) {
            objects.push(&edge.object);
        }
    }

    let candidates: Vec<TermId> = objects
        .into_iter()
        .filter(|o| !subjects.contains(*o))
        .cloned()
        .collect();

    match candidates.len() {
        0 => Err(GraphError::NoRootCandidate),
        1 => {
            let root = candidates[0].clone();
            debug!("Found root candidate {}", root);
            let start = edges.len();
            Ok(RootResolution {
                root,
                candidates,
                added_edges: start..start,
            })
        }
        n => {
            if vertices.contains(artificial_root) {
                return Err(GraphError::ArtificialRootTaken(artificial_root.clone()));
            }
            info!(
                "Found {} root candidates, inserting artificial root {}",
                n, artificial_root
            );

            vertices.push(artificial_root.clone());
            let start = edges.len();
            for candidate in &candidates {
                edges.push(OntologyGraphEdge::new(
                    candidate.clone(),
                    artificial_root.clone(),
                    hierarchy.clone(),
                ));
            }
            Ok(RootResolution {
                root: artificial_root.clone(),
                candidates,
                added_edges: start..edges.len(),
            })
        }
    }
}
