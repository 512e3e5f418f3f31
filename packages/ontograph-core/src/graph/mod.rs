//! Immutable ontology graphs and their query API
//!
//! - `CsrMonoOntologyGraph`: one hierarchy relation, separate parent and child arrays
//! - `CsrPolyOntologyGraph<D>`: several relations in one array, bitmask payload `D`
//! - `CsrOntologyGraph`: either of the above, as produced by `OntologyGraphBuilder`
//!
//! # Unknown vertices
//!
//! Every query fails with `NodeNotPresentInGraph` when its first argument is not
//! a vertex. A second argument that is not a vertex makes a pairwise test
//! return `false`.
//!
//! # Concurrency
//!
//! Graphs are never mutated after construction; all queries take `&self` and
//! allocate only their own scratch space, so a graph can be shared across
//! threads (e.g. behind an `Arc`) without locking.

pub mod builder;
pub mod csr_graph;
pub mod mono;
pub mod poly;
pub(crate) mod traversal;

pub use builder::OntologyGraphBuilder;
pub use csr_graph::{CsrOntologyGraph, NeighborIter, PolyOntologyGraph};
pub use mono::CsrMonoOntologyGraph;
pub use poly::{CsrPolyOntologyGraph, PolyNeighbors};

use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::index::VertexIndex;
use crate::model::TermId;

/// Read-only hierarchy queries.
///
/// Implementors provide index-level adjacency; the term-level API is derived
/// from it.
pub trait OntologyGraph {
    type Neighbors<'a>: Iterator<Item = usize>
    where
        Self: 'a;

    fn root(&self) -> &TermId;

    fn vertex_index(&self) -> &VertexIndex;

    /// Dense indices of the direct parents of vertex `idx`
    fn parent_indices(&self, idx: usize) -> Self::Neighbors<'_>;

    /// Dense indices of the direct children of vertex `idx`
    fn child_indices(&self, idx: usize) -> Self::Neighbors<'_>;

    /// Whether there is a hierarchy edge `child → parent`
    fn has_parent_edge(&self, child: usize, parent: usize) -> bool;

    /// Number of vertices
    fn size(&self) -> usize {
        self.vertex_index().len()
    }

    fn contains(&self, term: &TermId) -> bool {
        self.vertex_index().contains(term)
    }

    /// Vertices in array order
    fn term_ids(&self) -> &[TermId] {
        self.vertex_index().terms()
    }

    fn get_parents(&self, source: &TermId, include_self: bool) -> Result<FxHashSet<TermId>> {
        let idx = self.vertex_index().require(source)?;
        Ok(self.collect_terms(idx, self.parent_indices(idx), include_self))
    }

    fn get_children(&self, source: &TermId, include_self: bool) -> Result<FxHashSet<TermId>> {
        let idx = self.vertex_index().require(source)?;
        Ok(self.collect_terms(idx, self.child_indices(idx), include_self))
    }

    fn get_ancestors(&self, source: &TermId, include_self: bool) -> Result<FxHashSet<TermId>> {
        let idx = self.vertex_index().require(source)?;
        let found = traversal::closure(idx, |i| self.parent_indices(i));
        Ok(self.collect_terms(idx, found.into_iter(), include_self))
    }

    fn get_descendants(&self, source: &TermId, include_self: bool) -> Result<FxHashSet<TermId>> {
        let idx = self.vertex_index().require(source)?;
        let found = traversal::closure(idx, |i| self.child_indices(i));
        Ok(self.collect_terms(idx, found.into_iter(), include_self))
    }

    /// `subject` has a direct hierarchy edge to `object`.
    fn is_child_of(&self, subject: &TermId, object: &TermId) -> Result<bool> {
        let s = self.vertex_index().require(subject)?;
        Ok(match self.vertex_index().position(object) {
            Some(o) => self.has_parent_edge(s, o),
            None => false,
        })
    }

    /// `object` has a direct hierarchy edge to `subject`.
    fn is_parent_of(&self, subject: &TermId, object: &TermId) -> Result<bool> {
        let s = self.vertex_index().require(subject)?;
        Ok(match self.vertex_index().position(object) {
            Some(o) => self.has_parent_edge(o, s),
            None => false,
        })
    }

    /// A non-empty hierarchy path leads from `subject` up to `object`.
    fn is_descendant_of(&self, subject: &TermId, object: &TermId) -> Result<bool> {
        let s = self.vertex_index().require(subject)?;
        Ok(match self.vertex_index().position(object) {
            Some(o) => traversal::reaches(s, o, |i| self.parent_indices(i)),
            None => false,
        })
    }

    /// A non-empty hierarchy path leads from `object` up to `subject`.
    fn is_ancestor_of(&self, subject: &TermId, object: &TermId) -> Result<bool> {
        let s = self.vertex_index().require(subject)?;
        Ok(match self.vertex_index().position(object) {
            Some(o) => traversal::reaches(s, o, |i| self.child_indices(i)),
            None => false,
        })
    }

    fn exists_path(&self, subject: &TermId, object: &TermId) -> Result<bool> {
        self.is_descendant_of(subject, object)
    }

    fn is_leaf(&self, source: &TermId) -> Result<bool> {
        let idx = self.vertex_index().require(source)?;
        Ok(self.child_indices(idx).next().is_none())
    }

    /// All hierarchy edges as `(child, parent)` pairs, grouped by child in array order.
    fn hierarchy_edges(&self) -> Vec<(TermId, TermId)> {
        let index = self.vertex_index();
        (0..self.size())
            .flat_map(|child| {
                self.parent_indices(child)
                    .map(move |parent| (index.term(child).clone(), index.term(parent).clone()))
            })
            .collect()
    }

    #[doc(hidden)]
    fn collect_terms<I>(&self, source: usize, indices: I, include_self: bool) -> FxHashSet<TermId>
    where
        I: Iterator<Item = usize>,
    {
        let index = self.vertex_index();
        let mut terms: FxHashSet<TermId> = indices.map(|i| index.term(i).clone()).collect();
        if include_self {
            terms.insert(index.term(source).clone());
        }
        terms
    }
}
