//! Vertex index: `TermId ↔ dense 0..N` bijection
//!
//! Input iteration order becomes array order. Callers that need reproducible
//! layouts pre-sort the vertices.

use rustc_hash::FxHashMap;

use crate::errors::{GraphError, Result};
use crate::model::TermId;

/// Immutable mapping between term ids and row offsets of the CSR arrays.
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    terms: Vec<TermId>,
    positions: FxHashMap<TermId, u32>,
}

impl VertexIndex {
    /// Build the index. Duplicate vertices collapse onto their first occurrence.
    pub fn new<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = TermId>,
    {
        let iter = vertices.into_iter();
        let (lower, _) = iter.size_hint();
        let mut terms = Vec::with_capacity(lower);
        let mut positions = FxHashMap::with_capacity_and_hasher(lower, Default::default());

        for term in iter {
            if positions.contains_key(&term) {
                continue;
            }
            positions.insert(term.clone(), terms.len() as u32);
            terms.push(term);
        }

        Self { terms, positions }
    }

    /// Dense index of `term`, or `None` when absent.
    #[inline]
    pub fn position(&self, term: &TermId) -> Option<usize> {
        self.positions.get(term).map(|&idx| idx as usize)
    }

    /// Dense index of `term`, failing with `NodeNotPresentInGraph` when absent.
    #[inline]
    pub fn require(&self, term: &TermId) -> Result<usize> {
        self.position(term)
            .ok_or_else(|| GraphError::node_not_present(term))
    }

    #[inline]
    pub fn term(&self, idx: usize) -> &TermId {
        &self.terms[idx]
    }

    pub fn get(&self, idx: usize) -> Option<&TermId> {
        self.terms.get(idx)
    }

    pub fn contains(&self, term: &TermId) -> bool {
        self.positions.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term ids in array order
    pub fn terms(&self) -> &[TermId] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermId> {
        self.terms.iter()
    }
}

impl<'a> IntoIterator for &'a VertexIndex {
    type Item = &'a TermId;
    type IntoIter = std::slice::Iter<'a, TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tids(values: &[&str]) -> Vec<TermId> {
        values.iter().map(|v| TermId::of(v).unwrap()).collect()
    }

    #[test]
    fn test_input_order_is_array_order() {
        let index = VertexIndex::new(tids(&["HP:3", "HP:1", "HP:2"]));
        assert_eq!(index.len(), 3);
        assert_eq!(index.term(0).value(), "HP:3");
        assert_eq!(index.position(&TermId::of("HP:2").unwrap()), Some(2));
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let index = VertexIndex::new(tids(&["HP:1", "HP:2", "HP:1"]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.position(&TermId::of("HP:1").unwrap()), Some(0));
    }

    #[test]
    fn test_unknown_lookup() {
        let index = VertexIndex::new(tids(&["HP:1"]));
        let unknown = TermId::of("HP:999").unwrap();
        assert_eq!(index.position(&unknown), None);
        assert!(!index.contains(&unknown));

        let err = index.require(&unknown).unwrap_err();
        assert_eq!(err, GraphError::NodeNotPresentInGraph(unknown));
    }
}
