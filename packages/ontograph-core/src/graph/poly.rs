//! Multi-relation CSR graph
//!
//! One CSR array holds every relationship. For an edge `s --rel--> o` the slot
//! `(s, o)` gets the forward bit of `rel` and the slot `(o, s)` gets its inverted
//! bit; both edges of a pair that share a slot are OR-ed together. Hierarchy
//! queries filter a row by the hierarchy relation's forward (parents) or
//! inverted (children) bit.

use std::iter::{Copied, Zip};
use std::slice::Iter;

use super::mono::endpoints;
use super::{traversal, OntologyGraph};
use crate::csr::{CsrArrayBuilder, DataIndexer, RelationCodec, StaticCsrArray};
use crate::errors::{GraphError, Result};
use crate::index::VertexIndex;
use crate::model::{OntologyGraphEdge, RelationshipType, TermId};

/// Ontology graph over several relationship types, payload `D` per slot.
#[derive(Debug, Clone)]
pub struct CsrPolyOntologyGraph<D> {
    root: TermId,
    vertices: VertexIndex,
    adjacency: StaticCsrArray<D>,
    codec: RelationCodec,
    hierarchy: RelationshipType,
    parent_bit: u32,
    child_bit: u32,
}

impl<D: DataIndexer> CsrPolyOntologyGraph<D> {
    /// Encode `edges` into a single array. The codec covers `hierarchy` plus
    /// every relationship type found in `edges`.
    pub(crate) fn build(
        root: TermId,
        vertices: VertexIndex,
        hierarchy: RelationshipType,
        edges: &[OntologyGraphEdge],
    ) -> Result<Self> {
        if !hierarchy.propagates {
            return Err(GraphError::incompatible(format!(
                "Hierarchy relationship {} does not propagate",
                hierarchy
            )));
        }
        let codec = RelationCodec::new(
            std::iter::once(&hierarchy).chain(edges.iter().map(|e| &e.relationship)),
        );
        if codec.bits_needed() > D::BITS {
            return Err(GraphError::InsufficientWidth {
                needed: codec.bits_needed(),
                available: D::BITS,
            });
        }
        let (parent_bit, child_bit) = hierarchy_bits(&codec, &hierarchy)?;

        let mut builder = CsrArrayBuilder::new(vertices.len());
        for edge in edges {
            let (subject, object) = endpoints(&vertices, edge)?;
            // Every edge type is in the codec
            let forward = codec.bit_index(&edge.relationship, false).unwrap_or(D::BITS);
            let inverted = codec.bit_index(&edge.relationship, true).unwrap_or(D::BITS);
            builder.push(subject, object, D::empty().set(forward));
            builder.push(object, subject, D::empty().set(inverted));
        }

        Ok(Self {
            root,
            vertices,
            adjacency: builder.finish_with(|a, b| a | b),
            codec,
            hierarchy,
            parent_bit,
            child_bit,
        })
    }

    pub fn adjacency(&self) -> &StaticCsrArray<D> {
        &self.adjacency
    }

    pub fn codec(&self) -> &RelationCodec {
        &self.codec
    }

    /// The relation driving parent/child queries
    pub fn hierarchy(&self) -> &RelationshipType {
        &self.hierarchy
    }

    /// Slot payload marks its column as a hierarchy parent
    #[inline]
    pub fn is_parent_edge(&self, value: D) -> bool {
        value.is_set(self.parent_bit)
    }

    /// Slot payload marks its column as a hierarchy child
    #[inline]
    pub fn is_child_edge(&self, value: D) -> bool {
        value.is_set(self.child_bit)
    }

    /// Relationship types of the edges `subject --rel--> object`.
    ///
    /// Non-propagating types are stored symmetrically and so are reported for
    /// both directions.
    pub fn relationships(&self, subject: &TermId, object: &TermId) -> Result<Vec<RelationshipType>> {
        let s = self.vertices.require(subject)?;
        Ok(self
            .vertices
            .position(object)
            .and_then(|o| self.adjacency.get(s, o))
            .map(|value| self.codec.decode(*value))
            .unwrap_or_default())
    }

    /// Graph made of `sub_root` and its hierarchy descendants, rooted at
    /// `sub_root`. Slots between kept vertices keep all their bits.
    pub fn extract_subgraph(&self, sub_root: &TermId) -> Result<Self> {
        if sub_root == &self.root {
            return Ok(self.clone());
        }
        let start = self.vertices.require(sub_root)?;
        let mut kept = traversal::closure(start, |i| self.child_indices(i));
        kept.push(start);
        kept.sort_unstable();

        let mut remap: Vec<Option<usize>> = vec![None; self.size()];
        for (new_idx, &old_idx) in kept.iter().enumerate() {
            remap[old_idx] = Some(new_idx);
        }

        let vertices = VertexIndex::new(kept.iter().map(|&i| self.vertices.term(i).clone()));
        let mut builder = CsrArrayBuilder::new(kept.len());
        for &old_row in &kept {
            let (cols, data) = self.adjacency.row(old_row);
            for (&old_col, &value) in cols.iter().zip(data) {
                if let (Some(row), Some(col)) = (remap[old_row], remap[old_col as usize]) {
                    builder.push(row, col, value);
                }
            }
        }

        Ok(Self {
            root: sub_root.clone(),
            vertices,
            adjacency: builder.finish(),
            codec: self.codec.clone(),
            hierarchy: self.hierarchy.clone(),
            parent_bit: self.parent_bit,
            child_bit: self.child_bit,
        })
    }

    fn neighbors(&self, idx: usize, bit: u32) -> PolyNeighbors<'_, D> {
        let (cols, data) = self.adjacency.row(idx);
        PolyNeighbors {
            slots: cols.iter().copied().zip(data.iter().copied()),
            bit,
        }
    }
}

fn hierarchy_bits(codec: &RelationCodec, hierarchy: &RelationshipType) -> Result<(u32, u32)> {
    match (
        codec.bit_index(hierarchy, false),
        codec.bit_index(hierarchy, true),
    ) {
        (Some(parent), Some(child)) => Ok((parent, child)),
        _ => Err(GraphError::incompatible(format!(
            "Hierarchy relationship {} is not encoded",
            hierarchy
        ))),
    }
}

/// Columns of one row whose payload has a given bit set
#[derive(Debug, Clone)]
pub struct PolyNeighbors<'a, D> {
    slots: Zip<Copied<Iter<'a, u32>>, Copied<Iter<'a, D>>>,
    bit: u32,
}

impl<D: DataIndexer> Iterator for PolyNeighbors<'_, D> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let bit = self.bit;
        self.slots
            .by_ref()
            .find(|(_, value)| value.is_set(bit))
            .map(|(col, _)| col as usize)
    }
}

impl<D: DataIndexer> OntologyGraph for CsrPolyOntologyGraph<D> {
    type Neighbors<'a> = PolyNeighbors<'a, D>;

    fn root(&self) -> &TermId {
        &self.root
    }

    fn vertex_index(&self) -> &VertexIndex {
        &self.vertices
    }

    fn parent_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        self.neighbors(idx, self.parent_bit)
    }

    fn child_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        self.neighbors(idx, self.child_bit)
    }

    fn has_parent_edge(&self, child: usize, parent: usize) -> bool {
        self.adjacency
            .get(child, parent)
            .map(|value| self.is_parent_edge(*value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn tid(s: &str) -> TermId {
        TermId::of(s).unwrap()
    }

    fn adjacent() -> RelationshipType {
        RelationshipType::new("RO:0002220", "adjacent to", false)
    }

    /// is_a: HP:01 -> HP:1, HP:02 -> HP:1, HP:010 -> HP:01
    /// part_of: HP:010 -> HP:02
    /// adjacent to: HP:01 -- HP:02
    fn small_graph() -> CsrPolyOntologyGraph<u8> {
        let vertices = VertexIndex::new(
            ["HP:01", "HP:010", "HP:02", "HP:1"].iter().map(|s| tid(s)),
        );
        let edges = vec![
            OntologyGraphEdge::is_a(tid("HP:01"), tid("HP:1")),
            OntologyGraphEdge::is_a(tid("HP:02"), tid("HP:1")),
            OntologyGraphEdge::is_a(tid("HP:010"), tid("HP:01")),
            OntologyGraphEdge::new(tid("HP:010"), tid("HP:02"), RelationshipType::part_of()),
            OntologyGraphEdge::new(tid("HP:01"), tid("HP:02"), adjacent()),
        ];
        CsrPolyOntologyGraph::build(tid("HP:1"), vertices, RelationshipType::is_a(), &edges)
            .unwrap()
    }

    #[test]
    fn test_layout() {
        let graph = small_graph();
        // bits: is_a 0/1, part_of 2/3, adjacent 4
        assert_eq!(graph.codec().bits_needed(), 5);
        assert_eq!(graph.adjacency().indptr(), &[0, 3, 5, 8, 10]);
        // Row HP:01: HP:010 (child), HP:02 (adjacent), HP:1 (parent)
        assert_eq!(graph.adjacency().row(0), (&[1u32, 2, 3][..], &[0b10u8, 0b1_0000, 0b01][..]));
        // Row HP:02: HP:01 (adjacent), HP:010 (part_of inverted), HP:1 (parent)
        assert_eq!(graph.adjacency().row(2), (&[0u32, 1, 3][..], &[0b1_0000u8, 0b1000, 0b01][..]));
    }

    #[test]
    fn test_hierarchy_queries_ignore_other_relationships() {
        let graph = small_graph();
        let parents = graph.get_parents(&tid("HP:010"), false).unwrap();
        assert_eq!(parents.len(), 1);
        assert!(parents.contains(&tid("HP:01")));

        assert!(graph.get_children(&tid("HP:02"), false).unwrap().is_empty());
        assert!(graph.is_leaf(&tid("HP:02")).unwrap());
        assert!(!graph.is_child_of(&tid("HP:010"), &tid("HP:02")).unwrap());
        assert!(graph.is_descendant_of(&tid("HP:010"), &tid("HP:1")).unwrap());
        assert_eq!(graph.get_descendants(&tid("HP:1"), false).unwrap().len(), 3);
    }

    #[test]
    fn test_relationships_between_pair() {
        let graph = small_graph();
        assert_eq!(
            graph.relationships(&tid("HP:010"), &tid("HP:02")).unwrap(),
            vec![RelationshipType::part_of()]
        );
        assert!(graph.relationships(&tid("HP:02"), &tid("HP:010")).unwrap().is_empty());
        assert_eq!(
            graph.relationships(&tid("HP:02"), &tid("HP:01")).unwrap(),
            vec![adjacent()]
        );
        assert!(graph.relationships(&tid("HP:1"), &tid("HP:999")).unwrap().is_empty());
        assert_eq!(
            graph.relationships(&tid("HP:999"), &tid("HP:1")).unwrap_err().kind(),
            ErrorKind::NodeNotPresentInGraph
        );
    }

    #[test]
    fn test_payload_too_narrow() {
        let rels: Vec<RelationshipType> = (0..5)
            .map(|i| RelationshipType::new(format!("R:{i}"), format!("rel {i}"), true))
            .collect();
        let mut names = vec!["HP:1".to_string()];
        names.extend((0..5).map(|i| format!("HP:{}", i + 10)));
        let vertices = VertexIndex::new(names.iter().map(|s| tid(s)));
        let edges: Vec<OntologyGraphEdge> = rels
            .iter()
            .enumerate()
            .map(|(i, rel)| OntologyGraphEdge::new(tid(&format!("HP:{}", i + 10)), tid("HP:1"), rel.clone()))
            .collect();

        // 6 propagating types need 12 bits
        let err = CsrPolyOntologyGraph::<u8>::build(tid("HP:1"), vertices.clone(), RelationshipType::is_a(), &edges)
            .unwrap_err();
        assert_eq!(err, GraphError::InsufficientWidth { needed: 12, available: 8 });

        let graph = CsrPolyOntologyGraph::<u16>::build(tid("HP:1"), vertices, RelationshipType::is_a(), &edges)
            .unwrap();
        assert_eq!(graph.codec().bits_needed(), 12);
    }

    #[test]
    fn test_extract_subgraph_keeps_all_bits() {
        let graph = small_graph();
        let sub = graph.extract_subgraph(&tid("HP:01")).unwrap();
        assert_eq!(sub.root(), &tid("HP:01"));
        assert_eq!(sub.term_ids(), &[tid("HP:01"), tid("HP:010")]);
        assert!(sub.is_child_of(&tid("HP:010"), &tid("HP:01")).unwrap());
        assert_eq!(sub.adjacency().n_edges(), 2);

        let whole = graph.extract_subgraph(&tid("HP:1")).unwrap();
        assert_eq!(whole.adjacency(), graph.adjacency());
    }

    #[test]
    fn test_non_propagating_hierarchy_rejected() {
        let vertices = VertexIndex::new(vec![tid("HP:1"), tid("HP:2")]);
        let edges = vec![OntologyGraphEdge::new(tid("HP:2"), tid("HP:1"), adjacent())];
        let err = CsrPolyOntologyGraph::<u8>::build(tid("HP:1"), vertices, adjacent(), &edges).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VerticesAndEdgesIncompatible);
    }
}
