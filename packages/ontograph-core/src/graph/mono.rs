//! Single-relation CSR graph
//!
//! Two CSR arrays over the same vertex index: `parents` groups edges by child,
//! `children` groups them by parent. No payload is stored, so a parent/child test
//! is a binary search in one row.

use std::iter::Copied;
use std::slice::Iter;

use super::{traversal, OntologyGraph};
use crate::csr::{CsrArrayBuilder, StaticCsrArray};
use crate::errors::{GraphError, Result};
use crate::index::VertexIndex;
use crate::model::{OntologyGraphEdge, RelationshipType, TermId};

/// Ontology graph tracking a single hierarchy relation.
#[derive(Debug, Clone)]
pub struct CsrMonoOntologyGraph {
    root: TermId,
    vertices: VertexIndex,
    relationship: RelationshipType,
    parents: StaticCsrArray<()>,
    children: StaticCsrArray<()>,
}

impl CsrMonoOntologyGraph {
    /// Build both arrays from `edges`. Edges of other relationship types are
    /// skipped; endpoints must be vertices of `vertices`.
    pub(crate) fn build(
        root: TermId,
        vertices: VertexIndex,
        relationship: RelationshipType,
        edges: &[OntologyGraphEdge],
    ) -> Result<Self> {
        let n = vertices.len();
        let mut parents = CsrArrayBuilder::new(n);
        let mut children = CsrArrayBuilder::new(n);

        for edge in edges.iter().filter(|e| e.relationship == relationship) {
            let (child, parent) = endpoints(&vertices, edge)?;
            parents.push(child, parent, ());
            children.push(parent, child, ());
        }

        Ok(Self {
            root,
            vertices,
            relationship,
            parents: parents.finish(),
            children: children.finish(),
        })
    }

    /// Edges grouped by child; columns are parents
    pub fn parent_array(&self) -> &StaticCsrArray<()> {
        &self.parents
    }

    /// Edges grouped by parent; columns are children
    pub fn child_array(&self) -> &StaticCsrArray<()> {
        &self.children
    }

    /// The hierarchy relation this graph tracks
    pub fn relationship(&self) -> &RelationshipType {
        &self.relationship
    }

    /// Graph made of `sub_root` and its descendants, rooted at `sub_root`.
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
        let mut parents = CsrArrayBuilder::new(kept.len());
        let mut children = CsrArrayBuilder::new(kept.len());
        for &old_child in &kept {
            for &old_parent in self.parents.row_indices(old_child) {
                if let (Some(c), Some(p)) = (remap[old_child], remap[old_parent as usize]) {
                    parents.push(c, p, ());
                    children.push(p, c, ());
                }
            }
        }

        Ok(Self {
            root: sub_root.clone(),
            vertices,
            relationship: self.relationship.clone(),
            parents: parents.finish(),
            children: children.finish(),
        })
    }
}

pub(crate) fn endpoints(vertices: &VertexIndex, edge: &OntologyGraphEdge) -> Result<(usize, usize)> {
    let subject = vertices.position(&edge.subject).ok_or_else(|| {
        GraphError::incompatible(format!("Unknown subject {} in edge {}", edge.subject, edge))
    })?;
    let object = vertices.position(&edge.object).ok_or_else(|| {
        GraphError::incompatible(format!("Unknown object {} in edge {}", edge.object, edge))
    })?;
    Ok((subject, object))
}

fn widen(idx: u32) -> usize {
    idx as usize
}

impl OntologyGraph for CsrMonoOntologyGraph {
    type Neighbors<'a> = std::iter::Map<Copied<Iter<'a, u32>>, fn(u32) -> usize>;

    fn root(&self) -> &TermId {
        &self.root
    }

    fn vertex_index(&self) -> &VertexIndex {
        &self.vertices
    }

    fn parent_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        self.parents
            .row_indices(idx)
            .iter()
            .copied()
            .map(widen as fn(u32) -> usize)
    }

    fn child_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        self.children
            .row_indices(idx)
            .iter()
            .copied()
            .map(widen as fn(u32) -> usize)
    }

    fn has_parent_edge(&self, child: usize, parent: usize) -> bool {
        self.parents.contains(child, parent)
    }
}
