//! Runtime-selected graph variant
//!
//! The builder decides between Mono and Poly, and the Poly payload width, only
//! once it has seen the edges. `CsrOntologyGraph` wraps every outcome behind one
//! `OntologyGraph` implementation.

use super::mono::CsrMonoOntologyGraph;
use super::poly::{CsrPolyOntologyGraph, PolyNeighbors};
use super::OntologyGraph;
use crate::config::GraphKind;
use crate::csr::PayloadWidth;
use crate::errors::Result;
use crate::index::VertexIndex;
use crate::model::{RelationshipType, TermId};

/// Poly graph with its payload width fixed at build time
#[derive(Debug, Clone)]
pub enum PolyOntologyGraph {
    U8(CsrPolyOntologyGraph<u8>),
    U16(CsrPolyOntologyGraph<u16>),
    U32(CsrPolyOntologyGraph<u32>),
    U64(CsrPolyOntologyGraph<u64>),
}

/// Graph produced by [`OntologyGraphBuilder::build`](super::OntologyGraphBuilder::build)
#[derive(Debug, Clone)]
pub enum CsrOntologyGraph {
    Mono(CsrMonoOntologyGraph),
    Poly(PolyOntologyGraph),
}

macro_rules! dispatch_poly {
    ($graph:expr, $g:ident => $body:expr) => {
        match $graph {
            PolyOntologyGraph::U8($g) => $body,
            PolyOntologyGraph::U16($g) => $body,
            PolyOntologyGraph::U32($g) => $body,
            PolyOntologyGraph::U64($g) => $body,
        }
    };
}

macro_rules! dispatch {
    ($graph:expr, $g:ident => $body:expr) => {
        match $graph {
            CsrOntologyGraph::Mono($g) => $body,
            CsrOntologyGraph::Poly(poly) => dispatch_poly!(poly, $g => $body),
        }
    };
}

impl PolyOntologyGraph {
    pub fn payload_width(&self) -> PayloadWidth {
        match self {
            PolyOntologyGraph::U8(_) => PayloadWidth::U8,
            PolyOntologyGraph::U16(_) => PayloadWidth::U16,
            PolyOntologyGraph::U32(_) => PayloadWidth::U32,
            PolyOntologyGraph::U64(_) => PayloadWidth::U64,
        }
    }

    pub fn hierarchy(&self) -> &RelationshipType {
        dispatch_poly!(self, g => g.hierarchy())
    }

    pub fn relationships(&self, subject: &TermId, object: &TermId) -> Result<Vec<RelationshipType>> {
        dispatch_poly!(self, g => g.relationships(subject, object))
    }

    pub fn extract_subgraph(&self, sub_root: &TermId) -> Result<Self> {
        Ok(match self {
            PolyOntologyGraph::U8(g) => PolyOntologyGraph::U8(g.extract_subgraph(sub_root)?),
            PolyOntologyGraph::U16(g) => PolyOntologyGraph::U16(g.extract_subgraph(sub_root)?),
            PolyOntologyGraph::U32(g) => PolyOntologyGraph::U32(g.extract_subgraph(sub_root)?),
            PolyOntologyGraph::U64(g) => PolyOntologyGraph::U64(g.extract_subgraph(sub_root)?),
        })
    }
}

impl CsrOntologyGraph {
    /// `Mono` or `Poly`; never `Auto`
    pub fn kind(&self) -> GraphKind {
        match self {
            CsrOntologyGraph::Mono(_) => GraphKind::Mono,
            CsrOntologyGraph::Poly(_) => GraphKind::Poly,
        }
    }

    /// Poly payload width, `None` for a Mono graph
    pub fn payload_width(&self) -> Option<PayloadWidth> {
        match self {
            CsrOntologyGraph::Mono(_) => None,
            CsrOntologyGraph::Poly(poly) => Some(poly.payload_width()),
        }
    }

    pub fn as_mono(&self) -> Option<&CsrMonoOntologyGraph> {
        match self {
            CsrOntologyGraph::Mono(g) => Some(g),
            CsrOntologyGraph::Poly(_) => None,
        }
    }

    pub fn as_poly(&self) -> Option<&PolyOntologyGraph> {
        match self {
            CsrOntologyGraph::Mono(_) => None,
            CsrOntologyGraph::Poly(poly) => Some(poly),
        }
    }

    /// The relation driving parent/child queries
    pub fn hierarchy(&self) -> &RelationshipType {
        match self {
            CsrOntologyGraph::Mono(g) => g.relationship(),
            CsrOntologyGraph::Poly(poly) => poly.hierarchy(),
        }
    }

    /// Relationship types of the edges `subject --rel--> object`. A Mono graph
    /// only knows its hierarchy relation.
    pub fn relationships(&self, subject: &TermId, object: &TermId) -> Result<Vec<RelationshipType>> {
        match self {
            CsrOntologyGraph::Mono(g) => Ok(if g.is_child_of(subject, object)? {
                vec![g.relationship().clone()]
            } else {
                Vec::new()
            }),
            CsrOntologyGraph::Poly(poly) => poly.relationships(subject, object),
        }
    }

    pub fn extract_subgraph(&self, sub_root: &TermId) -> Result<Self> {
        Ok(match self {
            CsrOntologyGraph::Mono(g) => CsrOntologyGraph::Mono(g.extract_subgraph(sub_root)?),
            CsrOntologyGraph::Poly(poly) => CsrOntologyGraph::Poly(poly.extract_subgraph(sub_root)?),
        })
    }
}

/// Neighbour iterator of whichever variant is inside a [`CsrOntologyGraph`]
pub enum NeighborIter<'a> {
    Mono(<CsrMonoOntologyGraph as OntologyGraph>::Neighbors<'a>),
    U8(PolyNeighbors<'a, u8>),
    U16(PolyNeighbors<'a, u16>),
    U32(PolyNeighbors<'a, u32>),
    U64(PolyNeighbors<'a, u64>),
}

impl Iterator for NeighborIter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        match self {
            NeighborIter::Mono(it) => it.next(),
            NeighborIter::U8(it) => it.next(),
            NeighborIter::U16(it) => it.next(),
            NeighborIter::U32(it) => it.next(),
            NeighborIter::U64(it) => it.next(),
        }
    }
}

macro_rules! neighbors {
    ($graph:expr, $method:ident, $idx:expr) => {
        match $graph {
            CsrOntologyGraph::Mono(g) => NeighborIter::Mono(g.$method($idx)),
            CsrOntologyGraph::Poly(PolyOntologyGraph::U8(g)) => NeighborIter::U8(g.$method($idx)),
            CsrOntologyGraph::Poly(PolyOntologyGraph::U16(g)) => NeighborIter::U16(g.$method($idx)),
            CsrOntologyGraph::Poly(PolyOntologyGraph::U32(g)) => NeighborIter::U32(g.$method($idx)),
            CsrOntologyGraph::Poly(PolyOntologyGraph::U64(g)) => NeighborIter::U64(g.$method($idx)),
        }
    };
}

impl OntologyGraph for CsrOntologyGraph {
    type Neighbors<'a> = NeighborIter<'a>;

    fn root(&self) -> &TermId {
        dispatch!(self, g => g.root())
    }

    fn vertex_index(&self) -> &VertexIndex {
        dispatch!(self, g => g.vertex_index())
    }

    fn parent_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        neighbors!(self, parent_indices, idx)
    }

    fn child_indices(&self, idx: usize) -> Self::Neighbors<'_> {
        neighbors!(self, child_indices, idx)
    }

    fn has_parent_edge(&self, child: usize, parent: usize) -> bool {
        dispatch!(self, g => g.has_parent_edge(child, parent))
    }
}
