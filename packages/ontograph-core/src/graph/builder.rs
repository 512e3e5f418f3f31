//! Ontology graph construction
//!
//! Pipeline, in order:
//! 1. drop edges whose relationship is not retained
//! 2. optionally drop non-propagating and duplicated edges
//! 3. pick Mono or Poly (Mono keeps hierarchy edges only)
//! 4. structural validation (`CompatibilityChecker`), then connectivity of the
//!    hierarchy edges alone
//! 5. root resolution, possibly adding an artificial root
//! 6. vertex indexing and CSR construction
//!
//! Every step runs on the caller's thread; the transient buckets are dropped as
//! soon as the arrays are frozen.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::csr_graph::{CsrOntologyGraph, PolyOntologyGraph};
use super::mono::CsrMonoOntologyGraph;
use super::poly::CsrPolyOntologyGraph;
use crate::config::{ConfigResult, GraphBuildConfig, GraphKind};
use crate::csr::{DataIndexer, PayloadWidth, RelationCodec};
use crate::errors::{GraphError, Result};
use crate::index::VertexIndex;
use crate::model::{OntologyGraphEdge, TermId};
use crate::root::find_root;
use crate::validation::CompatibilityChecker;

/// Builds immutable ontology graphs from vertex and edge lists.
///
/// # Examples
///
/// ```rust
/// use ontograph_core::graph::{OntologyGraph, OntologyGraphBuilder};
/// use ontograph_core::model::{OntologyGraphEdge, TermId};
///
/// let t = |s: &str| TermId::of(s).unwrap();
/// let vertices = vec![t("HP:1"), t("HP:2"), t("HP:3")];
/// let edges = vec![
///     OntologyGraphEdge::is_a(t("HP:2"), t("HP:1")),
///     OntologyGraphEdge::is_a(t("HP:3"), t("HP:2")),
/// ];
///
/// let graph = OntologyGraphBuilder::new().build(vertices, edges).unwrap();
/// assert_eq!(graph.root(), &t("HP:1"));
/// assert!(graph.is_descendant_of(&t("HP:3"), &t("HP:1")).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OntologyGraphBuilder {
    config: GraphBuildConfig,
}

/// Validated input with its root resolved
struct Prepared {
    root: TermId,
    vertices: VertexIndex,
    edges: Vec<OntologyGraphEdge>,
}

impl OntologyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with a validated configuration
    pub fn with_config(config: GraphBuildConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GraphBuildConfig {
        &self.config
    }

    /// Build the variant selected by the configuration.
    ///
    /// With `GraphKind::Auto` a Mono graph is built when the hierarchy is the
    /// only remaining relationship type; Poly payloads use the narrowest width that fits every
    /// relationship bit.
    pub fn build<V, E>(&self, vertices: V, edges: E) -> Result<CsrOntologyGraph>
    where
        V: IntoIterator<Item = TermId>,
        E: IntoIterator<Item = OntologyGraphEdge>,
    {
        let edges = self.filter_edges(edges.into_iter().collect());
        let kind = self.resolve_kind(&edges);

        match kind {
            GraphKind::Mono => {
                let prepared = self.prepare(vertices.into_iter().collect(), self.hierarchy_only(edges)?)?;
                info!("Building Mono graph with {} vertices", prepared.vertices.len());
                Ok(CsrOntologyGraph::Mono(self.assemble_mono(prepared)?))
            }
            _ => {
                let prepared = self.prepare(vertices.into_iter().collect(), edges)?;
                let codec = RelationCodec::new(
                    std::iter::once(&self.config.hierarchy_relation)
                        .chain(prepared.edges.iter().map(|e| &e.relationship)),
                );
                let needed = codec.bits_needed();
                let width = PayloadWidth::for_bits(needed).ok_or(GraphError::InsufficientWidth {
                    needed,
                    available: u64::BITS,
                })?;
                info!(
                    "Building Poly graph with {} vertices, {} relationship types, {:?} payload",
                    prepared.vertices.len(),
                    codec.relationships().len(),
                    width
                );

                let poly = match width {
                    PayloadWidth::U8 => PolyOntologyGraph::U8(self.assemble_poly(prepared)?),
                    PayloadWidth::U16 => PolyOntologyGraph::U16(self.assemble_poly(prepared)?),
                    PayloadWidth::U32 => PolyOntologyGraph::U32(self.assemble_poly(prepared)?),
                    PayloadWidth::U64 => PolyOntologyGraph::U64(self.assemble_poly(prepared)?),
                };
                Ok(CsrOntologyGraph::Poly(poly))
            }
        }
    }

    /// Build a Mono graph regardless of `graph_kind`; edges of other
    /// relationship types are dropped.
    pub fn build_mono<V, E>(&self, vertices: V, edges: E) -> Result<CsrMonoOntologyGraph>
    where
        V: IntoIterator<Item = TermId>,
        E: IntoIterator<Item = OntologyGraphEdge>,
    {
        let edges = self.hierarchy_only(self.filter_edges(edges.into_iter().collect()))?;
        let prepared = self.prepare(vertices.into_iter().collect(), edges)?;
        self.assemble_mono(prepared)
    }

    /// Build a Poly graph with payload `D`, failing with `InsufficientWidth`
    /// when `D` is too narrow.
    pub fn build_poly<D, V, E>(&self, vertices: V, edges: E) -> Result<CsrPolyOntologyGraph<D>>
    where
        D: DataIndexer,
        V: IntoIterator<Item = TermId>,
        E: IntoIterator<Item = OntologyGraphEdge>,
    {
        let edges = self.filter_edges(edges.into_iter().collect());
        let prepared = self.prepare(vertices.into_iter().collect(), edges)?;
        self.assemble_poly(prepared)
    }

    fn filter_edges(&self, mut edges: Vec<OntologyGraphEdge>) -> Vec<OntologyGraphEdge> {
        let config = &self.config;

        if config.retained_relations.is_some() {
            let before = edges.len();
            edges.retain(|e| config.retains(&e.relationship));
            debug!("Dropped {} edges of non-retained relationships", before - edges.len());
        }

        if config.discard_non_propagating_relationships {
            let before = edges.len();
            edges.retain(|e| e.relationship.propagates);
            debug!("Discarded {} non-propagating edges", before - edges.len());
        }

        if config.discard_duplicated_relationships {
            let before = edges.len();
            let mut seen: FxHashSet<OntologyGraphEdge> =
                FxHashSet::with_capacity_and_hasher(edges.len(), Default::default());
            edges.retain(|e| seen.insert(e.clone()));
            let removed = before - edges.len();
            if removed > 0 {
                warn!("Discarded {} duplicated edges", removed);
            }
        }

        edges
    }

    fn resolve_kind(&self, edges: &[OntologyGraphEdge]) -> GraphKind {
        match self.config.graph_kind {
            GraphKind::Auto => {
                let hierarchy = &self.config.hierarchy_relation;
                if edges.iter().all(|e| &e.relationship == hierarchy) {
                    GraphKind::Mono
                } else {
                    GraphKind::Poly
                }
            }
            kind => kind,
        }
    }

    /// Keep hierarchy edges only. Input with edges but none of the hierarchy
    /// relation has no root.
    fn hierarchy_only(&self, mut edges: Vec<OntologyGraphEdge>) -> Result<Vec<OntologyGraphEdge>> {
        let before = edges.len();
        edges.retain(|e| e.relationship == self.config.hierarchy_relation);
        if before > 0 && edges.is_empty() {
            warn!(
                "None of {} edges uses the hierarchy relation {}",
                before, self.config.hierarchy_relation.id
            );
            return Err(GraphError::NoRootCandidate);
        }
        debug!("Dropped {} non-hierarchy edges", before - edges.len());
        Ok(edges)
    }

    fn prepare(&self, mut vertices: Vec<TermId>, mut edges: Vec<OntologyGraphEdge>) -> Result<Prepared> {
        CompatibilityChecker::check(&vertices, &edges)?;
        CompatibilityChecker::check_hierarchy(&vertices, &edges, &self.config.hierarchy_relation)?;

        let resolution = find_root(
            &mut vertices,
            &mut edges,
            &self.config.hierarchy_relation,
            &self.config.artificial_root,
        )?;
        if resolution.is_artificial() {
            debug!(
                "Linked {} top-level terms to {}",
                resolution.candidates.len(),
                resolution.root
            );
        }

        Ok(Prepared {
            root: resolution.root,
            vertices: VertexIndex::new(vertices),
            edges,
        })
    }

    fn assemble_mono(&self, prepared: Prepared) -> Result<CsrMonoOntologyGraph> {
        CsrMonoOntologyGraph::build(
            prepared.root,
            prepared.vertices,
            self.config.hierarchy_relation.clone(),
            &prepared.edges,
        )
    }

    fn assemble_poly<D: DataIndexer>(&self, prepared: Prepared) -> Result<CsrPolyOntologyGraph<D>> {
        CsrPolyOntologyGraph::build(
            prepared.root,
            prepared.vertices,
            self.config.hierarchy_relation.clone(),
            &prepared.edges,
        )
    }
}
