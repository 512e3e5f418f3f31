//! Test fixture generators

use ontograph_core::{OntologyGraphEdge, RelationshipType, TermId};
use proptest::prelude::*;
use proptest::sample::Index;

pub fn tid(value: &str) -> TermId {
    TermId::of(value).unwrap()
}

pub fn is_a(subject: &str, object: &str) -> OntologyGraphEdge {
    OntologyGraphEdge::is_a(tid(subject), tid(object))
}

pub fn part_of(subject: &str, object: &str) -> OntologyGraphEdge {
    OntologyGraphEdge::new(tid(subject), tid(object), RelationshipType::part_of())
}

/// Small HPO-like hierarchy rooted at `HP:1`
///
/// ```text
/// HP:1
/// ├── HP:01
/// │   ├── HP:010 ──┐
/// │   └── HP:011 ──┴── HP:0110
/// ├── HP:02
/// │   ├── HP:020
/// │   ├── HP:021
/// │   └── HP:022
/// └── HP:03
/// ```
///
/// Vertices are sorted.
pub fn hpo_vertices() -> Vec<TermId> {
    [
        "HP:01", "HP:010", "HP:011", "HP:0110", "HP:02", "HP:020", "HP:021", "HP:022", "HP:03",
        "HP:1",
    ]
    .iter()
    .map(|s| tid(s))
    .collect()
}

pub fn hpo_edges() -> Vec<OntologyGraphEdge> {
    vec![
        is_a("HP:01", "HP:1"),
        is_a("HP:010", "HP:01"),
        is_a("HP:011", "HP:01"),
        is_a("HP:0110", "HP:010"),
        is_a("HP:0110", "HP:011"),
        is_a("HP:02", "HP:1"),
        is_a("HP:020", "HP:02"),
        is_a("HP:021", "HP:02"),
        is_a("HP:022", "HP:02"),
        is_a("HP:03", "HP:1"),
    ]
}

/// The HPO-like fixture plus `part_of` edges that are not in the is_a hierarchy
pub fn hpo_edges_with_part_of() -> Vec<OntologyGraphEdge> {
    let mut edges = hpo_edges();
    edges.push(part_of("HP:020", "HP:01"));
    edges.push(part_of("HP:03", "HP:02"));
    edges
}

/// GO-like input with three top-level terms and no common root
pub fn multi_root_fixture() -> (Vec<TermId>, Vec<OntologyGraphEdge>) {
    let vertices = ["GO:1", "GO:2", "GO:3", "GO:11", "GO:12", "GO:21", "GO:31"]
        .iter()
        .map(|s| tid(s))
        .collect();
    let edges = vec![
        is_a("GO:11", "GO:1"),
        is_a("GO:12", "GO:1"),
        is_a("GO:21", "GO:2"),
        is_a("GO:31", "GO:3"),
        // Shared descendant keeps the three branches connected
        is_a("GO:12", "GO:2"),
        is_a("GO:31", "GO:12"),
    ];
    (vertices, edges)
}

/// Complete `arity`-ary tree of the given depth, root `T:0`
pub fn tree_fixture(arity: usize, depth: usize) -> (Vec<TermId>, Vec<OntologyGraphEdge>) {
    let mut vertices = vec![tid("T:0")];
    let mut edges = Vec::new();
    let mut level = vec![0usize];
    let mut next_id = 1usize;

    for _ in 0..depth {
        let mut next_level = Vec::with_capacity(level.len() * arity);
        for &parent in &level {
            for _ in 0..arity {
                let child = next_id;
                next_id += 1;
                vertices.push(tid(&format!("T:{child}")));
                edges.push(is_a(&format!("T:{child}"), &format!("T:{parent}")));
                next_level.push(child);
            }
        }
        level = next_level;
    }

    (vertices, edges)
}

/// Rooted DAG over `n` vertices as `parents[i]` = parent positions of vertex
/// `i + 1`. Every vertex but `0` has at least one parent with a smaller
/// position, so vertex `0` is the only root and the graph is connected.
#[derive(Debug, Clone)]
pub struct RandomDag {
    pub n: usize,
    pub parents: Vec<Vec<usize>>,
}

impl RandomDag {
    pub fn term(idx: usize) -> TermId {
        tid(&format!("R:{idx:04}"))
    }

    pub fn vertices(&self) -> Vec<TermId> {
        (0..self.n).map(Self::term).collect()
    }

    pub fn edges(&self) -> Vec<OntologyGraphEdge> {
        self.edge_pairs()
            .into_iter()
            .map(|(child, parent)| OntologyGraphEdge::is_a(Self::term(child), Self::term(parent)))
            .collect()
    }

    /// `(child, parent)` positions
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.parents
            .iter()
            .enumerate()
            .flat_map(|(i, parents)| parents.iter().map(move |&p| (i + 1, p)))
            .collect()
    }

    /// Brute-force reachability following parent edges, `reach[x][y]` = path x → y
    pub fn reachability(&self) -> Vec<Vec<bool>> {
        let mut reach = vec![vec![false; self.n]; self.n];
        // Parents always have smaller positions, so one pass in order suffices
        for child in 1..self.n {
            for &parent in &self.parents[child - 1] {
                reach[child][parent] = true;
                for target in 0..self.n {
                    if reach[parent][target] {
                        reach[child][target] = true;
                    }
                }
            }
        }
        reach
    }
}

pub fn random_dag(max_vertices: usize) -> impl Strategy<Value = RandomDag> {
    (2..=max_vertices).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<Index>(), 1..=3), n - 1).prop_map(
            move |choices| {
                let parents = choices
                    .into_iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        // Vertex i + 1 may link to any of 0..=i
                        let mut ps: Vec<usize> = picks.iter().map(|ix| ix.index(i + 1)).collect();
                        ps.sort_unstable();
                        ps.dedup();
                        ps
                    })
                    .collect();
                RandomDag { n, parents }
            },
        )
    })
}

/// A random DAG plus extra non-hierarchy edges between its vertices.
///
/// Extra edges always point from a larger to a smaller position and alternate
/// between part_of and a non-propagating relationship.
#[derive(Debug, Clone)]
pub struct MixedDag {
    pub dag: RandomDag,
    pub extra: Vec<(usize, usize)>,
}

impl MixedDag {
    pub fn adjacent_to() -> RelationshipType {
        RelationshipType::new("RO:0002220", "adjacent to", false)
    }

    pub fn edges(&self) -> Vec<OntologyGraphEdge> {
        let mut edges = self.dag.edges();
        for (i, &(s, o)) in self.extra.iter().enumerate() {
            let relationship = if i % 2 == 0 {
                RelationshipType::part_of()
            } else {
                Self::adjacent_to()
            };
            edges.push(OntologyGraphEdge::new(
                RandomDag::term(s),
                RandomDag::term(o),
                relationship,
            ));
        }
        edges
    }
}

pub fn mixed_dag(max_vertices: usize) -> impl Strategy<Value = MixedDag> {
    (random_dag(max_vertices), proptest::collection::vec((any::<Index>(), any::<Index>()), 0..16))
        .prop_map(|(dag, picks)| {
            let mut extra: Vec<(usize, usize)> = picks
                .iter()
                .map(|(a, b)| (a.index(dag.n), b.index(dag.n)))
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.max(b), a.min(b)))
                .collect();
            extra.sort_unstable();
            extra.dedup();
            MixedDag { dag, extra }
        })
}
