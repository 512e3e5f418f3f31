//! Error types for ontograph-core
//!
//! Construction-time errors abort the graph build; there is no partially built
//! graph. `NodeNotPresentInGraph` is the only query-time error.

use std::fmt;
use thiserror::Error;

use crate::model::TermId;

/// Error kinds, one per failure family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty input or an edge referencing an undeclared vertex
    VerticesAndEdgesIncompatible,
    /// Self-loop or multi-edge
    GraphNotSimple,
    /// Vertices unreachable from the rest of the graph
    GraphNotConnected,
    /// Query argument is not a vertex of the graph
    NodeNotPresentInGraph,
    /// No vertex qualifies as the root
    NoRootCandidate,
    /// The artificial root identifier is already used by a vertex
    ArtificialRootTaken,
    /// Too many relationship bits for the widest payload
    InsufficientWidth,
    /// Malformed term identifier
    InvalidTermId,
    /// CSR arrays violate their layout invariants
    InvalidCsrArray,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::VerticesAndEdgesIncompatible => "vertices_and_edges_incompatible",
            ErrorKind::GraphNotSimple => "graph_not_simple",
            ErrorKind::GraphNotConnected => "graph_not_connected",
            ErrorKind::NodeNotPresentInGraph => "node_not_present_in_graph",
            ErrorKind::NoRootCandidate => "no_root_candidate",
            ErrorKind::ArtificialRootTaken => "artificial_root_taken",
            ErrorKind::InsufficientWidth => "insufficient_width",
            ErrorKind::InvalidTermId => "invalid_term_id",
            ErrorKind::InvalidCsrArray => "invalid_csr_array",
        }
    }

    /// Structural errors are detected while building and are never recoverable
    /// by retrying with the same input.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            ErrorKind::NodeNotPresentInGraph | ErrorKind::InvalidTermId
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for graph construction and queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("{0}")]
    VerticesAndEdgesIncompatible(String),

    #[error("{0}")]
    GraphNotSimple(String),

    /// `vertices` holds at most the first 10 offending vertices, sorted.
    #[error("{message}")]
    GraphNotConnected {
        message: String,
        count: usize,
        vertices: Vec<TermId>,
    },

    #[error("Item not found in the graph: {0}")]
    NodeNotPresentInGraph(TermId),

    #[error("No root candidate found")]
    NoRootCandidate,

    #[error("Tried to use {0} as the artificial root but it is already taken")]
    ArtificialRootTaken(TermId),

    #[error("Unable to encode {needed} relationship bits using {available} slots")]
    InsufficientWidth { needed: u32, available: u32 },

    #[error("Invalid term id '{0}': expected PREFIX:ID")]
    InvalidTermId(String),

    #[error("Invalid CSR array: {0}")]
    InvalidCsrArray(String),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::VerticesAndEdgesIncompatible(_) => ErrorKind::VerticesAndEdgesIncompatible,
            GraphError::GraphNotSimple(_) => ErrorKind::GraphNotSimple,
            GraphError::GraphNotConnected { .. } => ErrorKind::GraphNotConnected,
            GraphError::NodeNotPresentInGraph(_) => ErrorKind::NodeNotPresentInGraph,
            GraphError::NoRootCandidate => ErrorKind::NoRootCandidate,
            GraphError::ArtificialRootTaken(_) => ErrorKind::ArtificialRootTaken,
            GraphError::InsufficientWidth { .. } => ErrorKind::InsufficientWidth,
            GraphError::InvalidTermId(_) => ErrorKind::InvalidTermId,
            GraphError::InvalidCsrArray(_) => ErrorKind::InvalidCsrArray,
        }
    }

    // Convenience constructors
    pub fn incompatible(message: impl Into<String>) -> Self {
        GraphError::VerticesAndEdgesIncompatible(message.into())
    }

    pub fn not_simple(message: impl Into<String>) -> Self {
        GraphError::GraphNotSimple(message.into())
    }

    pub fn node_not_present(term_id: &TermId) -> Self {
        GraphError::NodeNotPresentInGraph(term_id.clone())
    }

    pub fn invalid_csr(message: impl Into<String>) -> Self {
        GraphError::InvalidCsrArray(message.into())
    }

    /// Build a `GraphNotConnected` error listing at most 10 vertices.
    pub fn not_connected(mut disconnected: Vec<TermId>) -> Self {
        let count = disconnected.len();
        disconnected.sort();
        disconnected.truncate(10);

        let summary = disconnected
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let message = if count > 10 {
            format!(
                "Found {} disconnected vertices. The first 10 vertices: {{{}}}",
                count, summary
            )
        } else {
            format!("Found {} disconnected vertices: {{{}}}", count, summary)
        };

        GraphError::GraphNotConnected {
            message,
            count,
            vertices: disconnected,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TermId {
        TermId::of(s).unwrap()
    }

    #[test]
    fn test_node_not_present_message() {
        let err = GraphError::node_not_present(&tid("HP:999"));
        assert_eq!(err.to_string(), "Item not found in the graph: HP:999");
        assert_eq!(err.kind(), ErrorKind::NodeNotPresentInGraph);
        assert!(!err.kind().is_structural());
    }

    #[test]
    fn test_not_connected_short_message() {
        let err = GraphError::not_connected(vec![tid("HP:999"), tid("HP:998")]);
        assert_eq!(err.to_string(), "Found 2 disconnected vertices: {HP:998, HP:999}");
        match err {
            GraphError::GraphNotConnected {
                count, vertices, ..
            } => {
                assert_eq!(count, 2);
                assert_eq!(vertices, vec![tid("HP:998"), tid("HP:999")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_not_connected_long_message_is_truncated() {
        let vertices: Vec<TermId> = (10..22).map(|i| tid(&format!("HP:{i}"))).collect();
        let err = GraphError::not_connected(vertices);
        let msg = err.to_string();
        assert!(msg.starts_with("Found 12 disconnected vertices. The first 10 vertices: {HP:10,"));
        assert!(msg.ends_with("HP:19}"));
        assert!(err.kind().is_structural());
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::GraphNotSimple.as_str(), "graph_not_simple");
        assert_eq!(ErrorKind::InsufficientWidth.to_string(), "insufficient_width");
        assert_eq!(
            GraphError::incompatible("x").kind(),
            ErrorKind::VerticesAndEdgesIncompatible
        );
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(GraphError::NoRootCandidate)
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoRootCandidate);
        assert_eq!(err.to_string(), "No root candidate found");
    }
}
