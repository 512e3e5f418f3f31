//! Build configuration
//!
//! ```rust,ignore
//! use ontograph_core::config::{GraphBuildConfig, GraphKind};
//!
//! let config = GraphBuildConfig::default()
//!     .graph_kind(GraphKind::Poly)
//!     .discard_non_propagating_relationships(true);
//!
//! let config = GraphBuildConfig::from_yaml("ontology-graph.yaml")?;
//! ```

pub mod build_config;
pub mod error;

pub use build_config::{ConfigExportV1, GraphBuildConfig, GraphKind};
pub use error::{ConfigError, ConfigResult};
