//! Graph build configuration
//!
//! Controls which edges reach the CSR builder and which graph variant is
//! produced. Defaults build an is_a hierarchy, keep every relationship, and pick
//! the variant from the number of relationship types left.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::model::{RelationshipType, TermId};

/// Graph variant selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Mono for a single relationship type, Poly otherwise
    #[default]
    Auto,
    Mono,
    Poly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GraphBuildConfig {
    pub hierarchy_relation: RelationshipType,

    /// Relationship ids to keep; `None` keeps all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_relations: Option<Vec<String>>,

    pub discard_non_propagating_relationships: bool,

    pub discard_duplicated_relationships: bool,

    pub graph_kind: GraphKind,

    pub artificial_root: TermId,
}

impl Default for GraphBuildConfig {
    fn default() -> Self {
        Self {
            hierarchy_relation: RelationshipType::is_a(),
            retained_relations: None,
            discard_non_propagating_relationships: false,
            discard_duplicated_relationships: false,
            graph_kind: GraphKind::Auto,
            artificial_root: TermId::owl_thing(),
        }
    }
}

impl GraphBuildConfig {
    pub fn hierarchy_relation(mut self, relation: RelationshipType) -> Self {
        self.hierarchy_relation = relation;
        self
    }

    pub fn retain_relations<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retained_relations = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn discard_non_propagating_relationships(mut self, discard: bool) -> Self {
        self.discard_non_propagating_relationships = discard;
        self
    }

    pub fn discard_duplicated_relationships(mut self, discard: bool) -> Self {
        self.discard_duplicated_relationships = discard;
        self
    }

    pub fn graph_kind(mut self, kind: GraphKind) -> Self {
        self.graph_kind = kind;
        self
    }

    pub fn artificial_root(mut self, root: TermId) -> Self {
        self.artificial_root = root;
        self
    }

    /// Whether edges of `relationship` survive the retained-relations filter
    pub fn retains(&self, relationship: &RelationshipType) -> bool {
        match &self.retained_relations {
            Some(ids) => ids.iter().any(|id| id == &relationship.id),
            None => true,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.hierarchy_relation.propagates {
            return Err(ConfigError::conflict(
                format!("Hierarchy relation '{}' does not propagate", self.hierarchy_relation.id),
                "Set propagates: true on the hierarchy relation",
            ));
        }

        if let Some(ids) = &self.retained_relations {
            if !self.retains(&self.hierarchy_relation) {
                return Err(ConfigError::conflict(
                    format!(
                        "retained_relations does not include the hierarchy relation '{}'",
                        self.hierarchy_relation.id
                    ),
                    "Add the hierarchy relation id to retained_relations",
                ));
            }
            let extra = ids.iter().any(|id| id != &self.hierarchy_relation.id);
            if self.graph_kind == GraphKind::Mono && extra {
                return Err(ConfigError::conflict(
                    "Mono graphs track only the hierarchy relation but retained_relations lists others",
                    "Use graph_kind: poly or retain only the hierarchy relation",
                ));
            }
        }

        Ok(())
    }

    /// Parse a versioned YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: vec![1],
            });
        }

        let config = export.config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load a versioned YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            config: Some(self.clone()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GraphBuildConfig>,
}
