//! YAML graph configuration.
//!
//! A config file declares the schema and identity properties up front:
//!
//! ```yaml
//! vertex-properties:
//!   uri: string
//!   tags: vector<string>
//! edge-properties:
//!   uri: string
//! vertex-identity: uri
//! edge-identity: uri
//! ```

use crate::error::{Error, Result};
use crate::graph::PropertyGraph;
use crate::value::ValueType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Schema and identity settings for a graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphConfig {
    /// Vertex property names and their types
    #[serde(rename = "vertex-properties", default)]
    pub vertex_properties: BTreeMap<String, ValueType>,

    /// Edge property names and their types
    #[serde(rename = "edge-properties", default)]
    pub edge_properties: BTreeMap<String, ValueType>,

    /// Vertex property used as the vertex key
    #[serde(rename = "vertex-identity")]
    pub vertex_identity: String,

    /// Edge property used as the edge key, if edges are keyed
    #[serde(rename = "edge-identity", default, skip_serializing_if = "Option::is_none")]
    pub edge_identity: Option<String>,
}

impl GraphConfig {
    /// A config keyed by a single string `uri` property on both kinds.
    #[must_use]
    pub fn uri_keyed() -> Self {
        let uri = || BTreeMap::from([("uri".to_string(), ValueType::STRING)]);
        Self {
            vertex_properties: uri(),
            edge_properties: uri(),
            vertex_identity: "uri".to_string(),
            edge_identity: Some("uri".to_string()),
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Config`] if it is
    /// not a valid config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::uri_keyed()
    }
}

impl PropertyGraph {
    /// Builds an empty graph with the schema and identity from `config`.
    ///
    /// # Errors
    ///
    /// [`Error::Schema`] for invalid declarations, [`Error::Config`] if an
    /// identity property is not among the declared properties.
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        let mut graph = Self::new();
        graph.init_graph(
            config
                .vertex_properties
                .iter()
                .map(|(name, ty)| (name.clone(), *ty)),
            config
                .edge_properties
                .iter()
                .map(|(name, ty)| (name.clone(), *ty)),
        )?;
        graph.set_vertex_identity_property(&config.vertex_identity)?;
        if let Some(edge_identity) = &config.edge_identity {
            graph.set_edge_identity_property(edge_identity)?;
        }
        Ok(graph)
    }
}
