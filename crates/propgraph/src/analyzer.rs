//! Whole-graph algorithms: components, grouping and pruning.

use crate::error::{Error, Result};
use crate::graph::PropertyGraph;
use crate::store::{ComponentLabels, ObjectKind, VertexId};
use crate::value::PropertyValue;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Summary counts for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
    /// Vertices with neither incoming nor outgoing edges.
    pub dangling: usize,
    /// Number of weakly connected components.
    pub components: usize,
    /// Size of the largest weakly connected component.
    pub largest_component: usize,
    /// Keys held by the identity index.
    pub indexed_keys: usize,
    /// Vertex identity property, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_identity: Option<String>,
    /// Edge identity property, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_identity: Option<String>,
}

impl PropertyGraph {
    /// Labels weakly connected components (edge direction ignored).
    ///
    /// Labels are assigned in vertex iteration order: the component of the
    /// first vertex is `0`, the next unseen component `1`, and so on.
    #[must_use]
    pub fn label_weak_components(&self) -> ComponentLabels {
        self.store.label_components(false)
    }

    /// Labels strongly connected components.
    #[must_use]
    pub fn label_strong_components(&self) -> ComponentLabels {
        self.store.label_components(true)
    }

    /// Partitions vertices by the value `labels` assigns them.
    ///
    /// Vertices missing from `labels` are skipped. Within a group vertices
    /// appear in iteration order.
    #[must_use]
    pub fn group_by_property<K>(&self, labels: &HashMap<VertexId, K>) -> HashMap<K, Vec<VertexId>>
    where
        K: Eq + Hash + Clone,
    {
        let mut groups: HashMap<K, Vec<VertexId>> = HashMap::new();
        for vertex in self.store.vertices() {
            if let Some(key) = labels.get(&vertex) {
                groups.entry(key.clone()).or_default().push(vertex);
            }
        }
        groups
    }

    /// Partitions vertices by the value of a declared vertex property.
    ///
    /// Unset slots group under the type's default value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if `name` is not a declared vertex property.
    pub fn group_by_vertex_property(&self, name: &str) -> Result<HashMap<PropertyValue, Vec<VertexId>>> {
        let map = self
            .store
            .property_map(ObjectKind::Vertex, name)
            .ok_or_else(|| Error::Schema(format!("vertex property '{name}' is not declared")))?;
        let labels: HashMap<VertexId, PropertyValue> = self
            .store
            .vertices()
            .map(|v| (v, map.get_or_default(v.index())))
            .collect();
        Ok(self.group_by_property(&labels))
    }

    /// Vertices with in-degree plus out-degree of zero.
    #[must_use]
    pub fn dangling_vertices(&self) -> Vec<VertexId> {
        self.store
            .vertices()
            .filter(|&v| self.store.in_degree(v) + self.store.out_degree(v) == 0)
            .collect()
    }

    /// Removes every vertex that is dangling at call time, in one batch.
    ///
    /// Removed vertices are dropped from the identity index. Handles to the
    /// remaining vertices stay valid.
    pub fn remove_dangling_vertices(&mut self) -> Vec<VertexId> {
        let dangling = self.dangling_vertices();
        if dangling.is_empty() {
            return dangling;
        }
        let removed = self.store.remove_vertices(&dangling);
        self.index.forget(&dangling);
        tracing::info!(removed, remaining = self.store.vertex_count(), "Removed dangling vertices");
        dangling
    }

    /// Summary counts for the graph.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let components = self.label_weak_components();
        GraphStats {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            dangling: self.dangling_vertices().len(),
            components: components.component_count(),
            largest_component: components.sizes().iter().copied().max().unwrap_or(0),
            indexed_keys: self.index.len(),
            vertex_identity: self.vertex_identity_property().map(str::to_string),
            edge_identity: self.edge_identity_property().map(str::to_string),
        }
    }
}
