//! Primitive graph store backed by petgraph.
//!
//! This is the raw layer the rest of the crate builds on: it owns vertex and
//! edge existence, adjacency, degree queries and the named property maps.
//! It knows nothing about identity keys. Edges are never deduplicated here;
//! parallel edges and self-loops are allowed.
//!
//! # Handles
//!
//! The topology lives in a [`StableDiGraph`], so a [`VertexId`] or
//! [`EdgeId`] keeps pointing at the same object when *other* objects are
//! removed. A handle to a removed object is dead; its index may be reused by
//! a later insertion, which is why removal also clears the object's property
//! slots.

mod components;
mod property_map;

pub use components::ComponentLabels;
pub use property_map::PropertyMap;

use crate::error::{Error, Result};
use crate::value::{PropertyValue, ValueType};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a vertex.
pub type VertexId = NodeIndex;

/// Handle to an edge.
pub type EdgeId = EdgeIndex;

/// Which kind of graph object a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Vertex properties
    Vertex,
    /// Edge properties
    Edge,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Edge => f.write_str("edge"),
        }
    }
}

/// Directed multigraph with named, typed property maps.
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: StableDiGraph<(), ()>,
    vertex_props: BTreeMap<String, PropertyMap>,
    edge_props: BTreeMap<String, PropertyMap>,
}

impl GraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with every property unset.
    pub fn add_vertex(&mut self) -> VertexId {
        self.graph.add_node(())
    }

    /// Adds an edge `source -> target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if either endpoint does not exist.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        Ok(self.graph.add_edge(source, target, ()))
    }

    /// Removes the given vertices, their incident edges and all of their
    /// property values. Unknown handles are skipped.
    ///
    /// Returns the number of vertices actually removed.
    pub fn remove_vertices(&mut self, vertices: &[VertexId]) -> usize {
        let mut removed = 0;
        for &vertex in vertices {
            if !self.graph.contains_node(vertex) {
                continue;
            }
            let incident: Vec<EdgeId> = self
                .graph
                .edges_directed(vertex, Direction::Outgoing)
                .chain(self.graph.edges_directed(vertex, Direction::Incoming))
                .map(|edge| edge.id())
                .collect();
            for edge in incident {
                for map in self.edge_props.values_mut() {
                    map.remove(edge.index());
                }
            }
            for map in self.vertex_props.values_mut() {
                map.remove(vertex.index());
            }
            self.graph.remove_node(vertex);
            removed += 1;
        }
        removed
    }

    /// Returns `true` if `vertex` is a live vertex.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.graph.contains_node(vertex)
    }

    /// Returns `true` if `edge` is a live edge.
    #[must_use]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.graph.edge_weight(edge).is_some()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over vertex handles in ascending index order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.node_indices()
    }

    /// Iterates over `(edge, source, target)` triples.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, VertexId, VertexId)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.id(), edge.source(), edge.target()))
    }

    /// The `(source, target)` pair of an edge.
    #[must_use]
    pub fn edge_endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)> {
        self.graph.edge_endpoints(edge)
    }

    /// Number of edges pointing at `vertex`.
    #[must_use]
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.graph
            .edges_directed(vertex, Direction::Incoming)
            .count()
    }

    /// Number of edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.graph
            .edges_directed(vertex, Direction::Outgoing)
            .count()
    }

    /// Finds *an* edge `source -> target`.
    ///
    /// With parallel edges, which one is returned is unspecified.
    #[must_use]
    pub fn find_edge(&self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        if !self.contains_vertex(source) || !self.contains_vertex(target) {
            return None;
        }
        self.graph.find_edge(source, target)
    }

    /// Labels connected components.
    ///
    /// With `directed = false` edges are treated as undirected (weak
    /// components); with `directed = true` the result is the strongly
    /// connected components.
    #[must_use]
    pub fn label_components(&self, directed: bool) -> ComponentLabels {
        if directed {
            components::label_strong(&self.graph)
        } else {
            components::label_weak(&self.graph)
        }
    }

    /// All property maps of one object kind, keyed by name.
    #[must_use]
    pub fn property_maps(&self, kind: ObjectKind) -> &BTreeMap<String, PropertyMap> {
        match kind {
            ObjectKind::Vertex => &self.vertex_props,
            ObjectKind::Edge => &self.edge_props,
        }
    }

    /// The property map called `name`, if it exists.
    #[must_use]
    pub fn property_map(&self, kind: ObjectKind, name: &str) -> Option<&PropertyMap> {
        self.property_maps(kind).get(name)
    }

    /// Allocates a new, empty property map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the name is empty or already taken.
    pub fn new_property_map(
        &mut self,
        kind: ObjectKind,
        name: &str,
        value_type: ValueType,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Schema(format!(
                "{kind} property name must not be empty"
            )));
        }
        let maps = self.property_maps_mut(kind);
        if maps.contains_key(name) {
            return Err(Error::Schema(format!(
                "{kind} property '{name}' already allocated"
            )));
        }
        maps.insert(name.to_string(), PropertyMap::new(value_type));
        Ok(())
    }

    /// Writes `value` into the slot of object `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::Schema`] if the map does not exist
    /// - [`Error::NotFound`] if the object does not exist
    /// - [`Error::Type`] if the value does not fit the map's type
    pub fn set_value(
        &mut self,
        kind: ObjectKind,
        name: &str,
        index: usize,
        value: PropertyValue,
    ) -> Result<()> {
        self.check_object(kind, index)?;
        self.map_mut(kind, name)?.set(index, value)
    }

    /// Appends `value` to the list slot of object `index`.
    ///
    /// # Errors
    ///
    /// As [`set_value`](Self::set_value); additionally [`Error::Type`] if the
    /// map is not list-typed.
    pub fn push_value(
        &mut self,
        kind: ObjectKind,
        name: &str,
        index: usize,
        value: PropertyValue,
    ) -> Result<()> {
        self.check_object(kind, index)?;
        self.map_mut(kind, name)?.push(index, value)
    }

    /// The explicitly written value of a slot.
    #[must_use]
    pub fn value(&self, kind: ObjectKind, name: &str, index: usize) -> Option<&PropertyValue> {
        self.property_map(kind, name)?.get(index)
    }

    fn property_maps_mut(&mut self, kind: ObjectKind) -> &mut BTreeMap<String, PropertyMap> {
        match kind {
            ObjectKind::Vertex => &mut self.vertex_props,
            ObjectKind::Edge => &mut self.edge_props,
        }
    }

    fn map_mut(&mut self, kind: ObjectKind, name: &str) -> Result<&mut PropertyMap> {
        self.property_maps_mut(kind)
            .get_mut(name)
            .ok_or_else(|| Error::Schema(format!("{kind} property '{name}' is not declared")))
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(Error::NotFound(format!("vertex {}", vertex.index())))
        }
    }

    fn check_object(&self, kind: ObjectKind, index: usize) -> Result<()> {
        let exists = match kind {
            ObjectKind::Vertex => self.contains_vertex(VertexId::new(index)),
            ObjectKind::Edge => self.contains_edge(EdgeId::new(index)),
        };
        if exists {
            Ok(())
        } else {
            Err(Error::NotFound(format!("{kind} {index}")))
        }
    }
}
