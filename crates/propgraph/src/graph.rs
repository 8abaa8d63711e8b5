//! The property graph facade.
//!
//! [`PropertyGraph`] owns the primitive store, the identity configuration
//! and the identity index, and is the only entry point callers use. The
//! mutation operations live in [`builder`](crate::builder) and the
//! algorithms in [`analyzer`](crate::analyzer); both are `impl` blocks on
//! this type.
//!
//! # Lifecycle
//!
//! 1. Declare the schema with [`init_graph`](PropertyGraph::init_graph).
//! 2. Choose identity properties with
//!    [`set_vertex_identity_property`](PropertyGraph::set_vertex_identity_property)
//!    and [`set_edge_identity_property`](PropertyGraph::set_edge_identity_property).
//! 3. Ingest with `create_relation`, `append_vertex_property`, ...
//!
//! Any mutation attempted before step 2 fails with [`Error::Config`].

use crate::error::{Error, Result};
use crate::identity::{IdentityConfig, IdentityIndex};
use crate::schema::{self, Declaration};
use crate::store::{EdgeId, GraphStore, ObjectKind, VertexId};
use crate::value::{PropertyValue, ValueType};
use std::collections::BTreeMap;

/// A vertex given either by handle or by identity value.
///
/// Query operations such as [`get_edge`](PropertyGraph::get_edge) accept
/// both; handle-only operations such as
/// [`has_edge`](PropertyGraph::has_edge) reject the key form with
/// [`Error::Type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexRef {
    /// A vertex handle.
    Handle(VertexId),
    /// A vertex identity value.
    Key(PropertyValue),
}

impl From<VertexId> for VertexRef {
    fn from(vertex: VertexId) -> Self {
        Self::Handle(vertex)
    }
}

impl From<usize> for VertexRef {
    fn from(index: usize) -> Self {
        Self::Handle(VertexId::new(index))
    }
}

impl From<PropertyValue> for VertexRef {
    fn from(key: PropertyValue) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for VertexRef {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<String> for VertexRef {
    fn from(key: String) -> Self {
        Self::Key(key.into())
    }
}

/// A property graph with identity-keyed vertices.
#[derive(Debug, Default)]
pub struct PropertyGraph {
    pub(crate) store: GraphStore,
    pub(crate) identity: IdentityConfig,
    pub(crate) index: IdentityIndex,
}

impl PropertyGraph {
    /// Creates an empty graph with no schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store.
    ///
    /// The schema is taken from the store's property maps, so both identity
    /// property names must be given and must be declared there. The identity
    /// index is rebuilt from the stored vertex identity values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a name is empty or not declared.
    pub fn from_store(store: GraphStore, vertex_identity: &str, edge_identity: &str) -> Result<Self> {
        if vertex_identity.is_empty() || edge_identity.is_empty() {
            return Err(Error::Config(
                "wrapping an existing graph requires vertex and edge identity properties"
                    .to_string(),
            ));
        }
        Self::from_parts(store, Some(vertex_identity), Some(edge_identity))
    }

    pub(crate) fn from_parts(
        store: GraphStore,
        vertex_identity: Option<&str>,
        edge_identity: Option<&str>,
    ) -> Result<Self> {
        let mut identity = IdentityConfig::default();
        if let Some(name) = vertex_identity {
            identity.set(&store, ObjectKind::Vertex, name)?;
        }
        if let Some(name) = edge_identity {
            identity.set(&store, ObjectKind::Edge, name)?;
        }
        let index = match identity.get(ObjectKind::Vertex) {
            Some(name) => IdentityIndex::rebuild(&store, name),
            None => IdentityIndex::new(),
        };
        Ok(Self {
            store,
            identity,
            index,
        })
    }

    /// Declares the vertex and edge property schema.
    ///
    /// Either map may be empty. Both are validated before anything is
    /// declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] on an empty name or a type conflict with an
    /// existing declaration.
    pub fn init_graph<V, E, S, T>(&mut self, vertex_props: V, edge_props: E) -> Result<()>
    where
        V: IntoIterator<Item = (S, ValueType)>,
        E: IntoIterator<Item = (T, ValueType)>,
        S: Into<String>,
        T: Into<String>,
    {
        let vertex_plan = schema::plan_many(&self.store, ObjectKind::Vertex, vertex_props)?;
        let edge_plan = schema::plan_many(&self.store, ObjectKind::Edge, edge_props)?;
        schema::apply(&mut self.store, ObjectKind::Vertex, vertex_plan)?;
        schema::apply(&mut self.store, ObjectKind::Edge, edge_plan)?;
        Ok(())
    }

    /// Declares a batch of properties for one object kind.
    ///
    /// # Errors
    ///
    /// As [`init_graph`](Self::init_graph).
    pub fn declare_properties<I, S>(&mut self, kind: ObjectKind, props: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, ValueType)>,
        S: Into<String>,
    {
        schema::declare_many(&mut self.store, kind, props)
    }

    /// Declares a single vertex property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] on an empty name or a type conflict.
    pub fn declare_vertex_property(&mut self, name: &str, value_type: ValueType) -> Result<Declaration> {
        schema::declare(&mut self.store, ObjectKind::Vertex, name, value_type)
    }

    /// Declares a single edge property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] on an empty name or a type conflict.
    pub fn declare_edge_property(&mut self, name: &str, value_type: ValueType) -> Result<Declaration> {
        schema::declare(&mut self.store, ObjectKind::Edge, name, value_type)
    }

    /// Declared vertex properties and their types.
    #[must_use]
    pub fn vertex_schema(&self) -> BTreeMap<String, ValueType> {
        schema::schema_of(&self.store, ObjectKind::Vertex)
    }

    /// Declared edge properties and their types.
    #[must_use]
    pub fn edge_schema(&self) -> BTreeMap<String, ValueType> {
        schema::schema_of(&self.store, ObjectKind::Edge)
    }

    /// Chooses the vertex property that identifies vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no vertex property is declared yet or
    /// `name` is not one of them.
    pub fn set_vertex_identity_property(&mut self, name: &str) -> Result<()> {
        self.identity.set(&self.store, ObjectKind::Vertex, name)?;
        self.index = IdentityIndex::rebuild(&self.store, name);
        Ok(())
    }

    /// Chooses the edge property that identifies edges.
    ///
    /// An empty name leaves edges unkeyed and is accepted as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no edge property is declared yet or
    /// `name` is not one of them.
    pub fn set_edge_identity_property(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Ok(());
        }
        self.identity.set(&self.store, ObjectKind::Edge, name)
    }

    /// The vertex identity property, if set.
    #[must_use]
    pub fn vertex_identity_property(&self) -> Option<&str> {
        self.identity.get(ObjectKind::Vertex)
    }

    /// The edge identity property, if set.
    #[must_use]
    pub fn edge_identity_property(&self) -> Option<&str> {
        self.identity.get(ObjectKind::Edge)
    }

    /// Read access to the primitive store.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Read access to the identity index.
    #[must_use]
    pub fn identity_index(&self) -> &IdentityIndex {
        &self.index
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.vertex_count() == 0
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Finds the vertex whose identity property equals `key`.
    ///
    /// Consults the identity index first and falls back to a linear scan, so
    /// vertices made with [`create_vertex`](Self::create_vertex) are found
    /// too. With duplicates, the scan returns the first in vertex order.
    ///
    /// `key` is coerced to the identity property's type first, as on the
    /// write paths; a key that cannot be coerced matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the vertex identity property is not set.
    pub fn get_vertex(&self, key: &PropertyValue) -> Result<Option<VertexId>> {
        let property = self.identity.require(ObjectKind::Vertex)?;
        let Some(map) = self.store.property_map(ObjectKind::Vertex, property) else {
            return Ok(None);
        };
        let Ok(key) = map.value_type().coerce(key.clone()) else {
            return Ok(None);
        };
        if let Some(vertex) = self.index.lookup(&key) {
            return Ok(Some(vertex));
        }
        Ok(self.find_vertex_by_property(property, &key))
    }

    /// Like [`get_vertex`](Self::get_vertex), but a miss is an error.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] on a miss, [`Error::Config`] if the vertex
    /// identity property is not set.
    pub fn require_vertex(&self, key: &PropertyValue) -> Result<VertexId> {
        self.get_vertex(key)?.ok_or_else(|| {
            Error::NotFound(format!(
                "vertex with value '{key}' for property '{}'",
                self.vertex_identity_property().unwrap_or_default()
            ))
        })
    }

    /// Linear scan for the first vertex whose `property` equals `value`.
    ///
    /// Unset slots compare as the type's default value.
    #[must_use]
    pub fn find_vertex_by_property(&self, property: &str, value: &PropertyValue) -> Option<VertexId> {
        let map = self.store.property_map(ObjectKind::Vertex, property)?;
        self.store
            .vertices()
            .find(|v| &map.get_or_default(v.index()) == value)
    }

    /// The identity value of `vertex` (the type default if never set).
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the vertex identity property is not set,
    /// [`Error::NotFound`] for a dead handle.
    pub fn get_vertex_identity_value(&self, vertex: VertexId) -> Result<PropertyValue> {
        let property = self.identity.require(ObjectKind::Vertex)?;
        self.vertex_property(vertex, property)
    }

    /// The value of a vertex property (the type default if never set).
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a dead handle, [`Error::Schema`] for an
    /// undeclared property.
    pub fn vertex_property(&self, vertex: VertexId, name: &str) -> Result<PropertyValue> {
        if !self.store.contains_vertex(vertex) {
            return Err(Error::NotFound(format!("vertex {}", vertex.index())));
        }
        self.read_slot(ObjectKind::Vertex, name, vertex.index())
    }

    /// The value of an edge property (the type default if never set).
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a dead handle, [`Error::Schema`] for an
    /// undeclared property.
    pub fn edge_property(&self, edge: EdgeId, name: &str) -> Result<PropertyValue> {
        if !self.store.contains_edge(edge) {
            return Err(Error::NotFound(format!("edge {}", edge.index())));
        }
        self.read_slot(ObjectKind::Edge, name, edge.index())
    }

    /// Resolves a [`VertexRef`] to a live handle.
    pub(crate) fn resolve(&self, vertex: &VertexRef) -> Result<Option<VertexId>> {
        match vertex {
            VertexRef::Handle(v) => Ok(self.store.contains_vertex(*v).then_some(*v)),
            VertexRef::Key(key) => self.get_vertex(key),
        }
    }

    fn read_slot(&self, kind: ObjectKind, name: &str, index: usize) -> Result<PropertyValue> {
        self.store
            .property_map(kind, name)
            .map(|map| map.get_or_default(index))
            .ok_or_else(|| Error::Schema(format!("{kind} property '{name}' is not declared")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri_graph() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        graph
            .init_graph(
                [("uri", ValueType::STRING), ("label", ValueType::STRING)],
                [("uri", ValueType::STRING)],
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_identity_before_schema_is_config_error() {
        let mut graph = PropertyGraph::new();
        let err = graph.set_vertex_identity_property("uri").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_identity_must_be_declared() {
        let mut graph = uri_graph();
        assert!(matches!(
            graph.set_vertex_identity_property("name"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            graph.set_edge_identity_property("label"),
            Err(Error::Config(_))
        ));
        graph.set_edge_identity_property("").unwrap();
        assert_eq!(graph.edge_identity_property(), None);
    }

    #[test]
    fn test_init_graph_is_atomic_across_kinds() {
        let mut graph = uri_graph();
        let result = graph.init_graph(
            [("extra", ValueType::STRING)],
            [("uri", ValueType::STRING_LIST)],
        );
        assert!(matches!(result, Err(Error::Schema(_))));
        assert!(!graph.vertex_schema().contains_key("extra"));
    }

    #[test]
    fn test_queries_require_vertex_identity() {
        let graph = uri_graph();
        assert!(matches!(
            graph.get_vertex(&"a".into()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_store_requires_both_names() {
        let mut store = GraphStore::new();
        store
            .new_property_map(ObjectKind::Vertex, "uri", ValueType::STRING)
            .unwrap();
        store
            .new_property_map(ObjectKind::Edge, "uri", ValueType::STRING)
            .unwrap();
        assert!(matches!(
            PropertyGraph::from_store(GraphStore::new(), "uri", ""),
            Err(Error::Config(_))
        ));

        let v = store.add_vertex();
        store.set_value(ObjectKind::Vertex, "uri", v.index(), "a".into()).unwrap();

        let graph = PropertyGraph::from_store(store, "uri", "uri").unwrap();
        assert_eq!(graph.identity_index().lookup(&"a".into()), Some(v));
        assert_eq!(graph.vertex_schema().len(), 1);
    }

    #[test]
    fn test_read_undeclared_property() {
        let mut graph = uri_graph();
        graph.set_vertex_identity_property("uri").unwrap();
        let v = graph.create_vertex("a").unwrap();
        assert_eq!(graph.vertex_property(v, "label").unwrap(), PropertyValue::from(""));
        assert!(matches!(
            graph.vertex_property(v, "missing"),
            Err(Error::Schema(_))
        ));
        assert!(matches!(
            graph.vertex_property(VertexId::new(7), "label"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_lookup_coerces_key_to_identity_type() {
        let mut graph = PropertyGraph::new();
        graph
            .init_graph(
                [("weight", "double".parse::<ValueType>().unwrap())],
                [("uri", ValueType::STRING)],
            )
            .unwrap();
        graph.set_vertex_identity_property("weight").unwrap();

        let (v, _) = graph.get_or_create_vertex(3_i64).unwrap();
        let (w, _) = graph.get_or_create_vertex(4.5).unwrap();
        graph.create_edge(v, w, None).unwrap();

        assert_eq!(graph.get_vertex(&PropertyValue::Int(3)).unwrap(), Some(v));
        assert_eq!(graph.get_vertex(&PropertyValue::Double(3.0)).unwrap(), Some(v));
        assert_eq!(graph.get_vertex(&PropertyValue::from("3")).unwrap(), None);
        assert!(graph
            .get_edge(PropertyValue::Int(3), w, None)
            .unwrap()
            .is_some());
        assert!(graph.require_vertex(&PropertyValue::Int(3)).is_ok());
    }

    #[test]
    fn test_falsy_key_survives_identity_reset() {
        let mut graph = uri_graph();
        graph.set_vertex_identity_property("uri").unwrap();
        let (first, _) = graph.get_or_create_vertex("").unwrap();

        graph.set_vertex_identity_property("uri").unwrap();
        let (again, existed) = graph.get_or_create_vertex("").unwrap();
        assert!(existed);
        assert_eq!(first, again);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_require_vertex_miss() {
        let mut graph = uri_graph();
        graph.set_vertex_identity_property("uri").unwrap();
        let err = graph.require_vertex(&"nope".into()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("nope"));
    }
}
