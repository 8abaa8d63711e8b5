//! Graph construction and property assignment.
//!
//! Two families of operations live here:
//!
//! - **Unconditional** creation (`create_vertex`, `create_edge`): always adds
//!   a new object, never consults the identity index. Calling
//!   `create_vertex` twice with the same value yields two vertices.
//! - **Get-or-create** (`get_or_create_vertex`, `create_edge_if_not_exists`,
//!   `create_relation`, `append_*_property`): reuse what exists, create what
//!   does not. Only this path registers vertices in the identity index.
//!
//! Every operation validates configuration, schema and value types before it
//! touches the store, so a failing call leaves the graph unchanged.

use crate::error::{Error, Result};
use crate::graph::{PropertyGraph, VertexRef};
use crate::schema;
use crate::store::{EdgeId, ObjectKind, VertexId};
use crate::value::{PropertyValue, ValueType};

/// How property assignment treats missing properties and existing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOptions {
    /// Declare an undeclared property on the fly (as `string`, or
    /// `vector<string>` when accumulating). When `false`, an undeclared
    /// property is a [`Error::Schema`].
    pub create_if_absent: bool,
    /// Append to a list property instead of overwriting.
    pub accumulate: bool,
}

impl Default for AppendOptions {
    fn default() -> Self {
        Self {
            create_if_absent: true,
            accumulate: false,
        }
    }
}

impl AppendOptions {
    /// Options that append to a list property.
    #[must_use]
    pub fn accumulate() -> Self {
        Self {
            accumulate: true,
            ..Self::default()
        }
    }

    /// Options that refuse to declare new properties.
    #[must_use]
    pub fn existing_only() -> Self {
        Self {
            create_if_absent: false,
            ..Self::default()
        }
    }
}

/// A validated property write, ready to apply.
struct SlotWrite {
    declare: Option<ValueType>,
    value: PropertyValue,
    accumulate: bool,
}

impl PropertyGraph {
    /// Creates a vertex carrying `identity_value`, without any existence
    /// check and without registering it in the identity index.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the vertex identity property is not set,
    /// [`Error::Type`] if the value does not fit its type.
    pub fn create_vertex(&mut self, identity_value: impl Into<PropertyValue>) -> Result<VertexId> {
        let (property, value) = self.identity_slot(ObjectKind::Vertex, identity_value.into())?;
        self.insert_vertex(&property, value)
    }

    /// Returns the vertex registered for `identity_value`, creating and
    /// registering it on a miss.
    ///
    /// The boolean is `true` when the vertex already existed.
    ///
    /// # Errors
    ///
    /// As [`create_vertex`](Self::create_vertex).
    pub fn get_or_create_vertex(
        &mut self,
        identity_value: impl Into<PropertyValue>,
    ) -> Result<(VertexId, bool)> {
        let (property, key) = self.identity_slot(ObjectKind::Vertex, identity_value.into())?;
        if let Some(vertex) = self.index.lookup(&key) {
            return Ok((vertex, true));
        }
        let vertex = self.insert_vertex(&property, key.clone())?;
        self.index.register(key, vertex)?;
        tracing::trace!(vertex = vertex.index(), "Registered new vertex");
        Ok((vertex, false))
    }

    /// Adds an edge `source -> target` without any existence check.
    ///
    /// A truthy `identity_value` is stored in the edge identity property;
    /// `None` or a falsy value leaves it unset.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a dead endpoint, [`Error::Config`] if a value
    /// is given but no edge identity property is set.
    pub fn create_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        identity_value: Option<PropertyValue>,
    ) -> Result<EdgeId> {
        let identity = self.edge_identity_slot(identity_value)?;
        self.insert_edge(source, target, identity)
    }

    /// Finds the edge between two vertices, optionally requiring a given
    /// identity value.
    ///
    /// Endpoints given as identity values are resolved with
    /// [`get_vertex`](Self::get_vertex); an unresolved endpoint means no edge.
    ///
    /// Only one edge between the pair is consulted. When parallel edges
    /// exist, the store decides which one, and a filter that matches a
    /// *different* parallel edge reports nothing.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a key endpoint or a truthy filter is used while
    /// the corresponding identity property is not set.
    pub fn get_edge(
        &self,
        source: impl Into<VertexRef>,
        target: impl Into<VertexRef>,
        identity_value: Option<&PropertyValue>,
    ) -> Result<Option<EdgeId>> {
        let Some(source) = self.resolve(&source.into())? else {
            return Ok(None);
        };
        let Some(target) = self.resolve(&target.into())? else {
            return Ok(None);
        };
        let Some(edge) = self.store.find_edge(source, target) else {
            return Ok(None);
        };
        match identity_value.filter(|value| value.is_truthy()) {
            None => Ok(Some(edge)),
            Some(wanted) => {
                let property = self.identity.require(ObjectKind::Edge)?;
                let Some(map) = self.store.property_map(ObjectKind::Edge, property) else {
                    return Ok(None);
                };
                // a filter that cannot be stored in the slot cannot match it
                let Ok(wanted) = map.value_type().coerce(wanted.clone()) else {
                    return Ok(None);
                };
                Ok((map.get_or_default(edge.index()) == wanted).then_some(edge))
            }
        }
    }

    /// Returns the matching edge from [`get_edge`](Self::get_edge), or
    /// creates one.
    ///
    /// # Errors
    ///
    /// As [`create_edge`](Self::create_edge).
    pub fn create_edge_if_not_exists(
        &mut self,
        source: VertexId,
        target: VertexId,
        identity_value: Option<PropertyValue>,
    ) -> Result<EdgeId> {
        let identity = self.edge_identity_slot(identity_value)?;
        self.find_or_insert_edge(source, target, identity)
    }

    /// Records the relation `source_key -> target_key`, creating endpoint
    /// vertices as needed.
    ///
    /// If both endpoints already existed, an equivalent edge is reused when
    /// present. If either endpoint is new the edge is added without looking:
    /// endpoints are registered before any edge is attached to them, so a
    /// vertex created by this call cannot have a matching edge yet.
    ///
    /// # Errors
    ///
    /// As [`get_or_create_vertex`](Self::get_or_create_vertex) and
    /// [`create_edge`](Self::create_edge). Errors are detected before either
    /// endpoint is created.
    pub fn create_relation(
        &mut self,
        source_key: impl Into<PropertyValue>,
        target_key: impl Into<PropertyValue>,
        edge_identity_value: Option<PropertyValue>,
    ) -> Result<EdgeId> {
        let identity = self.edge_identity_slot(edge_identity_value)?;
        let (_, source_key) = self.identity_slot(ObjectKind::Vertex, source_key.into())?;
        let (_, target_key) = self.identity_slot(ObjectKind::Vertex, target_key.into())?;

        let (source, source_existed) = self.get_or_create_vertex(source_key)?;
        let (target, target_existed) = self.get_or_create_vertex(target_key)?;
        if source_existed && target_existed {
            self.find_or_insert_edge(source, target, identity)
        } else {
            self.insert_edge(source, target, identity)
        }
    }

    /// Checks for an edge between two vertex handles whose identity value is
    /// any of `candidates`.
    ///
    /// `None` or an empty list matches any edge. With `directed = false` the
    /// reverse direction is checked as well.
    ///
    /// # Errors
    ///
    /// [`Error::Type`] if an endpoint is given as an identity value rather
    /// than a handle.
    pub fn has_edge(
        &self,
        source: impl Into<VertexRef>,
        target: impl Into<VertexRef>,
        candidates: Option<&[PropertyValue]>,
        directed: bool,
    ) -> Result<bool> {
        let source = Self::expect_handle(source.into())?;
        let target = Self::expect_handle(target.into())?;
        let filters: Vec<Option<&PropertyValue>> = match candidates {
            Some(values) if !values.is_empty() => values.iter().map(Some).collect(),
            _ => vec![None],
        };
        for &filter in &filters {
            if self.get_edge(source, target, filter)?.is_some() {
                return Ok(true);
            }
        }
        if !directed {
            for &filter in &filters {
                if self.get_edge(target, source, filter)?.is_some() {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Sets a property on the vertex identified by `identity_value`,
    /// creating the vertex if needed.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the vertex identity property is not set
    /// - [`Error::Schema`] if `name` is undeclared and
    ///   `options.create_if_absent` is `false`, or `name` is the identity
    ///   property itself
    /// - [`Error::Type`] when accumulating into a scalar property or the
    ///   value does not fit the property type
    pub fn append_vertex_property(
        &mut self,
        identity_value: impl Into<PropertyValue>,
        name: &str,
        value: impl Into<PropertyValue>,
        options: AppendOptions,
    ) -> Result<VertexId> {
        let (_, key) = self.identity_slot(ObjectKind::Vertex, identity_value.into())?;
        let write = self.plan_write(ObjectKind::Vertex, name, value.into(), options)?;
        let (vertex, _) = self.get_or_create_vertex(key)?;
        self.apply_write(ObjectKind::Vertex, name, vertex.index(), write)?;
        Ok(vertex)
    }

    /// Sets a property on the edge `source_key -> target_key`, creating
    /// vertices and the edge as needed.
    ///
    /// The edge is resolved with [`get_edge`](Self::get_edge) without an
    /// identity filter.
    ///
    /// # Errors
    ///
    /// As [`append_vertex_property`](Self::append_vertex_property). A failed
    /// call creates neither vertices nor edges.
    pub fn append_edge_property(
        &mut self,
        source_key: impl Into<PropertyValue>,
        target_key: impl Into<PropertyValue>,
        name: &str,
        value: impl Into<PropertyValue>,
        options: AppendOptions,
    ) -> Result<EdgeId> {
        let (_, source_key) = self.identity_slot(ObjectKind::Vertex, source_key.into())?;
        let (_, target_key) = self.identity_slot(ObjectKind::Vertex, target_key.into())?;
        let write = self.plan_write(ObjectKind::Edge, name, value.into(), options)?;
        let (source, _) = self.get_or_create_vertex(source_key)?;
        let (target, _) = self.get_or_create_vertex(target_key)?;
        let edge = self.find_or_insert_edge(source, target, None)?;
        self.apply_write(ObjectKind::Edge, name, edge.index(), write)?;
        Ok(edge)
    }

    /// Sets a property on an existing vertex.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a dead handle, otherwise as
    /// [`append_vertex_property`](Self::append_vertex_property).
    pub fn set_vertex_property(
        &mut self,
        vertex: VertexId,
        name: &str,
        value: impl Into<PropertyValue>,
        options: AppendOptions,
    ) -> Result<()> {
        if !self.store.contains_vertex(vertex) {
            return Err(Error::NotFound(format!("vertex {}", vertex.index())));
        }
        let write = self.plan_write(ObjectKind::Vertex, name, value.into(), options)?;
        self.apply_write(ObjectKind::Vertex, name, vertex.index(), write)
    }

    /// Sets a property on an existing edge.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a dead handle, otherwise as
    /// [`append_edge_property`](Self::append_edge_property).
    pub fn set_edge_property(
        &mut self,
        edge: EdgeId,
        name: &str,
        value: impl Into<PropertyValue>,
        options: AppendOptions,
    ) -> Result<()> {
        if !self.store.contains_edge(edge) {
            return Err(Error::NotFound(format!("edge {}", edge.index())));
        }
        let write = self.plan_write(ObjectKind::Edge, name, value.into(), options)?;
        self.apply_write(ObjectKind::Edge, name, edge.index(), write)
    }

    /// The configured identity property of `kind` and `value` coerced to it.
    fn identity_slot(&self, kind: ObjectKind, value: PropertyValue) -> Result<(String, PropertyValue)> {
        let property = self.identity.require(kind)?;
        let value_type = self
            .store
            .property_map(kind, property)
            .map(|map| map.value_type())
            .ok_or_else(|| Error::Config(format!("{kind} identity property '{property}' vanished")))?;
        Ok((property.to_string(), value_type.coerce(value)?))
    }

    fn edge_identity_slot(&self, value: Option<PropertyValue>) -> Result<Option<(String, PropertyValue)>> {
        match value {
            Some(value) if value.is_truthy() => {
                self.identity_slot(ObjectKind::Edge, value).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn insert_vertex(&mut self, property: &str, value: PropertyValue) -> Result<VertexId> {
        let vertex = self.store.add_vertex();
        self.store
            .set_value(ObjectKind::Vertex, property, vertex.index(), value)?;
        Ok(vertex)
    }

    fn insert_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        identity: Option<(String, PropertyValue)>,
    ) -> Result<EdgeId> {
        let edge = self.store.add_edge(source, target)?;
        if let Some((property, value)) = identity {
            self.store
                .set_value(ObjectKind::Edge, &property, edge.index(), value)?;
        }
        Ok(edge)
    }

    fn find_or_insert_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        identity: Option<(String, PropertyValue)>,
    ) -> Result<EdgeId> {
        let filter = identity.as_ref().map(|(_, value)| value);
        if let Some(edge) = self.get_edge(source, target, filter)? {
            return Ok(edge);
        }
        self.insert_edge(source, target, identity)
    }

    fn expect_handle(vertex: VertexRef) -> Result<VertexId> {
        match vertex {
            VertexRef::Handle(v) => Ok(v),
            VertexRef::Key(key) => Err(Error::Type(format!(
                "expected a vertex handle, got identity value '{key}'"
            ))),
        }
    }

    /// Validates a property write without touching the store.
    fn plan_write(
        &self,
        kind: ObjectKind,
        name: &str,
        value: PropertyValue,
        options: AppendOptions,
    ) -> Result<SlotWrite> {
        schema::check_name(kind, name)?;
        if kind == ObjectKind::Vertex && self.identity.get(kind) == Some(name) {
            return Err(Error::Schema(format!(
                "'{name}' is the vertex identity property; use get_or_create_vertex to key vertices"
            )));
        }
        let (value_type, declare) = match self.store.property_map(kind, name) {
            Some(map) => (map.value_type(), None),
            None if options.create_if_absent => {
                let lazy = if options.accumulate {
                    ValueType::STRING_LIST
                } else {
                    ValueType::STRING
                };
                (lazy, Some(lazy))
            }
            None => {
                return Err(Error::Schema(format!(
                    "{kind} property '{name}' is not declared"
                )));
            }
        };
        let value = if options.accumulate {
            value_type.coerce_element(value)?
        } else {
            value_type.coerce(value)?
        };
        Ok(SlotWrite {
            declare,
            value,
            accumulate: options.accumulate,
        })
    }

    fn apply_write(&mut self, kind: ObjectKind, name: &str, index: usize, write: SlotWrite) -> Result<()> {
        if let Some(value_type) = write.declare {
            schema::lazy_declare_if_absent(&mut self.store, kind, name, value_type)?;
        }
        if write.accumulate {
            self.store.push_value(kind, name, index, write.value)
        } else {
            self.store.set_value(kind, name, index, write.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        graph
            .init_graph(
                [("uri", ValueType::STRING), ("label", ValueType::STRING)],
                [("uri", ValueType::STRING), ("label", ValueType::STRING)],
            )
            .unwrap();
        graph.set_vertex_identity_property("uri").unwrap();
        graph.set_edge_identity_property("uri").unwrap();
        graph
    }

    #[test]
    fn test_create_vertex_skips_index() {
        let mut g = graph();
        let a = g.create_vertex("a").unwrap();
        let b = g.create_vertex("a").unwrap();
        assert_ne!(a, b);
        assert!(g.identity_index().is_empty());
        // found by the scan fallback, first in vertex order
        assert_eq!(g.get_vertex(&"a".into()).unwrap(), Some(a));
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut g = graph();
        let (a, existed) = g.get_or_create_vertex("a").unwrap();
        assert!(!existed);
        let (again, existed) = g.get_or_create_vertex("a").unwrap();
        assert!(existed);
        assert_eq!(a, again);
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_mutation_requires_identity() {
        let mut g = PropertyGraph::new();
        g.init_graph([("uri", ValueType::STRING)], [("uri", ValueType::STRING)])
            .unwrap();
        assert!(matches!(g.create_vertex("a"), Err(Error::Config(_))));
        assert!(g.is_empty());
    }

    #[test]
    fn test_identity_value_type_checked_before_creation() {
        let mut g = graph();
        let err = g.create_vertex(3_i64).unwrap_err();
        assert!(matches!(err, Error::Type(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn test_create_edge_falsy_value_leaves_identity_unset() {
        let mut g = graph();
        let a = g.create_vertex("a").unwrap();
        let b = g.create_vertex("b").unwrap();
        let e = g.create_edge(a, b, Some("".into())).unwrap();
        assert_eq!(g.store().value(ObjectKind::Edge, "uri", e.index()), None);
    }

    #[test]
    fn test_create_edge_without_edge_identity() {
        let mut g = PropertyGraph::new();
        g.init_graph([("uri", ValueType::STRING)], Vec::<(String, ValueType)>::new())
            .unwrap();
        g.set_vertex_identity_property("uri").unwrap();
        let a = g.create_vertex("a").unwrap();

        g.create_edge(a, a, None).unwrap();
        let err = g.create_edge(a, a, Some("e".into())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_get_edge_filters_by_identity() {
        let mut g = graph();
        g.create_relation("a", "b", Some("e1".into())).unwrap();

        assert!(g.get_edge("a", "b", None).unwrap().is_some());
        assert!(g.get_edge("a", "b", Some(&"e1".into())).unwrap().is_some());
        assert!(g.get_edge("a", "b", Some(&"e2".into())).unwrap().is_none());
        // a falsy filter behaves like no filter
        assert!(g.get_edge("a", "b", Some(&"".into())).unwrap().is_some());
        assert!(g.get_edge("a", "zzz", None).unwrap().is_none());
        assert!(g.get_edge("b", "a", None).unwrap().is_none());
    }

    #[test]
    fn test_create_edge_if_not_exists() {
        let mut g = graph();
        let (a, _) = g.get_or_create_vertex("a").unwrap();
        let (b, _) = g.get_or_create_vertex("b").unwrap();

        let e1 = g.create_edge_if_not_exists(a, b, Some("e".into())).unwrap();
        let e2 = g.create_edge_if_not_exists(a, b, Some("e".into())).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(g.edge_count(), 1);

        g.create_edge_if_not_exists(a, b, Some("other".into())).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_create_relation_reuses_edges_between_known_vertices() {
        let mut g = graph();
        g.create_relation("a", "b", Some("e".into())).unwrap();
        g.create_relation("a", "b", Some("e".into())).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_create_relation_with_new_endpoint_adds_edge() {
        let mut g = graph();
        g.create_relation("a", "b", None).unwrap();
        g.create_relation("a", "c", None).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_create_relation_fails_before_creating_vertices() {
        let mut g = PropertyGraph::new();
        g.init_graph([("uri", ValueType::STRING)], [("uri", ValueType::STRING)])
            .unwrap();
        g.set_vertex_identity_property("uri").unwrap();

        let err = g.create_relation("a", "b", Some("e".into())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn test_has_edge_rejects_keys() {
        let mut g = graph();
        let (a, _) = g.get_or_create_vertex("a").unwrap();
        let err = g.has_edge("a", a, None, true).unwrap_err();
        assert!(matches!(err, Error::Type(_)));
    }

    #[test]
    fn test_has_edge_candidates() {
        let mut g = graph();
        g.create_relation("a", "b", Some("e1".into())).unwrap();
        let a = g.get_vertex(&"a".into()).unwrap().unwrap();
        let b = g.get_vertex(&"b".into()).unwrap().unwrap();

        let hit: [PropertyValue; 2] = ["x".into(), "e1".into()];
        let miss: [PropertyValue; 1] = ["x".into()];
        let none: &[PropertyValue] = &[];
        assert!(g.has_edge(a, b, Some(&hit[..]), true).unwrap());
        assert!(!g.has_edge(a, b, Some(&miss[..]), true).unwrap());
        assert!(g.has_edge(a, b, Some(none), true).unwrap());
        assert!(g.has_edge(b.index(), a.index(), Some(&hit[..]), false).unwrap());
        assert!(!g.has_edge(b, a, Some(&hit[..]), true).unwrap());
    }

    #[test]
    fn test_append_vertex_property_overwrites() {
        let mut g = graph();
        let v = g
            .append_vertex_property("a", "label", "x", AppendOptions::default())
            .unwrap();
        g.append_vertex_property("a", "label", "y", AppendOptions::default())
            .unwrap();
        assert_eq!(g.vertex_property(v, "label").unwrap(), "y".into());
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_append_lazily_declares() {
        let mut g = graph();
        let v = g
            .append_vertex_property("a", "comment", "hi", AppendOptions::default())
            .unwrap();
        assert_eq!(g.vertex_schema().get("comment"), Some(&ValueType::STRING));
        assert_eq!(g.vertex_property(v, "comment").unwrap(), "hi".into());
    }

    #[test]
    fn test_append_existing_only_rejects_undeclared() {
        let mut g = graph();
        let err = g
            .append_vertex_property("a", "comment", "hi", AppendOptions::existing_only())
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn test_accumulate() {
        let mut g = graph();
        let v = g
            .append_vertex_property("a", "tags", "t1", AppendOptions::accumulate())
            .unwrap();
        g.append_vertex_property("a", "tags", "t2", AppendOptions::accumulate())
            .unwrap();
        assert_eq!(g.vertex_schema().get("tags"), Some(&ValueType::STRING_LIST));
        assert_eq!(
            g.vertex_property(v, "tags").unwrap(),
            PropertyValue::from(vec!["t1", "t2"])
        );
    }

    #[test]
    fn test_accumulate_into_scalar_is_type_error() {
        let mut g = graph();
        let err = g
            .append_vertex_property("a", "label", "x", AppendOptions::accumulate())
            .unwrap_err();
        assert!(matches!(err, Error::Type(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn test_identity_property_cannot_be_assigned() {
        let mut g = graph();
        let err = g
            .append_vertex_property("a", "uri", "b", AppendOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_append_edge_property_creates_relation() {
        let mut g = graph();
        let e = g
            .append_edge_property("a", "b", "label", "knows", AppendOptions::default())
            .unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_property(e, "label").unwrap(), "knows".into());

        let again = g
            .append_edge_property("a", "b", "label", "likes", AppendOptions::default())
            .unwrap();
        assert_eq!(e, again);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_set_properties_on_handles() {
        let mut g = graph();
        let e = g.create_relation("a", "b", None).unwrap();
        let a = g.get_vertex(&"a".into()).unwrap().unwrap();

        g.set_vertex_property(a, "label", "A", AppendOptions::default())
            .unwrap();
        g.set_edge_property(e, "label", "rel", AppendOptions::default())
            .unwrap();
        assert_eq!(g.vertex_property(a, "label").unwrap(), "A".into());
        assert_eq!(g.edge_property(e, "label").unwrap(), "rel".into());

        let err = g
            .set_vertex_property(VertexId::new(50), "label", "x", AppendOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
