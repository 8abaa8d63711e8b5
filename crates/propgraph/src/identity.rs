//! Identity configuration and the vertex identity index.
//!
//! One declared vertex property (and optionally one edge property) serves as
//! the external key for its object kind. [`IdentityIndex`] maps vertex key
//! values to handles so the get-or-create path never scans the store.
//!
//! Only vertices created through get-or-create are registered. Vertices made
//! with plain `create_vertex` are invisible here and can only be found by the
//! slower property scan in [`PropertyGraph::get_vertex`](crate::PropertyGraph::get_vertex).

use crate::error::{Error, Result};
use crate::store::{GraphStore, ObjectKind, VertexId};
use crate::value::PropertyValue;
use std::collections::{HashMap, HashSet};

/// Names of the identity properties for vertices and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    vertex: Option<String>,
    edge: Option<String>,
}

impl IdentityConfig {
    /// Identity property for `kind`, if configured.
    #[must_use]
    pub fn get(&self, kind: ObjectKind) -> Option<&str> {
        match kind {
            ObjectKind::Vertex => self.vertex.as_deref(),
            ObjectKind::Edge => self.edge.as_deref(),
        }
    }

    /// Like [`get`](Self::get), but a missing setting is a
    /// [`Error::Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no identity property is set for `kind`.
    pub fn require(&self, kind: ObjectKind) -> Result<&str> {
        self.get(kind).ok_or_else(|| {
            Error::Config(format!("{kind} identity property is not set"))
        })
    }

    /// Designates `name` as the identity property of `kind`.
    ///
    /// The property must already be declared on `store`.
    pub(crate) fn set(&mut self, store: &GraphStore, kind: ObjectKind, name: &str) -> Result<()> {
        let declared = store.property_maps(kind);
        if declared.is_empty() {
            return Err(Error::Config(format!(
                "{kind} properties are not initialised"
            )));
        }
        if !declared.contains_key(name) {
            return Err(Error::Config(format!("{kind} property '{name}' not known")));
        }
        let slot = match kind {
            ObjectKind::Vertex => &mut self.vertex,
            ObjectKind::Edge => &mut self.edge,
        };
        *slot = Some(name.to_string());
        tracing::debug!(%kind, name, "Identity property set");
        Ok(())
    }
}

/// Hash index from vertex identity values to vertex handles.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    by_key: HashMap<PropertyValue, VertexId>,
}

impl IdentityIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `key`. Never falls back to scanning the store.
    #[must_use]
    pub fn lookup(&self, key: &PropertyValue) -> Option<VertexId> {
        self.by_key.get(key).copied()
    }

    /// Binds `key` to `vertex`.
    ///
    /// Registering the same pair twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Consistency`] if `key` is bound to a different vertex.
    pub fn register(&mut self, key: PropertyValue, vertex: VertexId) -> Result<()> {
        match self.by_key.get(&key) {
            Some(&existing) if existing == vertex => Ok(()),
            Some(&existing) => Err(Error::Consistency {
                key: key.to_string(),
                existing: existing.index(),
                attempted: vertex.index(),
            }),
            None => {
                self.by_key.insert(key, vertex);
                Ok(())
            }
        }
    }

    /// Drops every entry that points at one of `vertices`.
    pub fn forget(&mut self, vertices: &[VertexId]) {
        if vertices.is_empty() {
            return;
        }
        let gone: HashSet<VertexId> = vertices.iter().copied().collect();
        self.by_key.retain(|_, vertex| !gone.contains(vertex));
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Rebuilds an index from the identity values already in `store`.
    ///
    /// Only slots that were never written are skipped; falsy keys such as
    /// `""` or `0` are indexed like any other. When several vertices share a
    /// value, the first one in vertex order wins and the others are logged.
    pub(crate) fn rebuild(store: &GraphStore, property: &str) -> Self {
        let mut index = Self::new();
        let Some(map) = store.property_map(ObjectKind::Vertex, property) else {
            return index;
        };
        for vertex in store.vertices() {
            let Some(value) = map.get(vertex.index()) else {
                continue;
            };
            if let Err(e) = index.register(value.clone(), vertex) {
                tracing::warn!(error = %e, "Duplicate identity value left out of index");
            }
        }
        index
    }
}
