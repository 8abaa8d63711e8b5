//! Propgraph - a property graph with identity-keyed vertices.
//!
//! A [`PropertyGraph`] layers three things over a petgraph-backed store:
//! a typed property schema, designated identity properties that act as
//! external keys, and an identity index that makes "get or create this
//! vertex" a hash lookup.
//!
//! ```
//! use propgraph::{AppendOptions, PropertyGraph, ValueType};
//!
//! # fn main() -> propgraph::Result<()> {
//! let mut graph = PropertyGraph::new();
//! graph.init_graph(
//!     [("uri", ValueType::STRING), ("label", ValueType::STRING)],
//!     [("uri", ValueType::STRING)],
//! )?;
//! graph.set_vertex_identity_property("uri")?;
//! graph.set_edge_identity_property("uri")?;
//!
//! graph.create_relation("a", "b", Some("a->b".into()))?;
//! graph.create_relation("a", "b", Some("a->b".into()))?;
//! graph.append_vertex_property("a", "label", "start", AppendOptions::default())?;
//!
//! assert_eq!(graph.vertex_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod identity;
pub mod persist;
pub mod schema;
pub mod store;
pub mod value;

// CLI support (needed by binary)
pub mod cli;
pub mod output;

pub use analyzer::GraphStats;
pub use builder::AppendOptions;
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{PropertyGraph, VertexRef};
pub use schema::Declaration;
pub use store::{ComponentLabels, EdgeId, GraphStore, ObjectKind, VertexId};
pub use value::{PropertyValue, ScalarType, ValueType};
