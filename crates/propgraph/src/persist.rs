//! JSONL persistence for property graphs.
//!
//! A graph file is a sequence of JSON records, one per line, each tagged
//! with a `record` field:
//!
//! ```text
//! {"record":"header","version":1,"vertex_identity":"uri","edge_identity":"uri"}
//! {"record":"property","kind":"vertex","name":"uri","value_type":"string"}
//! {"record":"vertex","id":0,"properties":{"uri":"a"}}
//! {"record":"edge","source":0,"target":1,"properties":{}}
//! ```
//!
//! Vertex `id`s are ordinals local to the file; edges refer to them. Only
//! explicitly written property values are stored, so unset slots stay unset
//! after a round trip.

use crate::error::{Error, Result};
use crate::graph::PropertyGraph;
use crate::store::{GraphStore, ObjectKind, VertexId};
use crate::value::{PropertyValue, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Version written to the header record.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "lowercase")]
enum Record {
    Header {
        version: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vertex_identity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        edge_identity: Option<String>,
    },
    Property {
        kind: ObjectKind,
        name: String,
        value_type: ValueType,
    },
    Vertex {
        id: usize,
        #[serde(default)]
        properties: BTreeMap<String, PropertyValue>,
    },
    Edge {
        source: usize,
        target: usize,
        #[serde(default)]
        properties: BTreeMap<String, PropertyValue>,
    },
}

/// Non-fatal problems found while loading a graph file.
///
/// The offending line (or part of it) is skipped and loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line could not be parsed as a record
    MalformedJson { line_number: usize, error: String },

    /// Property declaration rejected (empty name or conflicting type)
    InvalidProperty { line_number: usize, error: String },

    /// A property value was undeclared or did not fit the declared type
    ///
    /// **Effect**: only that value is skipped; the object is still loaded.
    InvalidValue {
        line_number: usize,
        property: String,
        error: String,
    },

    /// A vertex record reused an id seen earlier in the file
    DuplicateVertex { line_number: usize, id: usize },

    /// An edge references a vertex id that does not exist in the file
    OrphanedEdge {
        line_number: usize,
        source: usize,
        target: usize,
    },

    /// Two vertices carry the same identity value
    ///
    /// **Effect**: both vertices are loaded; the identity index keeps the
    /// first one.
    DuplicateIdentity { line_number: usize, value: String },

    /// The header names an identity property that is not declared
    ///
    /// **Effect**: the identity is left unset.
    UnknownIdentity { property: String, error: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed record: {error}")
            }
            Self::InvalidProperty { line_number, error } => {
                write!(f, "line {line_number}: invalid property: {error}")
            }
            Self::InvalidValue {
                line_number,
                property,
                error,
            } => write!(f, "line {line_number}: skipped value of '{property}': {error}"),
            Self::DuplicateVertex { line_number, id } => {
                write!(f, "line {line_number}: duplicate vertex id {id}")
            }
            Self::OrphanedEdge {
                line_number,
                source,
                target,
            } => write!(f, "line {line_number}: edge {source} -> {target} has a missing endpoint"),
            Self::DuplicateIdentity { line_number, value } => {
                write!(f, "line {line_number}: identity value '{value}' already used")
            }
            Self::UnknownIdentity { property, error } => {
                write!(f, "identity property '{property}' ignored: {error}")
            }
        }
    }
}

/// Saves `graph` to `path`.
///
/// The write is atomic: records go to a temporary file next to `path`, which
/// is then renamed over it. If writing fails, an existing file is left
/// unchanged.
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Json`] if writing fails.
pub fn save_jsonl(graph: &PropertyGraph, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&temp_path)?);
    let store = graph.store();

    write_record(
        &mut writer,
        &Record::Header {
            version: FORMAT_VERSION,
            vertex_identity: graph.vertex_identity_property().map(str::to_string),
            edge_identity: graph.edge_identity_property().map(str::to_string),
        },
    )?;

    for kind in [ObjectKind::Vertex, ObjectKind::Edge] {
        for (name, map) in store.property_maps(kind) {
            write_record(
                &mut writer,
                &Record::Property {
                    kind,
                    name: name.clone(),
                    value_type: map.value_type(),
                },
            )?;
        }
    }

    let mut ordinals: HashMap<VertexId, usize> = HashMap::with_capacity(store.vertex_count());
    for (id, vertex) in store.vertices().enumerate() {
        ordinals.insert(vertex, id);
        write_record(
            &mut writer,
            &Record::Vertex {
                id,
                properties: explicit_values(store, ObjectKind::Vertex, vertex.index()),
            },
        )?;
    }

    for (edge, source, target) in store.edges() {
        write_record(
            &mut writer,
            &Record::Edge {
                source: ordinals[&source],
                target: ordinals[&target],
                properties: explicit_values(store, ObjectKind::Edge, edge.index()),
            },
        )?;
    }

    writer.flush()?;
    drop(writer);
    std::fs::rename(&temp_path, path)?;

    tracing::debug!(
        path = %path.display(),
        vertices = store.vertex_count(),
        edges = store.edge_count(),
        "Saved graph"
    );
    Ok(())
}

/// Loads a graph from `path`.
///
/// Loading is resilient: problems with individual records are collected as
/// [`LoadWarning`]s instead of failing the load. Records may appear in any
/// order. The identity index is rebuilt from the loaded identity values.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn load_jsonl(path: &Path) -> Result<(PropertyGraph, Vec<LoadWarning>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut warnings = Vec::new();

    // First pass: parse every line
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(&line) {
            Ok(record) => records.push((line_number, record)),
            Err(e) => warnings.push(LoadWarning::MalformedJson {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    // Second pass: header and schema
    let mut store = GraphStore::new();
    let mut identities: (Option<String>, Option<String>) = (None, None);
    for (line_number, record) in &records {
        match record {
            Record::Header {
                version,
                vertex_identity,
                edge_identity,
            } => {
                if *version != FORMAT_VERSION {
                    tracing::warn!(version, expected = FORMAT_VERSION, "Unexpected graph file version");
                }
                identities = (vertex_identity.clone(), edge_identity.clone());
            }
            Record::Property {
                kind,
                name,
                value_type,
            } => {
                if let Err(e) = crate::schema::declare(&mut store, *kind, name, *value_type) {
                    warnings.push(LoadWarning::InvalidProperty {
                        line_number: *line_number,
                        error: e.to_string(),
                    });
                }
            }
            Record::Vertex { .. } | Record::Edge { .. } => {}
        }
    }

    // Third pass: vertices
    let mut vertices: HashMap<usize, VertexId> = HashMap::new();
    let mut seen_identity: HashMap<PropertyValue, usize> = HashMap::new();
    for (line_number, record) in &records {
        let Record::Vertex { id, properties } = record else {
            continue;
        };
        if vertices.contains_key(id) {
            warnings.push(LoadWarning::DuplicateVertex {
                line_number: *line_number,
                id: *id,
            });
            continue;
        }
        let vertex = store.add_vertex();
        vertices.insert(*id, vertex);
        load_values(&mut store, ObjectKind::Vertex, vertex.index(), properties, *line_number, &mut warnings);

        if let Some(key) = identities
            .0
            .as_deref()
            .and_then(|name| store.value(ObjectKind::Vertex, name, vertex.index()))
        {
            if seen_identity.contains_key(key) {
                warnings.push(LoadWarning::DuplicateIdentity {
                    line_number: *line_number,
                    value: key.to_string(),
                });
            } else {
                seen_identity.insert(key.clone(), *line_number);
            }
        }
    }

    // Fourth pass: edges
    for (line_number, record) in &records {
        let Record::Edge {
            source,
            target,
            properties,
        } = record
        else {
            continue;
        };
        let (Some(&from), Some(&to)) = (vertices.get(source), vertices.get(target)) else {
            warnings.push(LoadWarning::OrphanedEdge {
                line_number: *line_number,
                source: *source,
                target: *target,
            });
            continue;
        };
        let edge = store.add_edge(from, to)?;
        load_values(&mut store, ObjectKind::Edge, edge.index(), properties, *line_number, &mut warnings);
    }

    let vertex_identity = checked_identity(&store, ObjectKind::Vertex, identities.0, &mut warnings);
    let edge_identity = checked_identity(&store, ObjectKind::Edge, identities.1, &mut warnings);
    let graph = PropertyGraph::from_parts(store, vertex_identity.as_deref(), edge_identity.as_deref())?;

    tracing::info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        warnings = warnings.len(),
        "Loaded graph"
    );
    Ok((graph, warnings))
}

fn write_record<W: Write>(writer: &mut W, record: &Record) -> Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn explicit_values(store: &GraphStore, kind: ObjectKind, index: usize) -> BTreeMap<String, PropertyValue> {
    store
        .property_maps(kind)
        .iter()
        .filter_map(|(name, map)| map.get(index).map(|value| (name.clone(), value.clone())))
        .collect()
}

fn load_values(
    store: &mut GraphStore,
    kind: ObjectKind,
    index: usize,
    properties: &BTreeMap<String, PropertyValue>,
    line_number: usize,
    warnings: &mut Vec<LoadWarning>,
) {
    for (name, value) in properties {
        if let Err(e) = store.set_value(kind, name, index, value.clone()) {
            warnings.push(LoadWarning::InvalidValue {
                line_number,
                property: name.clone(),
                error: e.to_string(),
            });
        }
    }
}

/// Keeps an identity name from the header only if it is declared.
fn checked_identity(
    store: &GraphStore,
    kind: ObjectKind,
    name: Option<String>,
    warnings: &mut Vec<LoadWarning>,
) -> Option<String> {
    let name = name.filter(|name| !name.is_empty())?;
    if store.property_map(kind, &name).is_some() {
        return Some(name);
    }
    warnings.push(LoadWarning::UnknownIdentity {
        error: Error::Config(format!("{kind} property '{name}' not known")).to_string(),
        property: name,
    });
    None
}
