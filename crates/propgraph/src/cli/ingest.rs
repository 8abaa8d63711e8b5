//! Relation-file ingestion for the `ingest` command.

use crate::builder::AppendOptions;
use crate::graph::PropertyGraph;
use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;

#[derive(Debug, Deserialize)]
#[serde(tag = "record", rename_all = "lowercase")]
enum InputRecord {
    Relation {
        source: PropertyValue,
        target: PropertyValue,
        #[serde(default)]
        edge: Option<PropertyValue>,
        #[serde(default)]
        properties: BTreeMap<String, PropertyValue>,
    },
    Vertex {
        key: PropertyValue,
        #[serde(default)]
        properties: BTreeMap<String, PropertyValue>,
        /// Append values to list properties instead of overwriting.
        #[serde(default)]
        accumulate: bool,
    },
}

/// A line of the input that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    /// Why it was skipped
    pub reason: String,
}

/// Counts from one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Relation records applied
    pub relations: usize,
    /// Vertex records applied
    pub vertices: usize,
    /// Lines that were malformed or rejected by the graph
    pub skipped: Vec<SkippedLine>,
}

/// Applies every record from `reader` to `graph`.
///
/// A line that fails to parse, or whose first operation is rejected, leaves
/// the graph untouched. Property values applied before a later rejection in
/// the same record are kept.
///
/// # Errors
///
/// Only read failures are returned; bad lines end up in
/// [`IngestSummary::skipped`].
pub fn ingest<R: BufRead>(graph: &mut PropertyGraph, reader: R) -> std::io::Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = serde_json::from_str::<InputRecord>(&line)
            .map_err(|e| e.to_string())
            .and_then(|record| apply(graph, record, &mut summary).map_err(|e| e.to_string()));
        if let Err(reason) = outcome {
            tracing::warn!(line_number, %reason, "Skipping input line");
            summary.skipped.push(SkippedLine {
                line_number,
                reason,
            });
        }
    }
    tracing::info!(
        relations = summary.relations,
        vertices = summary.vertices,
        skipped = summary.skipped.len(),
        "Ingestion finished"
    );
    Ok(summary)
}

fn apply(graph: &mut PropertyGraph, record: InputRecord, summary: &mut IngestSummary) -> crate::Result<()> {
    match record {
        InputRecord::Relation {
            source,
            target,
            edge,
            properties,
        } => {
            let edge = graph.create_relation(source, target, edge)?;
            for (name, value) in properties {
                graph.set_edge_property(edge, &name, value, AppendOptions::default())?;
            }
            summary.relations += 1;
        }
        InputRecord::Vertex {
            key,
            properties,
            accumulate,
        } => {
            let (vertex, _) = graph.get_or_create_vertex(key)?;
            let options = if accumulate {
                AppendOptions::accumulate()
            } else {
                AppendOptions::default()
            };
            for (name, value) in properties {
                match value {
                    PropertyValue::List(items) if accumulate => {
                        for item in items {
                            graph.set_vertex_property(vertex, &name, item, options)?;
                        }
                    }
                    value => graph.set_vertex_property(vertex, &name, value, options)?,
                }
            }
            summary.vertices += 1;
        }
    }
    Ok(())
}
