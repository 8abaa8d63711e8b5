//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use propgraph::{PropertyGraph, ValueType};
use std::path::Path;
use std::process::{Command, Output};

/// A graph with `uri` and `label` string properties on both kinds and `uri`
/// as the identity of both.
pub fn uri_label_graph() -> PropertyGraph {
    let mut graph = PropertyGraph::new();
    graph
        .init_graph(
            [("uri", ValueType::STRING), ("label", ValueType::STRING)],
            [("uri", ValueType::STRING), ("label", ValueType::STRING)],
        )
        .expect("schema should be accepted");
    graph
        .set_vertex_identity_property("uri")
        .expect("uri is declared");
    graph
        .set_edge_identity_property("uri")
        .expect("uri is declared");
    graph
}

/// Run the propgraph binary in the specified directory
pub fn run_propgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_propgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute propgraph binary")
}
