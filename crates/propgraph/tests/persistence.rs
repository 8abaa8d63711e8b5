//! Integration tests for saving and loading graph files.

use propgraph::persist::{load_jsonl, save_jsonl, LoadWarning};
use propgraph::{AppendOptions, GraphConfig, PropertyGraph, PropertyValue, ScalarType, ValueType};
use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::uri_label_graph;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn populated() -> PropertyGraph {
    let mut graph = uri_label_graph();
    graph.create_relation("a", "b", Some("ab".into())).unwrap();
    graph.create_relation("b", "c", None).unwrap();
    graph.get_or_create_vertex("lonely").unwrap();
    graph
        .append_vertex_property("a", "tags", "t1", AppendOptions::accumulate())
        .unwrap();
    graph
        .append_vertex_property("a", "tags", "t2", AppendOptions::accumulate())
        .unwrap();
    graph
        .append_edge_property("b", "c", "label", "next", AppendOptions::default())
        .unwrap();
    graph
}

#[rstest]
fn test_round_trip_preserves_graph(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    let original = populated();
    save_jsonl(&original, &path).unwrap();

    let (loaded, warnings) = load_jsonl(&path).unwrap();
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(loaded.vertex_count(), original.vertex_count());
    assert_eq!(loaded.edge_count(), original.edge_count());
    assert_eq!(loaded.vertex_schema(), original.vertex_schema());
    assert_eq!(loaded.edge_schema(), original.edge_schema());
    assert_eq!(loaded.stats(), original.stats());

    let a = loaded.require_vertex(&"a".into()).unwrap();
    assert_eq!(
        loaded.vertex_property(a, "tags").unwrap(),
        PropertyValue::from(vec!["t1", "t2"])
    );
    let e = loaded.get_edge("b", "c", None).unwrap().unwrap();
    assert_eq!(loaded.edge_property(e, "label").unwrap(), "next".into());
}

#[rstest]
fn test_loaded_graph_keeps_ingesting(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    save_jsonl(&populated(), &path).unwrap();

    let (mut graph, _) = load_jsonl(&path).unwrap();
    let (_, existed) = graph.get_or_create_vertex("a").unwrap();
    assert!(existed);

    graph.create_relation("a", "b", Some("ab".into())).unwrap();
    assert_eq!(graph.edge_count(), 2);
}

#[rstest]
fn test_pruned_graph_round_trip(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    let mut graph = populated();
    graph.remove_dangling_vertices();
    save_jsonl(&graph, &path).unwrap();

    let (loaded, warnings) = load_jsonl(&path).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(loaded.vertex_count(), 3);
    assert!(loaded.get_vertex(&"lonely".into()).unwrap().is_none());
}

#[rstest]
fn test_save_overwrites_existing_file(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    save_jsonl(&populated(), &path).unwrap();

    let empty = PropertyGraph::from_config(&GraphConfig::default()).unwrap();
    save_jsonl(&empty, &path).unwrap();

    let (loaded, _) = load_jsonl(&path).unwrap();
    assert!(loaded.is_empty());
    assert_eq!(loaded.vertex_identity_property(), Some("uri"));
}

#[rstest]
fn test_resilient_load(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"record":"header","version":1,"vertex_identity":"uri"}"#,
            "\n",
            r#"{"record":"property","kind":"vertex","name":"uri","value_type":"string"}"#,
            "\n",
            r#"{"record":"property","kind":"vertex","name":"uri","value_type":"int"}"#,
            "\n",
            r#"{"record":"vertex","id":0,"properties":{"uri":"a"}}"#,
            "\n",
            "{truncated\n",
            r#"{"record":"edge","source":0,"target":3}"#,
            "\n",
        ),
    )
    .unwrap();

    let (graph, warnings) = load_jsonl(&path).unwrap();
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(warnings.len(), 3);
    assert!(matches!(
        warnings[0],
        LoadWarning::MalformedJson { line_number: 5, .. }
    ));
    assert!(matches!(
        warnings[1],
        LoadWarning::InvalidProperty { line_number: 3, .. }
    ));
    assert!(matches!(
        warnings[2],
        LoadWarning::OrphanedEdge { line_number: 6, .. }
    ));
}

#[rstest]
fn test_zero_int_key_survives_round_trip(temp_dir: TempDir) {
    let path = temp_dir.path().join("graph.jsonl");
    let mut graph = PropertyGraph::new();
    graph
        .init_graph([("id", ValueType::Scalar(ScalarType::Int))], [("uri", ValueType::STRING)])
        .unwrap();
    graph.set_vertex_identity_property("id").unwrap();
    graph.create_relation(0_i64, 1_i64, None).unwrap();
    save_jsonl(&graph, &path).unwrap();

    let (mut loaded, warnings) = load_jsonl(&path).unwrap();
    assert!(warnings.is_empty(), "{warnings:?}");
    let (_, existed) = loaded.get_or_create_vertex(0_i64).unwrap();
    assert!(existed);
    loaded.create_relation(0_i64, 1_i64, None).unwrap();
    assert_eq!(loaded.vertex_count(), 2);
    assert_eq!(loaded.edge_count(), 1);
}
