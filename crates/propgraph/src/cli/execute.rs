//! Command implementations.

use super::args::{ComponentsArgs, IngestArgs, PruneArgs, StatsArgs};
use super::ingest::{ingest, IngestSummary};
use crate::config::GraphConfig;
use crate::graph::PropertyGraph;
use crate::output::{self, OutputConfig, OutputMode};
use crate::persist::{load_jsonl, save_jsonl, LoadWarning};
use crate::store::VertexId;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

/// Loads a graph file, reporting load warnings on stderr.
fn open_graph(path: &Path) -> Result<PropertyGraph> {
    let (graph, warnings) =
        load_jsonl(path).with_context(|| format!("failed to load graph from {}", path.display()))?;
    report_warnings(&warnings);
    Ok(graph)
}

fn report_warnings(warnings: &[LoadWarning]) {
    let config = OutputConfig::from_env();
    for warning in warnings {
        eprintln!("{} {warning}", output::warning("warning:", &config));
    }
}

/// Identity value of each vertex, or its index when vertices are unkeyed.
fn display_keys(graph: &PropertyGraph, vertices: &[VertexId]) -> Vec<String> {
    vertices
        .iter()
        .map(|&v| match graph.get_vertex_identity_value(v) {
            Ok(value) => value.to_string(),
            Err(_) => format!("#{}", v.index()),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct IngestReport<'a> {
    output: &'a Path,
    #[serde(flatten)]
    summary: IngestSummary,
    pruned: usize,
    total_vertices: usize,
    total_edges: usize,
}

/// Execute the `ingest` command
pub fn execute_ingest(args: &IngestArgs, output_mode: OutputMode) -> Result<()> {
    let mut graph = match (&args.base, &args.config) {
        (Some(base), _) => open_graph(base)?,
        (None, Some(config)) => {
            let config = GraphConfig::load(config)
                .with_context(|| format!("failed to read config {}", config.display()))?;
            PropertyGraph::from_config(&config)?
        }
        (None, None) => PropertyGraph::from_config(&GraphConfig::default())?,
    };

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open input {}", args.input.display()))?;
    let summary = ingest(&mut graph, BufReader::new(input))?;

    let pruned = if args.prune {
        graph.remove_dangling_vertices().len()
    } else {
        0
    };
    save_jsonl(&graph, &args.output)
        .with_context(|| format!("failed to save graph to {}", args.output.display()))?;

    let report = IngestReport {
        output: &args.output,
        summary,
        pruned,
        total_vertices: graph.vertex_count(),
        total_edges: graph.edge_count(),
    };

    match output_mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut w = stdout.lock();
            writeln!(
                w,
                "{} {} relations, {} vertex records into {}",
                output::success("Ingested", &config),
                report.summary.relations,
                report.summary.vertices,
                output::info(&report.output.display().to_string(), &config)
            )?;
            for skipped in &report.summary.skipped {
                writeln!(
                    w,
                    "  {} line {}: {}",
                    output::warning("skipped", &config),
                    skipped.line_number,
                    skipped.reason
                )?;
            }
            if args.prune {
                output::write_field(&mut w, "Pruned", report.pruned, &config)?;
            }
            output::write_field(&mut w, "Vertices", report.total_vertices, &config)?;
            output::write_field(&mut w, "Edges", report.total_edges, &config)?;
        }
    }
    Ok(())
}

/// Execute the `stats` command
pub fn execute_stats(args: &StatsArgs, output_mode: OutputMode) -> Result<()> {
    let graph = open_graph(&args.graph)?;
    let stats = graph.stats();

    match output_mode {
        OutputMode::Json => output::print_json(&stats)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut w = stdout.lock();
            writeln!(w, "{}", output::info(&args.graph.display().to_string(), &config))?;
            output::write_field(&mut w, "Vertices", stats.vertices, &config)?;
            output::write_field(&mut w, "Edges", stats.edges, &config)?;
            output::write_field(&mut w, "Dangling", stats.dangling, &config)?;
            output::write_field(&mut w, "Components", stats.components, &config)?;
            output::write_field(&mut w, "Largest component", stats.largest_component, &config)?;
            output::write_field(
                &mut w,
                "Vertex identity",
                stats.vertex_identity.as_deref().unwrap_or("-"),
                &config,
            )?;
            output::write_field(
                &mut w,
                "Edge identity",
                stats.edge_identity.as_deref().unwrap_or("-"),
                &config,
            )?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    id: usize,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<Vec<String>>,
}

/// Execute the `components` command
pub fn execute_components(args: &ComponentsArgs, output_mode: OutputMode) -> Result<()> {
    let graph = open_graph(&args.graph)?;
    let labels = if args.strong {
        graph.label_strong_components()
    } else {
        graph.label_weak_components()
    };

    let reports: Vec<ComponentReport> = labels
        .groups()
        .into_iter()
        .enumerate()
        .filter(|(_, group)| group.len() >= args.min_size)
        .map(|(id, group)| ComponentReport {
            id,
            size: group.len(),
            members: args.members.then(|| display_keys(&graph, &group)),
        })
        .collect();

    match output_mode {
        OutputMode::Json => output::print_json(&reports)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut w = stdout.lock();
            let kind = if args.strong { "strong" } else { "weak" };
            writeln!(
                w,
                "{} {kind} components ({} shown)",
                labels.component_count(),
                reports.len()
            )?;
            for report in &reports {
                write!(
                    w,
                    "{} {}",
                    output::info(&format!("[{}]", report.id), &config),
                    report.size
                )?;
                if let Some(members) = &report.members {
                    write!(w, " {}", output::dimmed(&members.join(", "), &config))?;
                }
                writeln!(w)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct PruneReport {
    removed: Vec<String>,
    remaining: usize,
    dry_run: bool,
}

/// Execute the `prune` command
pub fn execute_prune(args: &PruneArgs, output_mode: OutputMode) -> Result<()> {
    let mut graph = open_graph(&args.graph)?;

    let report = if args.dry_run {
        let dangling = graph.dangling_vertices();
        let keys = display_keys(&graph, &dangling);
        PruneReport {
            removed: keys,
            remaining: graph.vertex_count() - dangling.len(),
            dry_run: true,
        }
    } else {
        // keys must be read before the vertices are gone
        let keys = display_keys(&graph, &graph.dangling_vertices());
        graph.remove_dangling_vertices();
        let target = args.output.as_deref().unwrap_or(&args.graph);
        save_jsonl(&graph, target)
            .with_context(|| format!("failed to save graph to {}", target.display()))?;
        PruneReport {
            removed: keys,
            remaining: graph.vertex_count(),
            dry_run: false,
        }
    };

    match output_mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let verb = if report.dry_run { "Would remove" } else { "Removed" };
            println!(
                "{} {} dangling vertices, {} remaining",
                output::success(verb, &config),
                report.removed.len(),
                report.remaining
            );
        }
    }
    Ok(())
}
