//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `ingest`: Build a graph file from a relations file
//! - `stats`: Summarize a graph file
//! - `components`: Show connected components
//! - `prune`: Remove vertices without edges
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! propgraph ingest --config graph.yaml --input relations.jsonl --output graph.jsonl
//! propgraph components graph.jsonl --members --min-size 2
//! propgraph --json stats graph.jsonl
//! ```

mod args;
mod execute;
mod ingest;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{ComponentsArgs, IngestArgs, PruneArgs, StatsArgs};
pub use ingest::{ingest, IngestSummary, SkippedLine};

use crate::output::OutputMode;

/// Propgraph - property graphs keyed by identity values
///
/// Build graph files from relation records, then inspect and prune them.
#[derive(Parser, Debug)]
#[command(name = "propgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build a graph file from a relations file
    ///
    /// Vertices are created on first mention and reused afterwards; repeated
    /// relations between known vertices are merged.
    Ingest(IngestArgs),

    /// Show graph statistics
    ///
    /// Vertex, edge and dangling counts plus component summary.
    Stats(StatsArgs),

    /// Show connected components
    Components(ComponentsArgs),

    /// Remove vertices that have no edges
    Prune(PruneArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any failure of the command, with context.
    pub fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Ingest(args)) => execute::execute_ingest(args, output_mode),
            Some(Commands::Stats(args)) => execute::execute_stats(args, output_mode),
            Some(Commands::Components(args)) => execute::execute_components(args, output_mode),
            Some(Commands::Prune(args)) => execute::execute_prune(args, output_mode),
            None => {
                println!("Propgraph property graph tool");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["propgraph"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["propgraph", "stats", "g.jsonl", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Stats(_))));
    }

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::try_parse_from([
            "propgraph",
            "ingest",
            "-i",
            "relations.jsonl",
            "-o",
            "graph.jsonl",
            "--config",
            "graph.yaml",
            "--prune",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ingest(args)) => {
                assert_eq!(args.input, PathBuf::from("relations.jsonl"));
                assert_eq!(args.output, PathBuf::from("graph.jsonl"));
                assert_eq!(args.config, Some(PathBuf::from("graph.yaml")));
                assert!(args.base.is_none());
                assert!(args.prune);
            }
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_parse_ingest_requires_paths() {
        assert!(Cli::try_parse_from(["propgraph", "ingest", "-i", "r.jsonl"]).is_err());
    }

    #[test]
    fn test_parse_ingest_base_conflicts_with_config() {
        let result = Cli::try_parse_from([
            "propgraph", "ingest", "-i", "r.jsonl", "-o", "g.jsonl", "--config", "c.yaml",
            "--base", "old.jsonl",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_components_defaults() {
        let cli = Cli::try_parse_from(["propgraph", "components", "g.jsonl"]).unwrap();
        match cli.command {
            Some(Commands::Components(args)) => {
                assert!(!args.strong);
                assert!(!args.members);
                assert_eq!(args.min_size, 1);
            }
            _ => panic!("Expected Components command"),
        }
    }

    #[test]
    fn test_parse_prune_dry_run() {
        let cli = Cli::try_parse_from(["propgraph", "prune", "g.jsonl", "--dry-run"]).unwrap();
        match cli.command {
            Some(Commands::Prune(args)) => {
                assert!(args.dry_run);
                assert!(args.output.is_none());
            }
            _ => panic!("Expected Prune command"),
        }
    }
}
