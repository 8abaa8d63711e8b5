//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the `ingest` command
#[derive(Parser, Debug, Clone)]
pub struct IngestArgs {
    /// Relations file (JSON Lines)
    ///
    /// Each line is a `relation` record (`source`, `target`, optional `edge`
    /// and `properties`) or a `vertex` record (`key`, `properties`).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Graph file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Schema config (YAML); defaults to a `uri`-keyed string schema
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Existing graph file to extend instead of starting empty
    #[arg(long, conflicts_with = "config")]
    pub base: Option<PathBuf>,

    /// Remove vertices without edges before saving
    #[arg(long)]
    pub prune: bool,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Graph file to inspect
    pub graph: PathBuf,
}

/// Arguments for the `components` command
#[derive(Parser, Debug, Clone)]
pub struct ComponentsArgs {
    /// Graph file to inspect
    pub graph: PathBuf,

    /// Strongly connected components instead of weak ones
    #[arg(long)]
    pub strong: bool,

    /// List the identity values in each component
    #[arg(short, long)]
    pub members: bool,

    /// Only show components with at least this many vertices
    #[arg(long, default_value = "1")]
    pub min_size: usize,
}

/// Arguments for the `prune` command
#[derive(Parser, Debug, Clone)]
pub struct PruneArgs {
    /// Graph file to prune
    pub graph: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report what would be removed without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
