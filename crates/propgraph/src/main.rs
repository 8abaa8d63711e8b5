//! Propgraph CLI binary.

use anyhow::Result;
use propgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=propgraph=debug propgraph stats graph.jsonl
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("propgraph=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting propgraph CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Propgraph CLI completed successfully");
    Ok(())
}
