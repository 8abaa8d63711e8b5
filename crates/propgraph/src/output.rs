//! Output formatting for CLI commands.
//!
//! Commands print either human-readable text or pretty JSON, selected by the
//! global `--json` flag.

use colored::Colorize;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Settings for text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Reads `NO_COLOR` (any value disables colors) and `PROPGRAPH_COLOR`
    /// (`0` or `false` disables colors).
    #[must_use]
    pub fn from_env() -> Self {
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("PROPGRAPH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Green text for completed actions.
#[must_use]
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Yellow text for warnings.
#[must_use]
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Cyan text for identifiers and paths.
#[must_use]
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Dimmed text for field labels.
#[must_use]
pub fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Writes one `label: value` line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_field<W: Write>(
    w: &mut W,
    label: &str,
    value: impl std::fmt::Display,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} {value}", dimmed(&format!("{label}:"), config))
}

/// Print any serializable value as pretty JSON on stdout.
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}
