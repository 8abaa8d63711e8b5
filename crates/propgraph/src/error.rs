//! Error types for propgraph operations.
//!
//! Errors fall into two groups:
//!
//! - **Contract errors** (`Config`, `Schema`, `Type`, `Consistency`): the call
//!   was rejected before it mutated anything.
//! - **Infrastructure errors** (`Io`, `Json`): persistence failed.
//!
//! A lookup that finds nothing is not an error. Query operations return
//! `Option`, and only the explicit `require_*` variants turn a miss into
//! [`Error::NotFound`].

use std::io;
use thiserror::Error;

/// The error type for propgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Identity properties are missing, set too early, or reference an
    /// undeclared property. Also covers unreadable configuration files.
    #[error("configuration error: {0}")]
    Config(String),

    /// A property declaration conflicts with an existing one, or a property
    /// is missing and on-demand creation was disabled.
    #[error("schema error: {0}")]
    Schema(String),

    /// A value or argument has the wrong kind for the operation.
    #[error("type error: {0}")]
    Type(String),

    /// A lookup that was asked to fail on a miss found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// An identity key is already bound to a different vertex.
    #[error("identity key {key} already registered to vertex {existing}, refusing {attempted}")]
    Consistency {
        /// The conflicting key, rendered for display.
        key: String,
        /// Vertex index the key is bound to.
        existing: usize,
        /// Vertex index the caller tried to bind.
        attempted: usize,
    },

    /// IO error occurred while reading or writing a graph file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for propgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
