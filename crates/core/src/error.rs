//! Error types for subgraph extraction.
//!
//! Malformed input lines are not errors: the parser skips them. Only a
//! failed name lookup or an I/O/serialization failure stops a run.

use thiserror::Error;

/// Result type for nodedeps operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate an extraction.
#[derive(Debug, Error)]
pub enum Error {
    /// No node label has a canonical name matching the query
    #[error("Node '{name}' not found in graph")]
    NodeNotFound {
        /// The name exactly as the user supplied it
        name: String,
    },

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the JSON document failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
