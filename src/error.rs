//! Error types for logmerge
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MergeError
pub type Result<T> = std::result::Result<T, MergeError>;

/// Unified error type for logmerge operations
#[derive(Debug, Error)]
pub enum MergeError {
    // -------------------------------------------------------------------------
    // Filesystem Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    // -------------------------------------------------------------------------
    // Sort Key Errors
    // -------------------------------------------------------------------------
    #[error("Filename {name:?} does not match the time mask: {source}")]
    TimeParse {
        name: String,
        source: chrono::ParseError,
    },
}
