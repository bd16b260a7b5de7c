//! Error types for linecntlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during line counting
#[derive(Error, Debug)]
pub enum LinecntError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source text is not valid UTF-8
    #[error("malformed input in '{origin}' at line {line}: {source}")]
    MalformedInput {
        origin: String,
        line: u64,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// No file extensions were selected
    #[error("the extension list is empty, at least one extension must be specified")]
    NoExtensions,
}
