//! Error types for the frota-core library.

use thiserror::Error;

/// Main error type for the frota library.
#[derive(Error, Debug)]
pub enum FrotaError {
    /// Document source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by document sources feeding the pipeline.
///
/// Per-line and per-value problems inside the pipeline are never errors;
/// these cover only the boundary where converter output is obtained.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document could not be read at all.
    #[error("failed to read document: {0}")]
    Read(String),

    /// Converter output was present but not in the expected shape.
    #[error("malformed page dump: {0}")]
    Malformed(String),
}

/// Result type for the frota library.
pub type Result<T> = std::result::Result<T, FrotaError>;
