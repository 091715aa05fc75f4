//! Retrieval error types

use std::path::PathBuf;
use thiserror::Error;

use tribunal_llm::LlmError;

/// Why an index handle could not be constructed.
///
/// Returned once at startup; callers log a warning and leave the dependent
/// tool unregistered. Never fatal to the host.
#[derive(Debug, Error)]
pub enum IndexUnavailable {
    #[error("Index path not found: {0}")]
    PathNotFound(PathBuf),
    #[error("Failed to read index: {0}")]
    Io(String),
    #[error("Index is corrupt: {0}")]
    Corrupt(String),
    #[error("Index contains no documents")]
    Empty,
}

/// Errors from a single retrieval call
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Dimension mismatch: expected {0}, got {1}")]
    DimensionMismatch(usize, usize),
    #[error("Embedding failed: {0}")]
    Embedding(#[from] LlmError),
}
