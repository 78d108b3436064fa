//! Error types for PitchSide

use thiserror::Error;

/// Result type alias for PitchSide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in PitchSide operations
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or parse source match data
    #[error("data error: {0}")]
    Data(String),

    /// Failed to load or run the embedding model
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Failed to store or retrieve from the vector store
    #[error("store error: {0}")]
    Store(String),

    /// Failed to produce an answer from the generation backend
    #[error("generation error: {0}")]
    Generation(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
