//! Error types for sofia.

use thiserror::Error;

/// Result type for sofia operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sofia operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the core types (structural annotation gaps, ID parsing).
    #[error(transparent)]
    Core(#[from] sofia_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The annotation adapter could not produce annotations.
    #[error("Annotator error: {0}")]
    Annotator(String),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an annotator error.
    #[must_use]
    pub fn annotator(msg: impl Into<String>) -> Self {
        Error::Annotator(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Sentence index of a sentence-scoped failure.
    #[must_use]
    pub fn sentence_index(&self) -> Option<usize> {
        match self {
            Error::Core(inner) => inner.sentence_index(),
            _ => None,
        }
    }
}
