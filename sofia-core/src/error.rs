//! Error types for sofia-core.

use thiserror::Error;

/// Result type for sofia-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sofia-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A sentence is missing an annotation layer the pipeline cannot do without.
    #[error("Sentence {sentence}: required annotation `{field}` is missing")]
    StructuralAnnotation {
        /// Zero-based index of the sentence within its document.
        sentence: usize,
        /// Name of the missing layer (`tokens`, `pos`, `dependencies`).
        field: &'static str,
    },
}

impl Error {
    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a structural annotation error for one sentence.
    #[must_use]
    pub fn structural(sentence: usize, field: &'static str) -> Self {
        Self::StructuralAnnotation { sentence, field }
    }

    /// Sentence index carried by this error, if it is sentence-scoped.
    #[must_use]
    pub fn sentence_index(&self) -> Option<usize> {
        match self {
            Self::StructuralAnnotation { sentence, .. } => Some(*sentence),
            _ => None,
        }
    }
}
