//! Annotation adapters.
//!
//! Producing tokens, tags, parses and chunks is the job of an external
//! annotator (CoreNLP, Odin, ...). An [`AnnotationAdapter`] turns raw text
//! into an [`AnnotatedDocument`]; [`JsonAnnotator`] serves documents that
//! were annotated ahead of time and stored as JSON.

use crate::{Error, Result};
use serde::Deserialize;
use sofia_core::AnnotatedDocument;
use std::path::Path;

/// Supplies annotations for a text.
pub trait AnnotationAdapter {
    /// Annotate `text`.
    ///
    /// # Errors
    ///
    /// [`Error::Annotator`] when the text cannot be annotated.
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<AnnotatedDocument>),
    One(AnnotatedDocument),
}

/// Pre-annotated documents, looked up by their text.
#[derive(Debug, Clone, Default)]
pub struct JsonAnnotator {
    documents: Vec<AnnotatedDocument>,
}

impl JsonAnnotator {
    /// Serve the given documents.
    #[must_use]
    pub fn from_documents(documents: Vec<AnnotatedDocument>) -> Self {
        Self { documents }
    }

    /// Parse a single document or an array of documents.
    ///
    /// # Errors
    ///
    /// Malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let documents = match serde_json::from_str(json)? {
            OneOrMany::Many(docs) => docs,
            OneOrMany::One(doc) => vec![doc],
        };
        Ok(Self::from_documents(documents))
    }

    /// Load from a JSON file holding a document or an array of documents.
    ///
    /// # Errors
    ///
    /// IO errors and malformed JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let annotator = Self::from_json_str(&raw)?;
        log::info!(
            "Loaded {} annotated document(s) from {}",
            annotator.documents.len(),
            path.as_ref().display()
        );
        Ok(annotator)
    }

    /// All documents, in file order.
    #[must_use]
    pub fn documents(&self) -> &[AnnotatedDocument] {
        &self.documents
    }
}

impl AnnotationAdapter for JsonAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        let wanted = text.trim();
        self.documents
            .iter()
            .find(|doc| doc.text.trim() == wanted)
            .cloned()
            .ok_or_else(|| {
                let preview: String = wanted.chars().take(40).collect();
                Error::annotator(format!("no annotations for text {preview:?}"))
            })
    }
}
