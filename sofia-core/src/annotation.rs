//! Per-sentence annotation schema consumed from the upstream annotator.
//!
//! The annotator itself (tokenization, tagging, parsing, chunking) is an
//! external collaborator. This module only fixes the shape of its output and
//! checks that the layers the pipeline cannot do without are present.
//!
//! # Example
//!
//! ```rust
//! use sofia_core::SentenceAnnotation;
//!
//! let sentence = SentenceAnnotation::from_words(&[
//!     ("Rain", "NN", "rain"),
//!     ("caused", "VBD", "cause"),
//!     ("floods", "NNS", "flood"),
//! ])
//! .with_dependency(2, 1, "nsubj")
//! .with_dependency(2, 3, "dobj")
//! .with_noun_phrase_over(0..=0, "rain")
//! .with_noun_phrase_over(2..=2, "flood");
//!
//! let view = sentence.view(0).unwrap();
//! assert_eq!(view.text, "Rain caused floods");
//! assert_eq!(view.noun_phrases.len(), 2);
//! ```

use crate::{Error, Result, Span};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::RangeInclusive;

/// A whole document as produced by the annotator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Original document text, when the annotator reports it.
    #[serde(default)]
    pub text: String,
    /// Sentences in document order.
    #[serde(default)]
    pub sentences: Vec<SentenceAnnotation>,
}

impl AnnotatedDocument {
    /// Create a document from sentences.
    #[must_use]
    pub fn new(text: impl Into<String>, sentences: Vec<SentenceAnnotation>) -> Self {
        Self {
            text: text.into(),
            sentences,
        }
    }

    /// Number of sentences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether the document has no sentences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A token with its character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text.
    pub text: String,
    /// Start character offset.
    pub start: usize,
    /// End character offset.
    pub end: usize,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// The token's span.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A typed dependency edge.
///
/// Token indices are 1-based; governor 0 is the artificial root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Index of the head token.
    pub governor: usize,
    /// Index of the dependent token.
    pub dependent: usize,
    /// Surface text of the dependent.
    pub dependent_text: String,
    /// Relation label (`nsubj`, `dobj`, `nmod:in`, ...).
    pub relation: String,
}

impl Dependency {
    /// Create an edge.
    #[must_use]
    pub fn new(
        governor: usize,
        dependent: usize,
        dependent_text: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            governor,
            dependent,
            dependent_text: dependent_text.into(),
            relation: relation.into(),
        }
    }
}

/// A nominalized event embedded in a noun phrase ("the *flooding* of the river").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eventuality {
    /// Start character offset.
    pub start: usize,
    /// End character offset.
    pub end: usize,
    /// Verbal lemma of the event head.
    pub lemma: String,
    /// Surface text of the event head.
    pub text: String,
}

impl Eventuality {
    /// Create an eventuality sub-record.
    #[must_use]
    pub fn new(start: usize, end: usize, lemma: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            lemma: lemma.into(),
            text: text.into(),
        }
    }

    /// The eventuality's own (inner) span.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A noun-phrase chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounPhrase {
    /// Start character offset.
    pub start: usize,
    /// End character offset.
    pub end: usize,
    /// Head token text.
    #[serde(default)]
    pub head: String,
    /// Head lemma.
    pub head_lemma: String,
    /// Surface text of the whole chunk.
    pub text: String,
    /// Qualifier (modifier) text.
    #[serde(default)]
    pub qualifier: String,
    /// Embedded nominalized event, if any.
    #[serde(default)]
    pub eventuality: Option<Eventuality>,
}

impl NounPhrase {
    /// Create a chunk without qualifier or eventuality.
    #[must_use]
    pub fn new(
        start: usize,
        end: usize,
        text: impl Into<String>,
        head: impl Into<String>,
        head_lemma: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            head: head.into(),
            head_lemma: head_lemma.into(),
            text: text.into(),
            qualifier: String::new(),
            eventuality: None,
        }
    }

    /// Attach a qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    /// Attach an embedded eventuality.
    #[must_use]
    pub fn with_eventuality(mut self, eventuality: Eventuality) -> Self {
        self.eventuality = Some(eventuality);
        self
    }

    /// The chunk's (outer) span.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// One sentence of annotator output.
///
/// `tokens`, `pos` and `dependencies` are required; a sentence missing any of
/// them cannot be processed. Missing lemmas fall back to the lowercased token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    /// Sentence text.
    pub text: String,
    /// Tokens in order.
    #[serde(default)]
    pub tokens: Option<Vec<Token>>,
    /// One POS tag per token.
    #[serde(default)]
    pub pos: Option<Vec<String>>,
    /// One lemma per token.
    #[serde(default)]
    pub lemmas: Option<Vec<String>>,
    /// Dependency edges.
    #[serde(default)]
    pub dependencies: Option<Vec<Dependency>>,
    /// Noun-phrase chunks.
    #[serde(default)]
    pub noun_phrases: Vec<NounPhrase>,
    /// Sentence-level location tag.
    #[serde(default)]
    pub location: Option<String>,
    /// Sentence-level temporal tag.
    #[serde(default)]
    pub temporal: Option<String>,
}

impl SentenceAnnotation {
    /// Create a sentence with no annotation layers.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Build a sentence from `(word, pos, lemma)` triples joined by single spaces.
    ///
    /// Offsets are computed from the joined text and the dependency list starts
    /// out empty (present, not missing).
    #[must_use]
    pub fn from_words(words: &[(&str, &str, &str)]) -> Self {
        let mut sentence = Self {
            dependencies: Some(Vec::new()),
            tokens: Some(Vec::new()),
            pos: Some(Vec::new()),
            lemmas: Some(Vec::new()),
            ..Self::default()
        };
        for (word, pos, lemma) in words {
            sentence = sentence.with_token(word, pos, lemma);
        }
        sentence
    }

    /// Append a token, extending the sentence text by one space-separated word.
    #[must_use]
    pub fn with_token(mut self, word: &str, pos: &str, lemma: &str) -> Self {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let start = self.text.chars().count();
        self.text.push_str(word);
        let end = start + word.chars().count();
        self.tokens
            .get_or_insert_with(Vec::new)
            .push(Token::new(word, start, end));
        self.pos.get_or_insert_with(Vec::new).push(pos.to_string());
        self.lemmas
            .get_or_insert_with(Vec::new)
            .push(lemma.to_string());
        self
    }

    /// Add a dependency edge between 1-based token indices.
    ///
    /// The dependent text is taken from the token list when available.
    #[must_use]
    pub fn with_dependency(mut self, governor: usize, dependent: usize, relation: &str) -> Self {
        let dependent_text = dependent
            .checked_sub(1)
            .and_then(|i| self.tokens.as_ref().and_then(|t| t.get(i)))
            .map(|t| t.text.clone())
            .unwrap_or_default();
        self.dependencies
            .get_or_insert_with(Vec::new)
            .push(Dependency::new(governor, dependent, dependent_text, relation));
        self
    }

    /// Add a noun-phrase chunk.
    #[must_use]
    pub fn with_noun_phrase(mut self, np: NounPhrase) -> Self {
        self.noun_phrases.push(np);
        self
    }

    /// Add a chunk covering the given 0-based token range; the last token is the head.
    #[must_use]
    pub fn with_noun_phrase_over(self, tokens: RangeInclusive<usize>, head_lemma: &str) -> Self {
        match self.chunk_over(tokens, head_lemma) {
            Some(np) => self.with_noun_phrase(np),
            None => self,
        }
    }

    /// Build (without adding) a chunk covering a 0-based token range.
    #[must_use]
    pub fn chunk_over(&self, tokens: RangeInclusive<usize>, head_lemma: &str) -> Option<NounPhrase> {
        let all = self.tokens.as_ref()?;
        let covered = all.get(*tokens.start()..=*tokens.end())?;
        let (first, last) = (covered.first()?, covered.last()?);
        let text = covered
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(NounPhrase::new(
            first.start,
            last.end,
            text,
            last.text.clone(),
            head_lemma,
        ))
    }

    /// Eventuality sub-record over a single 0-based token.
    #[must_use]
    pub fn eventuality_at(&self, token: usize, lemma: &str) -> Option<Eventuality> {
        let t = self.tokens.as_ref()?.get(token)?;
        Some(Eventuality::new(t.start, t.end, lemma, t.text.clone()))
    }

    /// Set the location tag.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the temporal tag.
    #[must_use]
    pub fn with_temporal(mut self, temporal: impl Into<String>) -> Self {
        self.temporal = Some(temporal.into());
        self
    }

    /// Check required layers and borrow a view over them.
    ///
    /// # Errors
    ///
    /// [`Error::StructuralAnnotation`] naming the first missing layer among
    /// `tokens`, `pos` and `dependencies`.
    pub fn view(&self, index: usize) -> Result<SentenceView<'_>> {
        let tokens = self
            .tokens
            .as_deref()
            .ok_or_else(|| Error::structural(index, "tokens"))?;
        let pos = self
            .pos
            .as_deref()
            .ok_or_else(|| Error::structural(index, "pos"))?;
        let dependencies = self
            .dependencies
            .as_deref()
            .ok_or_else(|| Error::structural(index, "dependencies"))?;
        let lemmas = match self.lemmas.as_deref() {
            Some(lemmas) => Cow::Borrowed(lemmas),
            None => Cow::Owned(tokens.iter().map(|t| t.text.to_lowercase()).collect()),
        };
        Ok(SentenceView {
            index,
            text: &self.text,
            tokens,
            pos,
            lemmas,
            dependencies,
            noun_phrases: &self.noun_phrases,
            location: self.location.as_deref().unwrap_or_default(),
            temporal: self.temporal.as_deref().unwrap_or_default(),
        })
    }
}

/// A sentence whose required layers are known to be present.
#[derive(Debug, Clone)]
pub struct SentenceView<'a> {
    /// Zero-based index within the document.
    pub index: usize,
    /// Sentence text.
    pub text: &'a str,
    /// Tokens.
    pub tokens: &'a [Token],
    /// POS tags.
    pub pos: &'a [String],
    /// Lemmas (annotator-supplied or lowercased tokens).
    pub lemmas: Cow<'a, [String]>,
    /// Dependency edges.
    pub dependencies: &'a [Dependency],
    /// Noun-phrase chunks.
    pub noun_phrases: &'a [NounPhrase],
    /// Location tag, empty when absent.
    pub location: &'a str,
    /// Temporal tag, empty when absent.
    pub temporal: &'a str,
}

impl SentenceView<'_> {
    /// POS tag of a 0-based token.
    #[must_use]
    pub fn pos_at(&self, token: usize) -> Option<&str> {
        self.pos.get(token).map(String::as_str)
    }

    /// Lemma of a 0-based token.
    #[must_use]
    pub fn lemma_at(&self, token: usize) -> Option<&str> {
        self.lemmas.get(token).map(String::as_str)
    }
}
