//! # sofia
//!
//! Entity, event and causal-relation extraction over pre-annotated sentences.
//!
//! - **Classification**: entity vs. event per noun phrase and verb, including
//!   nominalized events
//! - **Roles**: agent/patient from dependency edges, with passive and
//!   modifier fallback rules
//! - **Indexing**: document-scoped `N`/`E`/`R`/`V` identifiers, with events
//!   that take other events as arguments resolved in a second pass
//! - **Output**: variable, entity, event and causal-relation records
//!
//! Parsing, frame lexicons, causal discourse rules and relevance scoring are
//! collaborators behind traits ([`AnnotationAdapter`], [`FrameRefiner`],
//! [`CausalRelationExtractor`], [`RelevanceRanker`]); each has a small
//! built-in implementation so the pipeline runs end to end.
//!
//! ## Quick Start
//!
//! ```rust
//! use sofia::Pipeline;
//! use sofia_core::{AnnotatedDocument, SentenceAnnotation};
//!
//! let sentence = SentenceAnnotation::from_words(&[
//!     ("The", "DT", "the"),
//!     ("intense", "JJ", "intense"),
//!     ("rain", "NN", "rain"),
//!     ("caused", "VBD", "cause"),
//!     ("flooding", "NN", "flooding"),
//! ])
//! .with_dependency(4, 3, "nsubj")
//! .with_dependency(4, 5, "dobj")
//! .with_noun_phrase_over(0..=2, "rain")
//! .with_noun_phrase_over(4..=4, "flooding");
//! let doc = AnnotatedDocument::new(sentence.text.clone(), vec![sentence]);
//!
//! let output = Pipeline::default().process_document(&doc, None);
//! let relation = &output.sentences[0].relations[0];
//! assert_eq!(relation.trigger, "caused");
//! assert_eq!(relation.cause, "The intense rain");
//! assert_eq!(relation.effect, "flooding");
//! ```
//!
//! ## Queries
//!
//! [`Pipeline::process_queries`] runs each query over the sentences the
//! ranker selects for it and scores every record against the query. Without
//! a query every score is exactly 0.0.

#![warn(missing_docs)]

pub mod annotate;
pub mod causal;
pub mod classify;
pub mod config;
pub mod error;
pub mod frames;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod registry;
pub mod roles;
pub mod similarity;

pub use annotate::{AnnotationAdapter, JsonAnnotator};
pub use causal::{CausalArgument, CausalCandidate, CausalInput, CausalRelationExtractor, CausalVerbExtractor};
pub use classify::{ClassifiedSentence, SpanClassifier};
pub use config::{PipelineConfig, RoleLabels};
pub use error::{Error, Result};
pub use frames::{FrameRefiner, LexiconFrameRefiner, WordClass};
pub use output::{CausalRecord, EntityRecord, EventRecord, OutputAssembler, SentenceOutput, VariableRecord};
pub use pipeline::{DocumentOutput, IndicatorScorer, Pipeline, SentenceFault};
pub use rank::{LexicalOverlapRanker, NodeScores, RankNode, RelevanceRanker};
pub use registry::{IndexRegistry, IndexedEntity, IndexedEvent, IndexedSentence};
pub use roles::{RoleResolver, RoleTerms};
