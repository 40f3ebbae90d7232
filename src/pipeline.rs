//! End-to-end extraction pipeline.
//!
//! A [`Pipeline`] holds the collaborators (frame refiner, causal extractor,
//! relevance ranker, optional indicator scorer) and the configuration. It
//! processes one document at a time with a fresh [`IndexRegistry`], one
//! sentence at a time in document order. A sentence missing a required
//! annotation layer is skipped and recorded as a [`SentenceFault`]; it issues
//! no IDs and the rest of the document is still processed.
//!
//! ```rust
//! use sofia::Pipeline;
//! use sofia_core::{AnnotatedDocument, SentenceAnnotation};
//!
//! let sentence = SentenceAnnotation::from_words(&[
//!     ("Drought", "NN", "drought"),
//!     ("caused", "VBD", "cause"),
//!     ("hunger", "NN", "hunger"),
//! ])
//! .with_dependency(2, 1, "nsubj")
//! .with_dependency(2, 3, "dobj")
//! .with_noun_phrase_over(0..=0, "drought")
//! .with_noun_phrase_over(2..=2, "hunger");
//! let doc = AnnotatedDocument::new("Drought caused hunger", vec![sentence]);
//!
//! let output = Pipeline::default().process_document(&doc, None);
//! let sentence = &output.sentences[0];
//! assert_eq!(sentence.events.len(), 3);
//! assert_eq!(sentence.relations.len(), 1);
//! assert!(output.faults.is_empty());
//! ```

use crate::annotate::AnnotationAdapter;
use crate::causal::{CausalInput, CausalRelationExtractor, CausalVerbExtractor};
use crate::classify::SpanClassifier;
use crate::config::PipelineConfig;
use crate::frames::{FrameRefiner, LexiconFrameRefiner};
use crate::output::{retain_emitted, OutputAssembler, SentenceOutput};
use crate::rank::{LexicalOverlapRanker, NodeScores, RankNode, RelevanceRanker};
use crate::registry::IndexRegistry;
use crate::roles::RoleResolver;
use crate::Result;
use serde::Serialize;
use sofia_core::{AnnotatedDocument, SentenceAnnotation};

/// Produces the indicator string of a sentence (ontology matches and the like).
pub trait IndicatorScorer: Send + Sync {
    /// Indicator string for `sentence`; empty when nothing matches.
    fn indicators(&self, sentence: &str) -> String;
}

/// A sentence that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceFault {
    /// Zero-based sentence index.
    pub index: usize,
    /// What went wrong.
    pub message: String,
}

/// Result of processing one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentOutput {
    /// Per-sentence output, in processing order.
    pub sentences: Vec<SentenceOutput>,
    /// Sentences that were skipped.
    pub faults: Vec<SentenceFault>,
}

/// The extraction pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    roles: RoleResolver,
    refiner: Box<dyn FrameRefiner>,
    extractor: Box<dyn CausalRelationExtractor>,
    ranker: Box<dyn RelevanceRanker>,
    indicator: Option<Box<dyn IndicatorScorer>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("indicator", &self.indicator.is_some())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Pipeline with the built-in collaborators.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            roles: RoleResolver::new(config.roles.clone()),
            config,
            refiner: Box::new(LexiconFrameRefiner::new()),
            extractor: Box::new(CausalVerbExtractor::new()),
            ranker: Box::new(LexicalOverlapRanker::new()),
            indicator: None,
        }
    }

    /// Replace the frame refiner.
    #[must_use]
    pub fn with_refiner(mut self, refiner: impl FrameRefiner + 'static) -> Self {
        self.refiner = Box::new(refiner);
        self
    }

    /// Replace the causal relation extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl CausalRelationExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the relevance ranker.
    #[must_use]
    pub fn with_ranker(mut self, ranker: impl RelevanceRanker + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    /// Attach an indicator scorer.
    #[must_use]
    pub fn with_indicator_scorer(mut self, scorer: impl IndicatorScorer + 'static) -> Self {
        self.indicator = Some(Box::new(scorer));
        self
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Annotate `text` with `adapter`, then process it as one document.
    ///
    /// # Errors
    ///
    /// Whatever the adapter returns. Sentence-level failures are reported in
    /// [`DocumentOutput::faults`] instead.
    pub fn annotate_and_process(
        &self,
        adapter: &dyn AnnotationAdapter,
        text: &str,
        query: Option<&str>,
    ) -> Result<DocumentOutput> {
        let doc = adapter.annotate(text)?;
        Ok(self.process_document(&doc, query))
    }

    /// Process every sentence of `doc` with one query (or none).
    #[must_use]
    pub fn process_document(&self, doc: &AnnotatedDocument, query: Option<&str>) -> DocumentOutput {
        let mut registry = IndexRegistry::new();
        let mut output = DocumentOutput::default();
        for (index, sentence) in doc.sentences.iter().enumerate() {
            self.process_into(&mut registry, index, sentence, query, &mut output);
        }
        log::info!(
            "Processed {} sentence(s), {} fault(s)",
            output.sentences.len(),
            output.faults.len()
        );
        output
    }

    /// Process `doc` once per query, only over the sentences the ranker
    /// selects for that query.
    ///
    /// All queries share one registry, so IDs keep increasing across queries.
    #[must_use]
    pub fn process_queries<Q: AsRef<str>>(&self, doc: &AnnotatedDocument, queries: &[Q]) -> DocumentOutput {
        let mut registry = IndexRegistry::new();
        let mut output = DocumentOutput::default();
        for query in queries {
            let query = query.as_ref();
            let mut selected = 0;
            for (index, sentence) in doc.sentences.iter().enumerate() {
                if !self.ranker.matches_sentence(sentence, query) {
                    continue;
                }
                selected += 1;
                self.process_into(&mut registry, index, sentence, Some(query), &mut output);
            }
            log::info!("Query {query:?} selected {selected} sentence(s)");
        }
        output
    }

    fn process_into(
        &self,
        registry: &mut IndexRegistry,
        index: usize,
        sentence: &SentenceAnnotation,
        query: Option<&str>,
        output: &mut DocumentOutput,
    ) {
        match self.process_sentence(registry, index, sentence, query) {
            Ok(sentence) => output.sentences.push(sentence),
            Err(e) => {
                log::warn!("Skipping sentence {index}: {e}");
                output.faults.push(SentenceFault {
                    index: e.sentence_index().unwrap_or(index),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Process one sentence against an existing registry.
    ///
    /// # Errors
    ///
    /// A structural annotation error when tokens, POS tags or dependencies
    /// are missing. Nothing is issued from `registry` in that case.
    pub fn process_sentence(
        &self,
        registry: &mut IndexRegistry,
        index: usize,
        sentence: &SentenceAnnotation,
        query: Option<&str>,
    ) -> Result<SentenceOutput> {
        let view = sentence.view(index)?;
        let classified =
            SpanClassifier::new(&*self.refiner, &self.roles, &self.config).classify(&view);
        let indexed = registry.index_sentence(&classified);

        let indicator = self
            .indicator
            .as_ref()
            .map(|scorer| scorer.indicators(view.text))
            .unwrap_or_default();
        let assembler = OutputAssembler::new(&self.config.source, query, view.text)
            .with_indicator(&indicator)
            .with_lowercase_entities(self.config.lowercase_entities);

        let mut scores = NodeScores::new();
        let mut entities = Vec::with_capacity(indexed.entities.len());
        for node in &indexed.entities {
            let Some(entity) = classified.entities.get(&node.span) else {
                continue;
            };
            let score = self.score(RankNode::Entity(entity), view.text, query);
            scores.insert(node.id, score);
            entities.push(assembler.entity(node, entity, score));
        }

        let mut events = Vec::with_capacity(indexed.events.len());
        for node in &indexed.events {
            let Some(event) = classified.events.get(&node.span) else {
                continue;
            };
            let score = self.score(RankNode::Event(event), view.text, query);
            scores.insert(node.id, score);
            events.push(assembler.event(node, event, score));
        }

        let candidates = self.extractor.extract(&CausalInput {
            sentence: view.text,
            lemmas: &view.lemmas,
            pos: view.pos,
            classified: &classified,
            indexed: &indexed,
            scores: &scores,
        });
        let relations: Vec<_> = retain_emitted(candidates, &indexed)
            .iter()
            .map(|candidate| {
                let id = registry.next_relation();
                let score = self.score(
                    RankNode::Relation {
                        scores: &scores,
                        cause: candidate.cause.id,
                        effect: candidate.effect.id,
                    },
                    view.text,
                    query,
                );
                assembler.relation(id, candidate, score)
            })
            .collect();

        // No scored nodes means 0.0; otherwise the maximum, negative or not.
        let best = scores.values().copied().reduce(f64::max).unwrap_or(0.0);
        Ok(SentenceOutput {
            index,
            variable: assembler.variable(indexed.variable, best),
            entities,
            events,
            relations,
        })
    }

    fn score(&self, node: RankNode<'_>, sentence: &str, query: Option<&str>) -> f64 {
        match query {
            Some(query) => self.ranker.rank(node, sentence, query),
            None => 0.0,
        }
    }
}
