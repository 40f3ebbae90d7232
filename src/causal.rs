//! Causal relation extraction.
//!
//! The pipeline hands an extractor a fully indexed sentence and takes back
//! candidates naming cause and effect by ID. How candidates are found is the
//! extractor's business; the pipeline only checks that every ID it gets back
//! was emitted for the sentence.

use crate::classify::ClassifiedSentence;
use crate::rank::NodeScores;
use crate::registry::IndexedSentence;
use serde::{Deserialize, Serialize};
use sofia_core::NodeId;
use std::collections::HashMap;

/// Everything an extractor may look at for one sentence.
#[derive(Debug, Clone, Copy)]
pub struct CausalInput<'a> {
    /// Sentence text.
    pub sentence: &'a str,
    /// Per-token lemmas.
    pub lemmas: &'a [String],
    /// Per-token POS tags.
    pub pos: &'a [String],
    /// Classified records by span.
    pub classified: &'a ClassifiedSentence,
    /// Issued IDs and resolved references.
    pub indexed: &'a IndexedSentence,
    /// Relevance score per emitted node (all 0.0 without a query).
    pub scores: &'a NodeScores,
}

/// One end of a causal relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalArgument {
    /// Display text.
    pub text: String,
    /// Entity or event ID.
    pub id: NodeId,
}

/// A causal relation proposed by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalCandidate {
    /// Trigger phrase.
    pub trigger: String,
    /// Relation type.
    pub relation_type: String,
    /// Cause side.
    pub cause: CausalArgument,
    /// Effect side.
    pub effect: CausalArgument,
}

/// Detects causal relations among the indexed nodes of a sentence.
pub trait CausalRelationExtractor: Send + Sync {
    /// Candidates in output order.
    fn extract(&self, input: &CausalInput<'_>) -> Vec<CausalCandidate>;
}

/// Causal-verb rule: an event whose lemma is a causal verb and whose agent
/// and patient both resolved yields `cause = agent`, `effect = patient`.
#[derive(Debug, Clone)]
pub struct CausalVerbExtractor {
    /// Lemma -> relation type.
    verbs: HashMap<String, String>,
}

impl Default for CausalVerbExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CausalVerbExtractor {
    /// Extractor with the built-in causal verb list.
    #[must_use]
    pub fn new() -> Self {
        let mut verbs = HashMap::new();
        for lemma in [
            "cause", "lead", "result", "trigger", "induce", "produce", "drive", "create",
            "bring",
        ] {
            verbs.insert(lemma.to_string(), "Causal".to_string());
        }
        for lemma in ["affect", "impact", "influence", "contribute", "worsen", "exacerbate"] {
            verbs.insert(lemma.to_string(), "Influence".to_string());
        }
        for lemma in ["prevent", "hinder", "block", "stop", "reduce"] {
            verbs.insert(lemma.to_string(), "Preventive".to_string());
        }
        Self { verbs }
    }

    /// Extractor with no verbs.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            verbs: HashMap::new(),
        }
    }

    /// Register `lemma` with a relation type.
    #[must_use]
    pub fn with_verb(mut self, lemma: impl Into<String>, relation_type: impl Into<String>) -> Self {
        self.verbs.insert(lemma.into(), relation_type.into());
        self
    }

    /// Relation type of a lemma, if causal.
    #[must_use]
    pub fn relation_type(&self, lemma: &str) -> Option<&str> {
        self.verbs.get(&lemma.to_lowercase()).map(String::as_str)
    }
}

impl CausalRelationExtractor for CausalVerbExtractor {
    fn extract(&self, input: &CausalInput<'_>) -> Vec<CausalCandidate> {
        let mut out = Vec::new();
        for indexed in &input.indexed.events {
            let Some(event) = input.classified.events.get(&indexed.span) else {
                continue;
            };
            let Some(relation_type) = self.relation_type(&event.lemma) else {
                continue;
            };
            let (Some(cause), Some(effect)) = (indexed.agent, indexed.patient) else {
                log::debug!(
                    "Causal trigger {:?} ({}) lacks a resolved agent or patient",
                    event.trigger,
                    indexed.id
                );
                continue;
            };
            out.push(CausalCandidate {
                trigger: event.trigger.clone(),
                relation_type: relation_type.to_string(),
                cause: CausalArgument {
                    text: event.agent.text.clone(),
                    id: cause,
                },
                effect: CausalArgument {
                    text: event.patient.text.clone(),
                    id: effect,
                },
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IndexRegistry;
    use sofia_core::{
        Entity, Event, EventOrigin, EventVariant, FrameMatch, IdNamespace, RoleFiller, Span,
    };

    fn sentence_with(lemma: &str, patient: Option<Span>) -> ClassifiedSentence {
        let mut classified = ClassifiedSentence::default();
        for (span, text) in [(Span::new(0, 4), "rain"), (Span::new(12, 20), "flooding")] {
            classified.entities.insert(
                span,
                Entity {
                    text: text.into(),
                    tokens: vec![text.into()],
                    location: String::new(),
                    temporal: String::new(),
                    qualifier: String::new(),
                },
            );
        }
        classified.events.insert(
            Span::new(5, 11),
            Event {
                trigger: "caused".into(),
                lemma: lemma.into(),
                frame: FrameMatch::new("Causation"),
                agent: RoleFiller::new(Span::new(0, 4), "rain"),
                patient: patient
                    .map(|span| RoleFiller::new(span, "flooding"))
                    .unwrap_or_default(),
                location: String::new(),
                temporal: String::new(),
                variant: EventVariant::Primary,
                origin: EventOrigin::Verb,
                token: Some(1),
            },
        );
        classified
    }

    fn run(classified: &ClassifiedSentence) -> Vec<CausalCandidate> {
        let indexed = IndexRegistry::new().index_sentence(classified);
        let scores = NodeScores::new();
        let input = CausalInput {
            sentence: "rain caused flooding",
            lemmas: &[],
            pos: &[],
            classified,
            indexed: &indexed,
            scores: &scores,
        };
        CausalVerbExtractor::new().extract(&input)
    }

    #[test]
    fn test_causal_verb_links_agent_to_patient() {
        let candidates = run(&sentence_with("cause", Some(Span::new(12, 20))));
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.trigger, "caused");
        assert_eq!(c.relation_type, "Causal");
        assert_eq!(c.cause.id, NodeId::new(IdNamespace::Entity, 1));
        assert_eq!(c.effect.id, NodeId::new(IdNamespace::Entity, 2));
        assert_eq!(c.effect.text, "flooding");
    }

    #[test]
    fn test_missing_patient_yields_nothing() {
        assert!(run(&sentence_with("cause", None)).is_empty());
    }

    #[test]
    fn test_non_causal_lemma_yields_nothing() {
        assert!(run(&sentence_with("see", Some(Span::new(12, 20)))).is_empty());
    }
}
