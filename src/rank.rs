//! Query relevance ranking.
//!
//! The pipeline never calls a ranker without an active query; with no query
//! every score is 0.0. Rankers therefore always receive a concrete query.

use crate::similarity::string_similarity;
use sofia_core::{Entity, Event, NodeId, SentenceAnnotation};
use std::collections::HashMap;

/// Relevance scores of the entities and events of one sentence, by ID.
pub type NodeScores = HashMap<NodeId, f64>;

/// A node handed to the ranker.
#[derive(Debug, Clone, Copy)]
pub enum RankNode<'a> {
    /// An entity.
    Entity(&'a Entity),
    /// An event.
    Event(&'a Event),
    /// A causal relation between two already-scored nodes.
    Relation {
        /// Scores of the sentence's nodes.
        scores: &'a NodeScores,
        /// Cause ID.
        cause: NodeId,
        /// Effect ID.
        effect: NodeId,
    },
}

/// Scores a node's relevance to a query.
pub trait RelevanceRanker: Send + Sync {
    /// Relevance of `node` (found in `sentence`) to `query`.
    fn rank(&self, node: RankNode<'_>, sentence: &str, query: &str) -> f64;

    /// Whether a sentence should be processed for `query`.
    ///
    /// The default selects sentences whose text or lemmas contain the query,
    /// case-insensitively.
    fn matches_sentence(&self, sentence: &SentenceAnnotation, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        if sentence.text.to_lowercase().contains(&query) {
            return true;
        }
        sentence
            .lemmas
            .as_ref()
            .is_some_and(|lemmas| lemmas.join(" ").to_lowercase().contains(&query))
    }
}

/// Ranks by word-level similarity between the query and a node's text.
///
/// - entities: similarity of the surface text
/// - events: the best of trigger, lemma and half-weighted role texts
/// - relations: the mean of the cause and effect scores
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOverlapRanker;

impl LexicalOverlapRanker {
    /// Create a ranker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RelevanceRanker for LexicalOverlapRanker {
    fn rank(&self, node: RankNode<'_>, _sentence: &str, query: &str) -> f64 {
        match node {
            RankNode::Entity(entity) => string_similarity(&entity.text, query),
            RankNode::Event(event) => {
                let core = string_similarity(&event.trigger, query)
                    .max(string_similarity(&event.lemma, query));
                let roles = string_similarity(&event.agent.text, query)
                    .max(string_similarity(&event.patient.text, query));
                core.max(roles * 0.5)
            }
            RankNode::Relation {
                scores,
                cause,
                effect,
            } => {
                let cause = scores.get(&cause).copied().unwrap_or(0.0);
                let effect = scores.get(&effect).copied().unwrap_or(0.0);
                (cause + effect) / 2.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofia_core::{EventOrigin, EventVariant, FrameMatch, IdNamespace, RoleFiller, Span};

    fn event() -> Event {
        Event {
            trigger: "caused".into(),
            lemma: "cause".into(),
            frame: FrameMatch::new("Causation"),
            agent: RoleFiller::new(Span::new(0, 16), "The intense rain"),
            patient: RoleFiller::new(Span::new(24, 32), "flooding"),
            location: String::new(),
            temporal: String::new(),
            variant: EventVariant::Primary,
            origin: EventOrigin::Verb,
            token: Some(3),
        }
    }

    #[test]
    fn test_event_prefers_trigger_over_roles() {
        let ranker = LexicalOverlapRanker::new();
        let e = event();
        assert!((ranker.rank(RankNode::Event(&e), "", "cause") - 1.0).abs() < 1e-9);
        assert!((ranker.rank(RankNode::Event(&e), "", "flooding") - 0.5).abs() < 1e-9);
        assert_eq!(ranker.rank(RankNode::Event(&e), "", "locusts"), 0.0);
    }

    #[test]
    fn test_relation_averages_endpoint_scores() {
        let cause = NodeId::new(IdNamespace::Entity, 1);
        let effect = NodeId::new(IdNamespace::Event, 1);
        let scores: NodeScores = [(cause, 0.8), (effect, 0.4)].into_iter().collect();
        let score = LexicalOverlapRanker.rank(
            RankNode::Relation {
                scores: &scores,
                cause,
                effect,
            },
            "",
            "rain",
        );
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_matches_sentence_on_text_or_lemmas() {
        let s = SentenceAnnotation::from_words(&[
            ("Prices", "NNS", "price"),
            ("rose", "VBD", "rise"),
        ]);
        let ranker = LexicalOverlapRanker;
        assert!(ranker.matches_sentence(&s, "PRICES"));
        assert!(ranker.matches_sentence(&s, "rise"));
        assert!(!ranker.matches_sentence(&s, "drought"));
        assert!(!ranker.matches_sentence(&s, "  "));
    }
}
