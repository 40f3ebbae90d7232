//! Output records.
//!
//! Four record shapes, each with its fields in export column order:
//!
//! | Record | Columns |
//! |--------|---------|
//! | [`VariableRecord`] | source, query, score, ID, sentence |
//! | [`EntityRecord`] | source, query, score, ID, trigger, frame, FrameNet, query-score, qualifier, sentence |
//! | [`EventRecord`] | source, query, score, ID, trigger, frame, FrameNet, query-score, location, temporal, agent ID, agent, patient ID, patient, sentence |
//! | [`CausalRecord`] | source, query, score, ID, trigger, relation type, query-score, cause, cause ID, effect, effect ID, sentence |
//!
//! An unresolved agent, patient, cause or effect ID serializes as `""`.

use crate::causal::CausalCandidate;
use crate::registry::{IndexedEntity, IndexedEvent, IndexedSentence};
use serde::{Serialize, Serializer};
use sofia_core::{Entity, Event, NodeId};

/// Per-sentence bookkeeping record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableRecord {
    /// Source label.
    pub source: String,
    /// Active query.
    pub query: Option<String>,
    /// Highest entity or event score of the sentence, or 0.0 when it has none.
    pub score: f64,
    /// Variable ID.
    pub id: NodeId,
    /// Sentence text.
    pub sentence: String,
}

/// An entity row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    /// Source label.
    pub source: String,
    /// Active query.
    pub query: Option<String>,
    /// Relevance score.
    pub score: f64,
    /// Entity ID.
    pub id: NodeId,
    /// Surface text.
    pub trigger: String,
    /// Frame (entities carry none).
    pub frame: String,
    /// FrameNet frame (entities carry none).
    pub framenet: Option<String>,
    /// Indicator string.
    pub query_score: String,
    /// Qualifier.
    pub qualifier: String,
    /// Sentence text.
    pub sentence: String,
}

/// An event row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Source label.
    pub source: String,
    /// Active query.
    pub query: Option<String>,
    /// Relevance score.
    pub score: f64,
    /// Event ID.
    pub id: NodeId,
    /// Trigger text.
    pub trigger: String,
    /// Frame.
    pub frame: String,
    /// FrameNet frame.
    pub framenet: Option<String>,
    /// Indicator string.
    pub query_score: String,
    /// Location tag.
    pub location: String,
    /// Temporal tag.
    pub temporal: String,
    /// Agent reference.
    #[serde(serialize_with = "id_or_empty")]
    pub agent_id: Option<NodeId>,
    /// Agent text.
    pub agent: String,
    /// Patient reference.
    #[serde(serialize_with = "id_or_empty")]
    pub patient_id: Option<NodeId>,
    /// Patient text.
    pub patient: String,
    /// Sentence text.
    pub sentence: String,
}

/// A causal relation row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalRecord {
    /// Source label.
    pub source: String,
    /// Active query.
    pub query: Option<String>,
    /// Relevance score.
    pub score: f64,
    /// Relation ID.
    pub id: NodeId,
    /// Trigger phrase.
    pub trigger: String,
    /// Relation type.
    pub relation_type: String,
    /// Indicator string.
    pub query_score: String,
    /// Cause text.
    pub cause: String,
    /// Cause ID.
    pub cause_id: NodeId,
    /// Effect text.
    pub effect: String,
    /// Effect ID.
    pub effect_id: NodeId,
    /// Sentence text.
    pub sentence: String,
}

/// Everything emitted for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceOutput {
    /// Zero-based sentence index in the document.
    pub index: usize,
    /// Variable record.
    pub variable: VariableRecord,
    /// Entity records in ID order.
    pub entities: Vec<EntityRecord>,
    /// Event records in ID order.
    pub events: Vec<EventRecord>,
    /// Causal relation records in ID order.
    pub relations: Vec<CausalRecord>,
}

impl SentenceOutput {
    /// Every entity and event ID emitted for the sentence.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entities
            .iter()
            .map(|e| e.id)
            .chain(self.events.iter().map(|e| e.id))
    }
}

fn id_or_empty<S: Serializer>(id: &Option<NodeId>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.collect_str(id),
        None => serializer.serialize_str(""),
    }
}

/// Builds records for one sentence, carrying the columns they share.
#[derive(Debug, Clone, Copy)]
pub struct OutputAssembler<'a> {
    source: &'a str,
    query: Option<&'a str>,
    sentence: &'a str,
    indicator: &'a str,
    lowercase_entities: bool,
}

impl<'a> OutputAssembler<'a> {
    /// Create an assembler for one sentence.
    #[must_use]
    pub fn new(source: &'a str, query: Option<&'a str>, sentence: &'a str) -> Self {
        Self {
            source,
            query,
            sentence,
            indicator: "",
            lowercase_entities: true,
        }
    }

    /// Set the indicator string copied into every query-score column.
    #[must_use]
    pub fn with_indicator(mut self, indicator: &'a str) -> Self {
        self.indicator = indicator;
        self
    }

    /// Toggle lowercasing of entity trigger and qualifier.
    #[must_use]
    pub fn with_lowercase_entities(mut self, lowercase: bool) -> Self {
        self.lowercase_entities = lowercase;
        self
    }

    fn query(&self) -> Option<String> {
        self.query.map(str::to_string)
    }

    fn entity_text(&self, text: &str) -> String {
        if self.lowercase_entities {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    /// Variable record.
    #[must_use]
    pub fn variable(&self, id: NodeId, score: f64) -> VariableRecord {
        VariableRecord {
            source: self.source.to_string(),
            query: self.query(),
            score,
            id,
            sentence: self.sentence.to_string(),
        }
    }

    /// Entity record.
    #[must_use]
    pub fn entity(&self, indexed: &IndexedEntity, entity: &Entity, score: f64) -> EntityRecord {
        EntityRecord {
            source: self.source.to_string(),
            query: self.query(),
            score,
            id: indexed.id,
            trigger: self.entity_text(&entity.text),
            frame: String::new(),
            framenet: None,
            query_score: self.indicator.to_string(),
            qualifier: self.entity_text(&entity.qualifier),
            sentence: self.sentence.to_string(),
        }
    }

    /// Event record.
    #[must_use]
    pub fn event(&self, indexed: &IndexedEvent, event: &Event, score: f64) -> EventRecord {
        EventRecord {
            source: self.source.to_string(),
            query: self.query(),
            score,
            id: indexed.id,
            trigger: event.trigger.clone(),
            frame: event.frame.frame.clone(),
            framenet: event.frame.framenet.clone(),
            query_score: self.indicator.to_string(),
            location: event.location.clone(),
            temporal: event.temporal.clone(),
            agent_id: indexed.agent,
            agent: event.agent.text.clone(),
            patient_id: indexed.patient,
            patient: event.patient.text.clone(),
            sentence: self.sentence.to_string(),
        }
    }

    /// Causal relation record.
    #[must_use]
    pub fn relation(&self, id: NodeId, candidate: &CausalCandidate, score: f64) -> CausalRecord {
        CausalRecord {
            source: self.source.to_string(),
            query: self.query(),
            score,
            id,
            trigger: candidate.trigger.clone(),
            relation_type: candidate.relation_type.clone(),
            query_score: self.indicator.to_string(),
            cause: candidate.cause.text.clone(),
            cause_id: candidate.cause.id,
            effect: candidate.effect.text.clone(),
            effect_id: candidate.effect.id,
            sentence: self.sentence.to_string(),
        }
    }
}

/// Drop candidates whose cause or effect was not emitted for the sentence.
#[must_use]
pub fn retain_emitted(candidates: Vec<CausalCandidate>, indexed: &IndexedSentence) -> Vec<CausalCandidate> {
    candidates
        .into_iter()
        .filter(|c| {
            let keep = indexed.emitted(c.cause.id) && indexed.emitted(c.effect.id);
            if !keep {
                log::warn!(
                    "Dropping causal candidate {:?}: {} -> {} not emitted for {}",
                    c.trigger,
                    c.cause.id,
                    c.effect.id,
                    indexed.variable
                );
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::causal::CausalArgument;
    use crate::classify::ClassifiedSentence;
    use crate::registry::IndexRegistry;
    use sofia_core::{EventOrigin, EventVariant, FrameMatch, IdNamespace, RoleFiller, Span};

    fn event() -> Event {
        Event {
            trigger: "caused".into(),
            lemma: "cause".into(),
            frame: FrameMatch::new("Causation").with_framenet("Causation"),
            agent: RoleFiller::new(Span::new(0, 4), "Rain"),
            patient: RoleFiller::empty(),
            location: "Somalia".into(),
            temporal: "2017".into(),
            variant: EventVariant::Primary,
            origin: EventOrigin::Verb,
            token: Some(1),
        }
    }

    #[test]
    fn test_event_record_serializes_in_column_order() {
        let indexed = IndexedEvent {
            id: NodeId::new(IdNamespace::Event, 4),
            span: Span::new(5, 11),
            variant: EventVariant::Primary,
            agent: Some(NodeId::new(IdNamespace::Entity, 2)),
            patient: None,
        };
        let record = OutputAssembler::new("userinput", None, "Rain caused it.")
            .event(&indexed, &event(), 0.0);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"source":"userinput","query":null,"score":0.0,"id":"E4","trigger":"caused","frame":"Causation","framenet":"Causation","query_score":"","location":"Somalia","temporal":"2017","agent_id":"N2","agent":"Rain","patient_id":"","patient":"","sentence":"Rain caused it."}"#
        );
    }

    #[test]
    fn test_entity_text_is_lowercased() {
        let entity = Entity {
            text: "The Intense Rain".into(),
            tokens: vec![],
            location: String::new(),
            temporal: String::new(),
            qualifier: "Intense".into(),
        };
        let indexed = IndexedEntity {
            id: NodeId::new(IdNamespace::Entity, 1),
            span: Span::new(0, 16),
        };
        let assembler = OutputAssembler::new("doc", Some("rain"), "s").with_indicator("WB:0.4");
        let record = assembler.entity(&indexed, &entity, 0.8);
        assert_eq!(record.trigger, "the intense rain");
        assert_eq!(record.qualifier, "intense");
        assert_eq!(record.query.as_deref(), Some("rain"));
        assert_eq!(record.query_score, "WB:0.4");

        let kept = assembler.with_lowercase_entities(false).entity(&indexed, &entity, 0.8);
        assert_eq!(kept.trigger, "The Intense Rain");
    }

    #[test]
    fn test_retain_emitted_drops_dangling_ids() {
        let mut classified = ClassifiedSentence::default();
        classified.events.insert(Span::new(5, 11), event());
        let indexed = IndexRegistry::new().index_sentence(&classified);
        let candidate = |cause: NodeId| CausalCandidate {
            trigger: "caused".into(),
            relation_type: "Causal".into(),
            cause: CausalArgument {
                text: "rain".into(),
                id: cause,
            },
            effect: CausalArgument {
                text: "it".into(),
                id: NodeId::new(IdNamespace::Event, 1),
            },
        };
        let kept = retain_emitted(
            vec![
                candidate(NodeId::new(IdNamespace::Event, 1)),
                candidate(NodeId::new(IdNamespace::Entity, 9)),
            ],
            &indexed,
        );
        assert_eq!(kept.len(), 1);
    }
}
