//! Document-scoped identifier issuance and cross-reference resolution.
//!
//! One [`IndexRegistry`] lives for one document run. It owns four counters
//! (entity, event, relation, variable), each starting at 1, and hands out IDs
//! as sentences are indexed in document order. Indexing a sentence:
//!
//! 1. issues the sentence's variable ID;
//! 2. issues entity IDs in classification order;
//! 3. issues IDs for primary events and resolves their roles against entities;
//! 4. issues IDs for argument-of-event events, then resolves their roles
//!    against events first and entities second.
//!
//! Step 4 issues every ID before resolving anything, so an argument event may
//! point at a primary event or at another argument event regardless of the
//! order they were classified in.

use crate::classify::ClassifiedSentence;
use sofia_core::{EventVariant, IdNamespace, NodeId, Span};
use std::collections::HashMap;

/// Span -> ID map for one namespace of one sentence.
pub type SpanIds = HashMap<Span, NodeId>;

/// An entity with its issued ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEntity {
    /// Issued ID.
    pub id: NodeId,
    /// Span of the entity.
    pub span: Span,
}

/// An event with its issued ID and resolved role references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEvent {
    /// Issued ID.
    pub id: NodeId,
    /// Span of the event.
    pub span: Span,
    /// Variant the event was indexed under.
    pub variant: EventVariant,
    /// ID the agent resolved to.
    pub agent: Option<NodeId>,
    /// ID the patient resolved to.
    pub patient: Option<NodeId>,
}

/// Result of indexing one sentence.
#[derive(Debug, Clone)]
pub struct IndexedSentence {
    /// The sentence's variable ID.
    pub variable: NodeId,
    /// Entities in ID order.
    pub entities: Vec<IndexedEntity>,
    /// Events in ID order (primary first, then argument-of-event).
    pub events: Vec<IndexedEvent>,
    /// Entity span -> ID.
    pub entity_ids: SpanIds,
    /// Event span -> ID.
    pub event_ids: SpanIds,
}

impl IndexedSentence {
    /// Whether `id` names an entity or event emitted for this sentence.
    #[must_use]
    pub fn emitted(&self, id: NodeId) -> bool {
        match id.namespace() {
            IdNamespace::Entity => self.entities.iter().any(|e| e.id == id),
            IdNamespace::Event => self.events.iter().any(|e| e.id == id),
            IdNamespace::Relation | IdNamespace::Variable => false,
        }
    }

    /// ID of the entity or event at `span`, events first.
    #[must_use]
    pub fn node_at(&self, span: Span) -> Option<NodeId> {
        IndexRegistry::resolve_reference(Some(span), &[&self.event_ids, &self.entity_ids])
    }
}

/// Issues stable IDs for one document.
#[derive(Debug, Clone, Default)]
pub struct IndexRegistry {
    /// Last issued ordinal per namespace, in [`IdNamespace::ALL`] order.
    issued: [u64; 4],
}

impl IndexRegistry {
    /// A registry with every counter at its start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new document run.
    pub fn reset(&mut self) {
        log::debug!("Resetting index registry (issued: {:?})", self.issued);
        self.issued = [0; 4];
    }

    /// Number of IDs issued so far in `namespace`.
    #[must_use]
    pub fn issued(&self, namespace: IdNamespace) -> u64 {
        self.issued[slot(namespace)]
    }

    /// Issue the next relation ID.
    pub fn next_relation(&mut self) -> NodeId {
        self.next(IdNamespace::Relation)
    }

    fn next(&mut self, namespace: IdNamespace) -> NodeId {
        let counter = &mut self.issued[slot(namespace)];
        *counter += 1;
        NodeId::new(namespace, *counter)
    }

    /// Look `span` up in each map in turn; the first hit wins.
    ///
    /// A missing span or a miss in every map yields `None`.
    #[must_use]
    pub fn resolve_reference(span: Option<Span>, maps: &[&SpanIds]) -> Option<NodeId> {
        let span = span?;
        maps.iter().find_map(|map| map.get(&span).copied())
    }

    /// Issue IDs for one classified sentence and resolve its role references.
    pub fn index_sentence(&mut self, sentence: &ClassifiedSentence) -> IndexedSentence {
        let variable = self.next(IdNamespace::Variable);

        let mut entity_ids = SpanIds::with_capacity(sentence.entities.len());
        let entities: Vec<IndexedEntity> = sentence
            .entities
            .spans()
            .map(|span| {
                let id = self.next(IdNamespace::Entity);
                entity_ids.insert(span, id);
                IndexedEntity { id, span }
            })
            .collect();

        let mut event_ids = SpanIds::with_capacity(sentence.events.len());
        let mut events = Vec::with_capacity(sentence.events.len());

        // Pass 1: primary events resolve against entities only.
        for (span, event) in sentence.events_with(EventVariant::Primary) {
            let id = self.next(IdNamespace::Event);
            event_ids.insert(span, id);
            events.push(IndexedEvent {
                id,
                span,
                variant: EventVariant::Primary,
                agent: Self::resolve_reference(event.agent.span, &[&entity_ids]),
                patient: Self::resolve_reference(event.patient.span, &[&entity_ids]),
            });
        }

        // Pass 2: issue every argument-of-event ID, then resolve.
        let secondary: Vec<(Span, NodeId)> = sentence
            .events_with(EventVariant::ArgumentOfEvent)
            .map(|(span, _)| {
                let id = self.next(IdNamespace::Event);
                event_ids.insert(span, id);
                (span, id)
            })
            .collect();
        for (span, id) in secondary {
            let Some(event) = sentence.events.get(&span) else {
                continue;
            };
            let maps = [&event_ids, &entity_ids];
            let agent = Self::resolve_reference(event.agent.span, &maps);
            let patient = Self::resolve_reference(event.patient.span, &maps);
            if agent.is_none() && patient.is_none() {
                log::debug!("Argument event {id} at {span} resolved no references");
            }
            events.push(IndexedEvent {
                id,
                span,
                variant: EventVariant::ArgumentOfEvent,
                agent,
                patient,
            });
        }

        log::debug!(
            "Indexed {variable}: {} entities, {} events",
            entities.len(),
            events.len()
        );

        IndexedSentence {
            variable,
            entities,
            events,
            entity_ids,
            event_ids,
        }
    }
}

fn slot(namespace: IdNamespace) -> usize {
    match namespace {
        IdNamespace::Entity => 0,
        IdNamespace::Event => 1,
        IdNamespace::Relation => 2,
        IdNamespace::Variable => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofia_core::{Entity, Event, EventOrigin, FrameMatch, RoleFiller};

    fn entity(text: &str) -> Entity {
        Entity {
            text: text.into(),
            tokens: text.split_whitespace().map(String::from).collect(),
            location: String::new(),
            temporal: String::new(),
            qualifier: String::new(),
        }
    }

    fn event(trigger: &str, variant: EventVariant, agent: Option<Span>, patient: Option<Span>) -> Event {
        let filler = |span: Option<Span>| match span {
            Some(span) => RoleFiller::new(span, "x"),
            None => RoleFiller::empty(),
        };
        Event {
            trigger: trigger.into(),
            lemma: trigger.into(),
            frame: FrameMatch::new("Event"),
            agent: filler(agent),
            patient: filler(patient),
            location: String::new(),
            temporal: String::new(),
            variant,
            origin: EventOrigin::Verb,
            token: None,
        }
    }

    fn id(namespace: IdNamespace, ordinal: u64) -> NodeId {
        NodeId::new(namespace, ordinal)
    }

    #[test]
    fn test_counters_start_at_one_and_persist_across_sentences() {
        let mut classified = ClassifiedSentence::default();
        classified.entities.insert(Span::new(0, 4), entity("rain"));
        classified.entities.insert(Span::new(10, 14), entity("area"));
        classified
            .events
            .insert(Span::new(5, 9), event("hit", EventVariant::Primary, Some(Span::new(0, 4)), None));

        let mut registry = IndexRegistry::new();
        let first = registry.index_sentence(&classified);
        let second = registry.index_sentence(&classified);

        assert_eq!(first.variable, id(IdNamespace::Variable, 1));
        assert_eq!(second.variable, id(IdNamespace::Variable, 2));
        assert_eq!(
            first.entities.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![id(IdNamespace::Entity, 1), id(IdNamespace::Entity, 2)]
        );
        assert_eq!(second.entities[0].id, id(IdNamespace::Entity, 3));
        assert_eq!(second.events[0].id, id(IdNamespace::Event, 2));
        assert_eq!(second.events[0].agent, Some(id(IdNamespace::Entity, 3)));
        assert_eq!(registry.issued(IdNamespace::Relation), 0);
    }

    #[test]
    fn test_argument_event_resolves_to_primary_regardless_of_order() {
        let flooding = Span::new(24, 32);
        let mut classified = ClassifiedSentence::default();
        classified.entities.insert(Span::new(0, 16), entity("The intense rain"));
        // Classified before the event it points at.
        classified.events.insert(
            Span::new(17, 23),
            event("caused", EventVariant::ArgumentOfEvent, Some(Span::new(0, 16)), Some(flooding)),
        );
        classified
            .events
            .insert(flooding, event("flooding", EventVariant::Primary, None, None));

        let indexed = IndexRegistry::new().index_sentence(&classified);
        let caused = indexed.events.iter().find(|e| e.span == Span::new(17, 23)).unwrap();
        assert_eq!(indexed.events[0].span, flooding);
        assert_eq!(caused.id, id(IdNamespace::Event, 2));
        assert_eq!(caused.patient, Some(id(IdNamespace::Event, 1)));
        assert_eq!(caused.agent, Some(id(IdNamespace::Entity, 1)));
    }

    #[test]
    fn test_argument_events_may_reference_each_other() {
        let a = Span::new(0, 3);
        let b = Span::new(10, 13);
        let mut classified = ClassifiedSentence::default();
        classified
            .events
            .insert(a, event("a", EventVariant::ArgumentOfEvent, None, Some(b)));
        classified
            .events
            .insert(b, event("b", EventVariant::ArgumentOfEvent, Some(a), None));

        let indexed = IndexRegistry::new().index_sentence(&classified);
        assert_eq!(indexed.events[0].patient, Some(indexed.events[1].id));
        assert_eq!(indexed.events[1].agent, Some(indexed.events[0].id));
    }

    #[test]
    fn test_argument_event_prefers_event_over_entity_at_same_span() {
        // "floods" is both an entity and a nominal event.
        let floods = Span::new(0, 6);
        let mut classified = ClassifiedSentence::default();
        classified.entities.insert(floods, entity("floods"));
        classified
            .events
            .insert(floods, event("floods", EventVariant::Primary, None, None));
        classified.events.insert(
            Span::new(7, 14),
            event("damaged", EventVariant::ArgumentOfEvent, Some(floods), None),
        );

        let indexed = IndexRegistry::new().index_sentence(&classified);
        let damaged = indexed
            .events
            .iter()
            .find(|e| e.variant == EventVariant::ArgumentOfEvent)
            .unwrap();
        assert_eq!(damaged.agent, Some(id(IdNamespace::Event, 1)));
        assert_ne!(damaged.agent, Some(id(IdNamespace::Entity, 1)));
    }

    #[test]
    fn test_primary_miss_is_none() {
        let mut classified = ClassifiedSentence::default();
        classified.events.insert(
            Span::new(5, 9),
            event("hit", EventVariant::Primary, Some(Span::new(40, 44)), None),
        );
        let indexed = IndexRegistry::new().index_sentence(&classified);
        assert_eq!(indexed.events[0].agent, None);
        assert_eq!(indexed.events[0].patient, None);
    }

    #[test]
    fn test_reset_restarts_every_namespace() {
        let mut registry = IndexRegistry::new();
        registry.index_sentence(&ClassifiedSentence::default());
        registry.next_relation();
        assert_eq!(registry.issued(IdNamespace::Variable), 1);
        registry.reset();
        for ns in IdNamespace::ALL {
            assert_eq!(registry.issued(ns), 0);
        }
        assert_eq!(registry.next_relation(), id(IdNamespace::Relation, 1));
    }

    #[test]
    fn test_emitted_and_node_at() {
        let mut classified = ClassifiedSentence::default();
        classified.entities.insert(Span::new(0, 4), entity("rain"));
        classified
            .events
            .insert(Span::new(0, 4), event("rain", EventVariant::Primary, None, None));
        let indexed = IndexRegistry::new().index_sentence(&classified);
        assert!(indexed.emitted(id(IdNamespace::Entity, 1)));
        assert!(!indexed.emitted(id(IdNamespace::Entity, 2)));
        assert_eq!(indexed.node_at(Span::new(0, 4)), Some(id(IdNamespace::Event, 1)));
        assert_eq!(
            IndexRegistry::resolve_reference(None, &[&indexed.entity_ids]),
            None
        );
    }
}
