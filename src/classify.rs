//! Entity vs. event classification of candidate spans.
//!
//! Classification of one sentence runs three passes over an immutable view of
//! its annotations and produces a finished [`ClassifiedSentence`]:
//!
//! 1. **Noun phrases**, in chunk order. A chunk with an embedded nominalized
//!    event always yields an entity for the chunk, plus an event at the inner
//!    span when the event lemma has a verbal frame; that event's patient is
//!    the chunk itself. Any other chunk is an event if its head lemma has a
//!    nominal frame, otherwise an entity.
//! 2. **Verbs**, in token order. A verb-tagged, non-auxiliary token with a
//!    verbal frame becomes an event with roles from the [`RoleResolver`],
//!    unless its span already holds an event.
//! 3. **Variants**. An event whose agent or patient span is another event of
//!    the sentence is tagged [`EventVariant::ArgumentOfEvent`].
//!
//! Nothing is indexed here; IDs are issued afterwards by the registry.

use crate::config::PipelineConfig;
use crate::frames::{FrameRefiner, WordClass};
use crate::roles::RoleResolver;
use sofia_core::{
    Entity, Event, EventOrigin, EventVariant, FrameMatch, NounPhrase, RoleFiller, SentenceView,
    Span, SpanArena,
};
use std::collections::HashSet;

/// Classification result for one sentence.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedSentence {
    /// Entities by span, in classification order.
    pub entities: SpanArena<Entity>,
    /// Events by span, in classification order.
    pub events: SpanArena<Event>,
}

impl ClassifiedSentence {
    /// Events with the given variant, in classification order.
    pub fn events_with(&self, variant: EventVariant) -> impl Iterator<Item = (Span, &Event)> + '_ {
        self.events.iter().filter(move |(_, e)| e.variant == variant)
    }
}

/// Decides entity vs. event for every candidate span of a sentence.
pub struct SpanClassifier<'a> {
    refiner: &'a dyn FrameRefiner,
    roles: &'a RoleResolver,
    config: &'a PipelineConfig,
}

impl<'a> SpanClassifier<'a> {
    /// Create a classifier.
    #[must_use]
    pub fn new(
        refiner: &'a dyn FrameRefiner,
        roles: &'a RoleResolver,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            refiner,
            roles,
            config,
        }
    }

    /// Classify one sentence.
    #[must_use]
    pub fn classify(&self, sentence: &SentenceView<'_>) -> ClassifiedSentence {
        let mut classified = ClassifiedSentence::default();
        self.classify_noun_phrases(sentence, &mut classified);
        self.classify_verbs(sentence, &mut classified);
        assign_variants(&mut classified.events);
        log::debug!(
            "Sentence {}: {} entities, {} events",
            sentence.index,
            classified.entities.len(),
            classified.events.len()
        );
        classified
    }

    fn classify_noun_phrases(&self, sentence: &SentenceView<'_>, out: &mut ClassifiedSentence) {
        for np in sentence.noun_phrases {
            match &np.eventuality {
                Some(eventuality) => {
                    insert_entity(out, np, sentence);
                    let Some(frame) =
                        self.refiner
                            .refine(sentence.text, &eventuality.lemma, WordClass::Verb)
                    else {
                        continue;
                    };
                    let event = Event {
                        trigger: eventuality.text.clone(),
                        lemma: eventuality.lemma.clone(),
                        frame,
                        agent: RoleFiller::empty(),
                        patient: RoleFiller::new(np.span(), np.text.clone()),
                        location: sentence.location.to_string(),
                        temporal: sentence.temporal.to_string(),
                        variant: EventVariant::Primary,
                        origin: EventOrigin::Nominalization,
                        token: None,
                    };
                    insert_event(out, eventuality.span(), event);
                }
                None => match self
                    .refiner
                    .refine(sentence.text, &np.head_lemma, WordClass::Noun)
                {
                    Some(frame) => {
                        let event = Event {
                            trigger: np.text.clone(),
                            lemma: np.head_lemma.clone(),
                            frame,
                            agent: RoleFiller::empty(),
                            patient: RoleFiller::empty(),
                            location: sentence.location.to_string(),
                            temporal: sentence.temporal.to_string(),
                            variant: EventVariant::Primary,
                            origin: EventOrigin::NounPhrase,
                            token: None,
                        };
                        insert_event(out, np.span(), event);
                    }
                    None => insert_entity(out, np, sentence),
                },
            }
        }
    }

    fn classify_verbs(&self, sentence: &SentenceView<'_>, out: &mut ClassifiedSentence) {
        for (index, token) in sentence.tokens.iter().enumerate() {
            let (Some(pos), Some(lemma)) = (sentence.pos_at(index), sentence.lemma_at(index))
            else {
                log::debug!(
                    "Sentence {}: token {index} has no POS tag or lemma, skipped",
                    sentence.index
                );
                continue;
            };
            if !self.config.is_verb_tag(pos) || self.config.is_auxiliary(lemma) {
                continue;
            }

            let frame = if self.config.refine_verbs {
                match self.refiner.refine(sentence.text, lemma, WordClass::Verb) {
                    Some(frame) => frame,
                    None => continue,
                }
            } else {
                FrameMatch::default()
            };

            let span = token.span();
            if out.events.contains(&span) {
                log::debug!(
                    "Sentence {}: verb {:?} at {span} already registered as an event",
                    sentence.index,
                    token.text
                );
                continue;
            }

            let (agent, patient) =
                self.roles
                    .resolve(index, sentence.dependencies, sentence.noun_phrases);
            out.events.insert(
                span,
                Event {
                    trigger: token.text.clone(),
                    lemma: lemma.to_string(),
                    frame,
                    agent,
                    patient,
                    location: sentence.location.to_string(),
                    temporal: sentence.temporal.to_string(),
                    variant: EventVariant::Primary,
                    origin: EventOrigin::Verb,
                    token: Some(index),
                },
            );
        }
    }
}

fn insert_entity(out: &mut ClassifiedSentence, np: &NounPhrase, sentence: &SentenceView<'_>) {
    let entity = Entity {
        text: np.text.clone(),
        tokens: np.text.split_whitespace().map(String::from).collect(),
        location: sentence.location.to_string(),
        temporal: sentence.temporal.to_string(),
        qualifier: np.qualifier.clone(),
    };
    if !out.entities.insert(np.span(), entity) {
        log::debug!("Duplicate entity span {} ignored", np.span());
    }
}

fn insert_event(out: &mut ClassifiedSentence, span: Span, event: Event) {
    if !out.events.insert(span, event) {
        log::debug!("Duplicate event span {span} ignored");
    }
}

/// Tag events whose arguments point at other events of the same sentence.
fn assign_variants(events: &mut SpanArena<Event>) {
    let event_spans: HashSet<Span> = events.spans().collect();
    for (span, event) in events.iter_mut() {
        let refers_to_event = event
            .argument_spans()
            .any(|arg| arg != span && event_spans.contains(&arg));
        if refers_to_event {
            event.variant = EventVariant::ArgumentOfEvent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::LexiconFrameRefiner;
    use sofia_core::SentenceAnnotation;

    fn classify(sentence: &SentenceAnnotation, refiner: &LexiconFrameRefiner) -> ClassifiedSentence {
        let config = PipelineConfig::default();
        let roles = RoleResolver::new(config.roles.clone());
        let view = sentence.view(0).unwrap();
        SpanClassifier::new(refiner, &roles, &config).classify(&view)
    }

    fn rain_sentence() -> SentenceAnnotation {
        SentenceAnnotation::from_words(&[
            ("The", "DT", "the"),
            ("intense", "JJ", "intense"),
            ("rain", "NN", "rain"),
            ("caused", "VBD", "cause"),
            ("flooding", "NN", "flooding"),
            ("in", "IN", "in"),
            ("the", "DT", "the"),
            ("area", "NN", "area"),
        ])
        .with_dependency(4, 3, "nsubj")
        .with_dependency(4, 5, "dobj")
        .with_dependency(5, 8, "nmod:in")
        .with_noun_phrase_over(0..=2, "rain")
        .with_noun_phrase_over(4..=4, "flooding")
        .with_noun_phrase_over(6..=7, "area")
    }

    #[test]
    fn test_np_is_event_xor_entity() {
        let classified = classify(&rain_sentence(), &LexiconFrameRefiner::new());
        let entity_texts: Vec<_> = classified.entities.iter().map(|(_, e)| e.text.as_str()).collect();
        assert_eq!(entity_texts, vec!["The intense rain", "the area"]);

        let flooding = classified.events.get(&Span::new(24, 32)).unwrap();
        assert_eq!(flooding.origin, EventOrigin::NounPhrase);
        assert!(!classified.entities.contains(&Span::new(24, 32)));
    }

    #[test]
    fn test_verb_event_with_roles() {
        let classified = classify(&rain_sentence(), &LexiconFrameRefiner::new());
        let caused = classified.events.get(&Span::new(17, 23)).unwrap();
        assert_eq!(caused.trigger, "caused");
        assert_eq!(caused.frame.frame, "Causation");
        assert_eq!(caused.agent.text, "The intense rain");
        assert_eq!(caused.patient.text, "flooding");
        assert_eq!(caused.token, Some(3));
        // The patient is the "flooding" event, so "caused" argues over an event.
        assert_eq!(caused.variant, EventVariant::ArgumentOfEvent);
    }

    #[test]
    fn test_auxiliaries_and_unframed_verbs_are_skipped() {
        let s = SentenceAnnotation::from_words(&[
            ("Prices", "NNS", "price"),
            ("have", "VBP", "have"),
            ("climbed", "VBN", "climb"),
        ]);
        let classified = classify(&s, &LexiconFrameRefiner::new());
        assert!(classified.events.is_empty());
    }

    #[test]
    fn test_refinement_can_be_disabled_for_verbs() {
        let s = SentenceAnnotation::from_words(&[
            ("Prices", "NNS", "price"),
            ("have", "VBP", "have"),
            ("climbed", "VBN", "climb"),
        ]);
        let config = PipelineConfig::default().with_refine_verbs(false);
        let roles = RoleResolver::default();
        let refiner = LexiconFrameRefiner::empty();
        let view = s.view(0).unwrap();
        let classified = SpanClassifier::new(&refiner, &roles, &config).classify(&view);
        assert_eq!(classified.events.len(), 1);
        let (_, climbed) = classified.events.iter().next().unwrap();
        assert_eq!(climbed.trigger, "climbed");
        assert_eq!(climbed.frame, FrameMatch::default());
    }

    #[test]
    fn test_nominalization_yields_entity_and_inner_event() {
        let s = SentenceAnnotation::from_words(&[
            ("the", "DT", "the"),
            ("displacement", "NN", "displacement"),
            ("of", "IN", "of"),
            ("families", "NNS", "family"),
        ]);
        let inner = s.eventuality_at(1, "displace").unwrap();
        let np = s.chunk_over(0..=3, "displacement").unwrap().with_eventuality(inner);
        let s = s.with_noun_phrase(np);

        let classified = classify(&s, &LexiconFrameRefiner::new());
        let outer = Span::new(0, 28);
        assert!(classified.entities.contains(&outer));

        let event = classified.events.get(&Span::new(4, 16)).unwrap();
        assert_eq!(event.origin, EventOrigin::Nominalization);
        assert_eq!(event.lemma, "displace");
        assert_eq!(event.patient.span, Some(outer));
        assert_eq!(event.patient.text, "the displacement of families");
        assert_eq!(event.variant, EventVariant::Primary);
    }

    #[test]
    fn test_nominalization_without_verbal_frame_is_entity_only() {
        let s = SentenceAnnotation::from_words(&[("the", "DT", "the"), ("planting", "NN", "planting")]);
        let inner = s.eventuality_at(1, "plant").unwrap();
        let np = s.chunk_over(0..=1, "planting").unwrap().with_eventuality(inner);
        let s = s.with_noun_phrase(np);
        let classified = classify(&s, &LexiconFrameRefiner::new());
        assert_eq!(classified.entities.len(), 1);
        assert!(classified.events.is_empty());
    }

    #[test]
    fn test_verb_on_registered_event_span_is_suppressed() {
        // "flooding" tagged VBG and also chunked as an event noun phrase.
        let s = SentenceAnnotation::from_words(&[
            ("Rains", "NNS", "rain"),
            ("flooding", "VBG", "flood"),
        ])
        .with_noun_phrase_over(1..=1, "flooding");
        let classified = classify(&s, &LexiconFrameRefiner::new());
        assert_eq!(classified.events.len(), 1);
        let (_, event) = classified.events.iter().next().unwrap();
        assert_eq!(event.origin, EventOrigin::NounPhrase);
    }
}
