//! Linguistic records produced by span classification.

use crate::Span;
use serde::{Deserialize, Serialize};

/// Frame assigned to a lemma by the lexical-frame refiner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMatch {
    /// Frame label used for the record ("Causation", "Weather", ...).
    pub frame: String,
    /// Matching FrameNet frame, when the refiner knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framenet: Option<String>,
}

impl FrameMatch {
    /// A frame with no FrameNet counterpart.
    #[must_use]
    pub fn new(frame: impl Into<String>) -> Self {
        Self {
            frame: frame.into(),
            framenet: None,
        }
    }

    /// Attach the FrameNet label.
    #[must_use]
    pub fn with_framenet(mut self, framenet: impl Into<String>) -> Self {
        self.framenet = Some(framenet.into());
        self
    }
}

/// A resolved semantic role: the span it points at plus its display text.
///
/// An unresolved role has no span and empty text; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFiller {
    /// Span of the record the role refers to.
    pub span: Option<Span>,
    /// Display text.
    pub text: String,
}

impl RoleFiller {
    /// A role pointing at `span`.
    #[must_use]
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span: Some(span),
            text: text.into(),
        }
    }

    /// An unresolved role.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the role resolved to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_none() && self.text.is_empty()
    }
}

/// A non-event noun phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text.
    pub text: String,
    /// Surface tokens.
    pub tokens: Vec<String>,
    /// Sentence location tag.
    pub location: String,
    /// Sentence temporal tag.
    pub temporal: String,
    /// Qualifier text.
    pub qualifier: String,
}

/// Whether an event's arguments are entities or other events.
///
/// Fixed once at classification time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventVariant {
    /// Arguments resolve against entities.
    #[default]
    Primary,
    /// At least one argument is itself an event of the same sentence.
    ArgumentOfEvent,
}

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventOrigin {
    /// A verb token.
    Verb,
    /// A noun-phrase chunk whose head lemma is an event noun.
    NounPhrase,
    /// A nominalized event embedded in a noun-phrase chunk.
    Nominalization,
}

/// An event mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Trigger text.
    pub trigger: String,
    /// Trigger lemma.
    pub lemma: String,
    /// Refined frame.
    pub frame: FrameMatch,
    /// Agent role.
    pub agent: RoleFiller,
    /// Patient role.
    pub patient: RoleFiller,
    /// Sentence location tag.
    pub location: String,
    /// Sentence temporal tag.
    pub temporal: String,
    /// Argument variant.
    pub variant: EventVariant,
    /// Origin of the mention.
    pub origin: EventOrigin,
    /// 0-based trigger token for verb events.
    pub token: Option<usize>,
}

impl Event {
    /// Spans this event's roles point at, agent first.
    pub fn argument_spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.agent.span.into_iter().chain(self.patient.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_filler_emptiness() {
        assert!(RoleFiller::empty().is_empty());
        assert!(!RoleFiller::new(Span::new(0, 4), "rain").is_empty());
    }

    #[test]
    fn argument_spans_lists_agent_then_patient() {
        let event = Event {
            trigger: "caused".into(),
            lemma: "cause".into(),
            frame: FrameMatch::new("Causation").with_framenet("Causation"),
            agent: RoleFiller::new(Span::new(0, 16), "The intense rain"),
            patient: RoleFiller::new(Span::new(24, 32), "flooding"),
            location: String::new(),
            temporal: String::new(),
            variant: EventVariant::Primary,
            origin: EventOrigin::Verb,
            token: Some(3),
        };
        let spans: Vec<_> = event.argument_spans().collect();
        assert_eq!(spans, vec![Span::new(0, 16), Span::new(24, 32)]);
    }
}
