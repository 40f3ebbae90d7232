//! Agent/patient resolution for verb-anchored events.
//!
//! Resolution runs in two steps:
//!
//! 1. [`RoleResolver::gather`] collects the dependent words of the event's
//!    governor token, grouped by relation label, and applies the role rules
//!    in a fixed order: subject -> agent; passive subject (else direct
//!    object) -> patient; then, if the patient is still empty or the verb is
//!    passive, the first modifier-family relation fills the missing role.
//! 2. [`RoleResolver::ground`] maps those words onto noun-phrase chunks by
//!    substring containment and produces the display text and span.
//!
//! A term that matches no chunk simply contributes nothing; an event with no
//! resolvable roles gets empty roles.
//!
//! ```rust
//! use sofia::roles::RoleResolver;
//! use sofia_core::SentenceAnnotation;
//!
//! // "Crops were destroyed by locusts"
//! let s = SentenceAnnotation::from_words(&[
//!     ("Crops", "NNS", "crop"),
//!     ("were", "VBD", "be"),
//!     ("destroyed", "VBN", "destroy"),
//!     ("by", "IN", "by"),
//!     ("locusts", "NNS", "locust"),
//! ])
//! .with_dependency(3, 1, "nsubjpass")
//! .with_dependency(3, 5, "nmod:agent")
//! .with_noun_phrase_over(0..=0, "crop")
//! .with_noun_phrase_over(4..=4, "locust");
//!
//! let view = s.view(0).unwrap();
//! let resolver = RoleResolver::default();
//! let (agent, patient) = resolver.resolve(2, view.dependencies, view.noun_phrases);
//! assert_eq!(agent.text, "locusts");
//! assert_eq!(patient.text, "Crops");
//! ```

use crate::config::RoleLabels;
use sofia_core::{Dependency, NounPhrase, RoleFiller};

/// Raw role words before grounding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTerms {
    /// Agent words.
    pub agent: Vec<String>,
    /// Patient words.
    pub patient: Vec<String>,
    /// Whether a passive-subject relation was present.
    pub passive: bool,
}

/// Resolves agent and patient of verb events from dependency edges.
#[derive(Debug, Clone, Default)]
pub struct RoleResolver {
    labels: RoleLabels,
}

impl RoleResolver {
    /// Create a resolver over the given labels.
    #[must_use]
    pub fn new(labels: RoleLabels) -> Self {
        Self { labels }
    }

    /// Agent and patient of the verb at 0-based `token`, grounded on `noun_phrases`.
    #[must_use]
    pub fn resolve(
        &self,
        token: usize,
        dependencies: &[Dependency],
        noun_phrases: &[NounPhrase],
    ) -> (RoleFiller, RoleFiller) {
        let terms = self.gather(token + 1, dependencies);
        (
            self.ground(&terms.agent, noun_phrases),
            self.ground(&terms.patient, noun_phrases),
        )
    }

    /// Role words for the 1-based `governor`.
    #[must_use]
    pub fn gather(&self, governor: usize, dependencies: &[Dependency]) -> RoleTerms {
        let groups = group_by_relation(governor, dependencies);
        if groups.is_empty() {
            log::debug!("No dependents governed by token {governor}; roles stay empty");
            return RoleTerms::default();
        }

        let mut terms = RoleTerms {
            agent: collect(&groups, |label| self.labels.is_subject(label)),
            ..RoleTerms::default()
        };

        let passive_patient = collect(&groups, |label| self.labels.is_passive_subject(label));
        if groups
            .iter()
            .any(|(label, _)| self.labels.is_passive_subject(label))
        {
            terms.patient = passive_patient;
            terms.passive = true;
        } else {
            terms.patient = collect(&groups, |label| self.labels.is_direct_object(label));
        }

        if terms.patient.is_empty() || terms.passive {
            let modifier = groups
                .iter()
                .find(|(label, _)| self.labels.is_modifier(label));
            if let Some((_, dependents)) = modifier {
                if terms.passive && terms.agent.is_empty() {
                    terms.agent = dependents.clone();
                } else if terms.patient.is_empty() {
                    terms.patient = dependents.clone();
                }
            }
        }

        terms
    }

    /// Map role words onto noun-phrase chunks.
    ///
    /// Chunks are scanned in span order (start, then end). Each word binds to
    /// the first chunk whose surface text contains it; distinct chunks are
    /// joined with `", "` in binding order and the filler's span is the span
    /// of the first bound chunk.
    #[must_use]
    pub fn ground(&self, terms: &[String], noun_phrases: &[NounPhrase]) -> RoleFiller {
        if terms.is_empty() {
            return RoleFiller::empty();
        }

        let mut ordered: Vec<&NounPhrase> = noun_phrases.iter().collect();
        ordered.sort_by_key(|np| np.span());

        let mut bound: Vec<&NounPhrase> = Vec::new();
        for term in terms.iter().filter(|t| !t.is_empty()) {
            match ordered.iter().find(|np| np.text.contains(term.as_str())) {
                Some(&np) => {
                    if !bound.iter().any(|b| b.span() == np.span()) {
                        bound.push(np);
                    }
                }
                None => log::debug!("Role term {term:?} matches no noun phrase"),
            }
        }

        match bound.first() {
            Some(first) => RoleFiller::new(
                first.span(),
                bound
                    .iter()
                    .map(|np| np.text.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            None => RoleFiller::empty(),
        }
    }
}

/// Dependents of `governor`, grouped by relation label in order of first appearance.
fn group_by_relation(governor: usize, dependencies: &[Dependency]) -> Vec<(&str, Vec<String>)> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for dep in dependencies.iter().filter(|d| d.governor == governor) {
        match groups.iter_mut().find(|(label, _)| *label == dep.relation) {
            Some((_, dependents)) => dependents.push(dep.dependent_text.clone()),
            None => groups.push((dep.relation.as_str(), vec![dep.dependent_text.clone()])),
        }
    }
    groups
}

fn collect(groups: &[(&str, Vec<String>)], keep: impl Fn(&str) -> bool) -> Vec<String> {
    groups
        .iter()
        .filter(|(label, _)| keep(*label))
        .flat_map(|(_, dependents)| dependents.iter().cloned())
        .collect()
}
