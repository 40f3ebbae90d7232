//! Lexical-frame refinement.
//!
//! Whether a lemma denotes an event is decided by an external frame resource
//! (FrameNet, a curated frame inventory, a trained classifier...). The
//! pipeline only consumes the [`FrameRefiner`] contract: given the sentence,
//! a lemma and its word class, return the frame or `None`.
//!
//! [`LexiconFrameRefiner`] is a table-driven implementation with a small
//! built-in inventory oriented at food-security and disaster reporting.
//!
//! ```rust
//! use sofia::frames::{FrameRefiner, LexiconFrameRefiner, WordClass};
//!
//! let refiner = LexiconFrameRefiner::new();
//! let frame = refiner.refine("Rain caused floods.", "cause", WordClass::Verb).unwrap();
//! assert_eq!(frame.frame, "Causation");
//! assert!(refiner.refine("Rain caused floods.", "rain", WordClass::Noun).is_none());
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use sofia_core::FrameMatch;
use std::collections::HashMap;
use std::path::Path;

/// Word class a lemma is refined under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    /// Verbal reading.
    Verb,
    /// Nominal reading.
    Noun,
}

/// Classifies a lemma into a semantic frame.
pub trait FrameRefiner: Send + Sync {
    /// Frame of `lemma` read as `class` in `sentence`, or `None` if it is not an event.
    fn refine(&self, sentence: &str, lemma: &str, class: WordClass) -> Option<FrameMatch>;
}

/// On-disk lexicon layout: lemma -> frame, separately for verbs and nouns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameLexicon {
    /// Verbal readings.
    pub verbs: HashMap<String, FrameMatch>,
    /// Nominal readings.
    pub nouns: HashMap<String, FrameMatch>,
}

/// Table-driven frame refiner.
#[derive(Debug, Clone)]
pub struct LexiconFrameRefiner {
    lexicon: FrameLexicon,
}

impl Default for LexiconFrameRefiner {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconFrameRefiner {
    /// Create a refiner with the built-in inventory.
    #[must_use]
    pub fn new() -> Self {
        let mut verbs = HashMap::new();
        let mut nouns = HashMap::new();

        // === Causation ===
        for lemma in ["cause", "lead", "result", "trigger", "induce", "produce", "drive"] {
            verbs.insert(lemma.to_string(), frame("Causation", "Causation"));
        }
        for lemma in ["affect", "impact", "influence"] {
            verbs.insert(lemma.to_string(), frame("Objective_influence", "Objective_influence"));
        }
        verbs.insert("contribute".into(), frame("Contribution", "Contribution"));
        verbs.insert("prevent".into(), frame("Preventing", "Preventing_or_letting"));
        verbs.insert("hinder".into(), frame("Preventing", "Hindering"));

        // === Harm ===
        for lemma in ["harm", "damage", "hurt"] {
            verbs.insert(lemma.to_string(), frame("Damaging", "Damaging"));
        }
        verbs.insert("destroy".into(), frame("Destroying", "Destroying"));
        verbs.insert("kill".into(), frame("Killing", "Killing"));
        verbs.insert("suffer".into(), frame("Catastrophe", "Catastrophe"));
        verbs.insert("displace".into(), frame("Cause_motion", "Cause_motion"));
        verbs.insert("flood".into(), frame("Catastrophe", "Catastrophe"));

        // === Scalar change ===
        for lemma in ["increase", "raise", "reduce", "decrease", "lower", "boost"] {
            verbs.insert(
                lemma.to_string(),
                frame(
                    "Cause_change_of_position_on_a_scale",
                    "Cause_change_of_position_on_a_scale",
                ),
            );
        }
        for lemma in ["rise", "fall", "decline", "grow", "drop", "surge"] {
            verbs.insert(
                lemma.to_string(),
                frame("Change_position_on_a_scale", "Change_position_on_a_scale"),
            );
        }

        // === Need and occurrence ===
        verbs.insert("need".into(), frame("Needing", "Needing"));
        verbs.insert("require".into(), frame("Needing", "Needing"));
        verbs.insert("occur".into(), frame("Event", "Event"));
        verbs.insert("focus".into(), frame("Emphasizing", "Emphasizing"));
        verbs.insert("deliver".into(), frame("Delivery", "Delivery"));

        // === Nominal events ===
        for lemma in ["flooding", "flood", "drought", "famine", "earthquake", "outbreak"] {
            nouns.insert(lemma.to_string(), frame("Catastrophe", "Catastrophe"));
        }
        for lemma in ["hunger", "malnutrition", "starvation"] {
            nouns.insert(lemma.to_string(), frame("Biological_urge", "Biological_urge"));
        }
        for lemma in ["conflict", "war", "fighting", "attack"] {
            nouns.insert(lemma.to_string(), frame("Hostile_encounter", "Hostile_encounter"));
        }
        for lemma in ["increase", "decline", "rise", "drop"] {
            nouns.insert(
                lemma.to_string(),
                frame("Change_position_on_a_scale", "Change_position_on_a_scale"),
            );
        }
        nouns.insert("displacement".into(), frame("Cause_motion", "Cause_motion"));
        nouns.insert("death".into(), frame("Death", "Death"));
        nouns.insert("harvest".into(), frame("Agriculture", "Agriculture"));

        Self::from_lexicon(FrameLexicon { verbs, nouns })
    }

    /// Create a refiner over an explicit lexicon.
    #[must_use]
    pub fn from_lexicon(lexicon: FrameLexicon) -> Self {
        Self { lexicon }
    }

    /// An empty refiner: nothing is an event.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_lexicon(FrameLexicon::default())
    }

    /// Load a lexicon from a JSON file shaped like [`FrameLexicon`].
    ///
    /// # Errors
    ///
    /// IO errors and malformed JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let lexicon: FrameLexicon = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded frame lexicon from {} ({} verbs, {} nouns)",
            path.as_ref().display(),
            lexicon.verbs.len(),
            lexicon.nouns.len()
        );
        Ok(Self::from_lexicon(lexicon))
    }

    /// Add (or replace) an entry.
    pub fn insert(&mut self, lemma: impl Into<String>, class: WordClass, frame: FrameMatch) {
        let table = match class {
            WordClass::Verb => &mut self.lexicon.verbs,
            WordClass::Noun => &mut self.lexicon.nouns,
        };
        table.insert(lemma.into(), frame);
    }

    /// Builder form of [`LexiconFrameRefiner::insert`].
    #[must_use]
    pub fn with_entry(mut self, lemma: impl Into<String>, class: WordClass, frame: FrameMatch) -> Self {
        self.insert(lemma, class, frame);
        self
    }

    /// Number of entries across both word classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lexicon.verbs.len() + self.lexicon.nouns.len()
    }

    /// Whether the lexicon has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FrameRefiner for LexiconFrameRefiner {
    fn refine(&self, _sentence: &str, lemma: &str, class: WordClass) -> Option<FrameMatch> {
        let table = match class {
            WordClass::Verb => &self.lexicon.verbs,
            WordClass::Noun => &self.lexicon.nouns,
        };
        table.get(&lemma.to_lowercase()).cloned()
    }
}

fn frame(name: &str, framenet: &str) -> FrameMatch {
    FrameMatch::new(name).with_framenet(framenet)
}
