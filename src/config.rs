//! Pipeline configuration.
//!
//! Every field has a default matching Penn Treebank tags and Stanford-style
//! dependency labels, so `PipelineConfig::default()` works on CoreNLP output.
//! Configs can be loaded from JSON; absent fields keep their defaults.
//!
//! ```rust
//! use sofia::PipelineConfig;
//!
//! let config = PipelineConfig::default()
//!     .with_source("fews_net_2018")
//!     .with_refine_verbs(false);
//! assert_eq!(config.source, "fews_net_2018");
//! assert!(config.is_verb_tag("VBD"));
//! assert!(config.is_auxiliary("would"));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dependency labels consulted by the role resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleLabels {
    /// Labels marking the subject (agent).
    pub subject: Vec<String>,
    /// Labels marking a passive subject (patient of a passive verb).
    pub passive_subject: Vec<String>,
    /// Labels marking a direct object (patient).
    pub direct_object: Vec<String>,
    /// A label containing any of these substrings is a modifier (oblique/nominal).
    pub modifier_markers: Vec<String>,
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self {
            subject: vec!["nsubj".into()],
            passive_subject: vec!["nsubjpass".into(), "nsubj:pass".into()],
            direct_object: vec!["dobj".into(), "obj".into()],
            modifier_markers: vec!["nmod".into(), "obl".into()],
        }
    }
}

impl RoleLabels {
    /// Whether `label` is a subject label.
    #[must_use]
    pub fn is_subject(&self, label: &str) -> bool {
        self.subject.iter().any(|l| l == label)
    }

    /// Whether `label` is a passive-subject label.
    #[must_use]
    pub fn is_passive_subject(&self, label: &str) -> bool {
        self.passive_subject.iter().any(|l| l == label)
    }

    /// Whether `label` is a direct-object label.
    #[must_use]
    pub fn is_direct_object(&self, label: &str) -> bool {
        self.direct_object.iter().any(|l| l == label)
    }

    /// Whether `label` belongs to the modifier family.
    #[must_use]
    pub fn is_modifier(&self, label: &str) -> bool {
        self.modifier_markers.iter().any(|m| label.contains(m.as_str()))
    }
}

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source label stamped on every output record.
    pub source: String,
    /// POS tags that make a token a verb candidate.
    pub verb_tags: Vec<String>,
    /// Lemmas never treated as event triggers (auxiliaries and modals).
    pub auxiliaries: Vec<String>,
    /// Whether verb candidates must pass frame refinement.
    pub refine_verbs: bool,
    /// Dependency labels for role resolution.
    pub roles: RoleLabels,
    /// Lowercase entity trigger text and qualifier in output records.
    pub lowercase_entities: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: "userinput".into(),
            verb_tags: ["VB", "VBP", "VBD", "VBZ", "VBN", "VBG"]
                .into_iter()
                .map(String::from)
                .collect(),
            // "need" stays out: it is both a modal and a content verb.
            auxiliaries: [
                "be", "can", "could", "dare", "do", "have", "may", "might", "must", "ought",
                "shall", "should", "will", "would",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            refine_verbs: true,
            roles: RoleLabels::default(),
            lowercase_entities: true,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// IO errors, malformed JSON, or a config failing [`PipelineConfig::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded pipeline config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject configurations that can never produce events or roles.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the verb tag list or a role label list is empty.
    pub fn validate(&self) -> Result<()> {
        if self.verb_tags.is_empty() {
            return Err(Error::config("verb_tags must not be empty"));
        }
        let roles = &self.roles;
        for (name, labels) in [
            ("roles.subject", &roles.subject),
            ("roles.passive_subject", &roles.passive_subject),
            ("roles.direct_object", &roles.direct_object),
        ] {
            if labels.is_empty() {
                return Err(Error::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Set the source label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Enable or disable frame refinement of verb candidates.
    #[must_use]
    pub fn with_refine_verbs(mut self, refine: bool) -> Self {
        self.refine_verbs = refine;
        self
    }

    /// Replace the dependency labels.
    #[must_use]
    pub fn with_roles(mut self, roles: RoleLabels) -> Self {
        self.roles = roles;
        self
    }

    /// Toggle lowercasing of entity text in output.
    #[must_use]
    pub fn with_lowercase_entities(mut self, lowercase: bool) -> Self {
        self.lowercase_entities = lowercase;
        self
    }

    /// Whether `tag` marks a verb.
    #[must_use]
    pub fn is_verb_tag(&self, tag: &str) -> bool {
        self.verb_tags.iter().any(|t| t == tag)
    }

    /// Whether `lemma` is an auxiliary or modal.
    #[must_use]
    pub fn is_auxiliary(&self, lemma: &str) -> bool {
        self.auxiliaries.iter().any(|a| a == lemma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn modifier_family_matches_by_substring() {
        let roles = RoleLabels::default();
        assert!(roles.is_modifier("nmod"));
        assert!(roles.is_modifier("nmod:in"));
        assert!(roles.is_modifier("obl:agent"));
        assert!(!roles.is_modifier("amod"));
        assert!(roles.is_passive_subject("nsubj:pass"));
        assert!(!roles.is_subject("nsubjpass"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"source": "report.pdf", "refine_verbs": false}"#).unwrap();
        assert_eq!(config.source, "report.pdf");
        assert!(!config.refine_verbs);
        assert_eq!(config.verb_tags.len(), 6);
        assert_eq!(config.roles, RoleLabels::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"roles": {{"subject": ["nsubj", "csubj"]}}}}"#).unwrap();
        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert!(config.roles.is_subject("csubj"));
        assert!(config.roles.is_direct_object("dobj"));
    }

    #[test]
    fn rejects_empty_verb_tags() {
        let config = PipelineConfig {
            verb_tags: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
