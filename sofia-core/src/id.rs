//! Document-scoped identifiers.
//!
//! Four independent namespaces are issued per document. Each renders with a
//! one-letter prefix followed by its ordinal: `N3` (entity), `E1` (event),
//! `R2` (causal relation), `V5` (variable).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IdNamespace {
    /// Entities (`N`).
    Entity,
    /// Events (`E`).
    Event,
    /// Causal relations (`R`).
    Relation,
    /// Per-sentence variables (`V`).
    Variable,
}

impl IdNamespace {
    /// All namespaces, in counter order.
    pub const ALL: [IdNamespace; 4] = [
        IdNamespace::Entity,
        IdNamespace::Event,
        IdNamespace::Relation,
        IdNamespace::Variable,
    ];

    /// Prefix used in the rendered ID.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            IdNamespace::Entity => 'N',
            IdNamespace::Event => 'E',
            IdNamespace::Relation => 'R',
            IdNamespace::Variable => 'V',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'N' => Some(IdNamespace::Entity),
            'E' => Some(IdNamespace::Event),
            'R' => Some(IdNamespace::Relation),
            'V' => Some(IdNamespace::Variable),
            _ => None,
        }
    }
}

/// A stable identifier issued by the index registry.
///
/// Ordinals start at 1 within a document run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId {
    namespace: IdNamespace,
    ordinal: u64,
}

impl NodeId {
    /// Create an identifier.
    #[must_use]
    pub const fn new(namespace: IdNamespace, ordinal: u64) -> Self {
        Self { namespace, ordinal }
    }

    /// Namespace this ID belongs to.
    #[must_use]
    pub const fn namespace(&self) -> IdNamespace {
        self.namespace
    }

    /// Ordinal within the namespace.
    #[must_use]
    pub const fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Whether this ID names an entity or an event.
    #[must_use]
    pub const fn is_node(&self) -> bool {
        matches!(self.namespace, IdNamespace::Entity | IdNamespace::Event)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace.prefix(), self.ordinal)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let namespace = chars
            .next()
            .and_then(IdNamespace::from_prefix)
            .ok_or_else(|| Error::parse(format!("unknown ID prefix in {s:?}")))?;
        let ordinal: u64 = chars
            .as_str()
            .parse()
            .map_err(|_| Error::parse(format!("invalid ID ordinal in {s:?}")))?;
        if ordinal == 0 {
            return Err(Error::parse(format!("ID ordinals start at 1, got {s:?}")));
        }
        Ok(Self::new(namespace, ordinal))
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_namespace_prefix() {
        assert_eq!(NodeId::new(IdNamespace::Entity, 3).to_string(), "N3");
        assert_eq!(NodeId::new(IdNamespace::Event, 1).to_string(), "E1");
        assert_eq!(NodeId::new(IdNamespace::Relation, 12).to_string(), "R12");
        assert_eq!(NodeId::new(IdNamespace::Variable, 2).to_string(), "V2");
    }

    #[test]
    fn parses_rendered_form() {
        let id: NodeId = "E7".parse().unwrap();
        assert_eq!(id.namespace(), IdNamespace::Event);
        assert_eq!(id.ordinal(), 7);
        assert!(id.is_node());
        assert!("X1".parse::<NodeId>().is_err());
        assert!("N0".parse::<NodeId>().is_err());
        assert!("N".parse::<NodeId>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let id = NodeId::new(IdNamespace::Variable, 4);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"V4\"");
        let back: NodeId = serde_json::from_str("\"V4\"").unwrap();
        assert_eq!(back, id);
    }
}
