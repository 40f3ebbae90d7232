//! Text spans and the span-keyed arena used by classification and indexing.
//!
//! A [`Span`] is the only identity key shared between the classifier and the
//! index registry: two records with equal spans denote the same text region.
//! [`SpanArena`] stores records in insertion order and keeps a separate
//! `Span -> slot` index, so lookups are O(1) and iteration order never depends
//! on hashing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A `(start, end)` character offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in offsets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Insertion-ordered storage of span-keyed records.
///
/// A span occupies at most one slot. [`SpanArena::insert`] refuses a span that
/// is already present, so the first registration of a region always wins.
#[derive(Debug, Clone)]
pub struct SpanArena<T> {
    slots: Vec<(Span, T)>,
    index: HashMap<Span, usize>,
}

impl<T> Default for SpanArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpanArena<T> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a record at `span`.
    ///
    /// Returns `false` (and drops `value`) if the span is already occupied.
    pub fn insert(&mut self, span: Span, value: T) -> bool {
        if self.index.contains_key(&span) {
            return false;
        }
        self.index.insert(span, self.slots.len());
        self.slots.push((span, value));
        true
    }

    /// Record stored at `span`.
    #[must_use]
    pub fn get(&self, span: &Span) -> Option<&T> {
        self.index.get(span).map(|&slot| &self.slots[slot].1)
    }

    /// Whether `span` is occupied.
    #[must_use]
    pub fn contains(&self, span: &Span) -> bool {
        self.index.contains_key(span)
    }

    /// Slot number of `span`, in insertion order.
    #[must_use]
    pub fn slot_of(&self, span: &Span) -> Option<usize> {
        self.index.get(span).copied()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Span, &T)> + '_ {
        self.slots.iter().map(|(span, value)| (*span, value))
    }

    /// Mutable records in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Span, &mut T)> + '_ {
        self.slots.iter_mut().map(|(span, value)| (*span, value))
    }

    /// Occupied spans in insertion order.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.slots.iter().map(|(span, _)| *span)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let mut arena = SpanArena::new();
        assert!(arena.insert(Span::new(5, 7), "nominal"));
        assert!(!arena.insert(Span::new(5, 7), "verbal"));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(&Span::new(5, 7)), Some(&"nominal"));
    }

    #[test]
    fn iteration_follows_insertion_not_offsets() {
        let mut arena = SpanArena::new();
        arena.insert(Span::new(20, 25), 'b');
        arena.insert(Span::new(0, 3), 'a');
        let spans: Vec<_> = arena.spans().collect();
        assert_eq!(spans, vec![Span::new(20, 25), Span::new(0, 3)]);
        assert_eq!(arena.slot_of(&Span::new(0, 3)), Some(1));
    }

    #[test]
    fn span_orders_by_start_then_end() {
        let mut spans = vec![Span::new(4, 9), Span::new(0, 8), Span::new(4, 6)];
        spans.sort();
        assert_eq!(spans, vec![Span::new(0, 8), Span::new(4, 6), Span::new(4, 9)]);
        assert_eq!(Span::new(4, 9).len(), 5);
        assert!(Span::new(3, 3).is_empty());
    }
}
