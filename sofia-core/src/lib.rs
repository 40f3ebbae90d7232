//! # sofia-core
//!
//! Core types for the sofia causal-extraction pipeline, shared by every crate
//! in the workspace.
//!
//! This crate provides:
//! - **Spans**: `Span`, the identity key for text regions, and `SpanArena`
//! - **Identifiers**: `NodeId` in the four document-scoped namespaces
//! - **Annotation schema**: `AnnotatedDocument`, `SentenceAnnotation`, `SentenceView`
//! - **Records**: `Entity`, `Event`, `EventVariant`, `RoleFiller`, `FrameMatch`

#![warn(missing_docs)]

pub mod annotation;
pub mod error;
pub mod id;
pub mod record;
pub mod span;

pub use annotation::{
    AnnotatedDocument, Dependency, Eventuality, NounPhrase, SentenceAnnotation, SentenceView,
    Token,
};
pub use error::{Error, Result};
pub use id::{IdNamespace, NodeId};
pub use record::{Entity, Event, EventOrigin, EventVariant, FrameMatch, RoleFiller};
pub use span::{Span, SpanArena};
