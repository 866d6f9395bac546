// Copyright 2025 Cowboy AI, LLC.

//! Composition of record drafts
//!
//! A composition tree is rooted at one concept, pattern or semantic and
//! grows by attaching semantic templates to already-written nodes. This
//! module holds the drafts; [`crate::Session`] writes and registers them.

mod concept;
mod node;
mod pattern;
mod semantic;
mod template;

pub use concept::ConceptAssembler;
pub use node::{ComponentKind, CompositionNode, LazyIdentity};
pub use pattern::PatternAssembler;
pub use semantic::SemanticAssembler;
pub use template::{
    Acceptability, Attachment, CaseSignificance, Comment, CustomTemplate, Definition,
    DescriptionText, FullyQualifiedName, GbDialect, Identifier, Language, SemanticTemplate,
    StatedAxiom, StatedNavigation, Synonym, UsDialect,
};
