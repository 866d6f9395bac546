// Copyright 2025 Cowboy AI, LLC.

//! # CIM Composer
//!
//! Transactional composition of versioned knowledge records for the
//! Composable Information Machine.
//!
//! Records come in three kinds:
//! - **Concept**: a bare addressable node
//! - **Pattern**: an ordered field schema
//! - **Semantic**: schema-conformant data attached to a referenced component
//!
//! A caller opens a [`Session`] for a [`StampCoordinate`] (status, time,
//! author, module, path), composes a root record, attaches semantic templates
//! to build a tree of related records, and commits or cancels the whole tree
//! as one unit. Each record is validated and written eagerly through a
//! [`WriteAdapter`]; durability is decided at the session boundary.
//!
//! ## Design Principles
//!
//! 1. **Write-through**: every node is written the moment it is composed or attached
//! 2. **Atomic sessions**: commit and cancel cover everything a session registered
//! 3. **Stable keys**: identical stamp fields always map to the same session
//! 4. **Bind once**: identities and references never change after first use
//! 5. **Store owns storage**: identity merging and version order belong to the store

#![warn(missing_docs)]

mod composer;
mod config;
mod errors;
mod fields;
mod identifiers;
mod session;
mod stamp;
mod transaction;
mod transaction_state;
mod write_adapter;

pub mod composition;
pub mod persistence;
pub mod state_machine;
pub mod well_known;

pub use composer::{Composer, SessionSweep};
pub use composition::{
    Acceptability, Attachment, CaseSignificance, Comment, ComponentKind, CompositionNode,
    ConceptAssembler, CustomTemplate, Definition, DescriptionText, FullyQualifiedName, GbDialect,
    Identifier, Language, LazyIdentity, PatternAssembler, SemanticAssembler, SemanticTemplate,
    StatedAxiom, StatedNavigation, Synonym, UsDialect,
};
pub use config::ComposerConfig;
pub use errors::{ComposerError, ComposerResult};
pub use fields::{FieldDataType, FieldDefinition, FieldValue, FieldValues};
pub use identifiers::{PublicId, StampKey, TransactionId, COMPOSER_NAMESPACE};
pub use persistence::{InMemoryEntityStore, Nid, RecordKind, RecordVersion, VersionData};
pub use session::{ComponentHandle, Session};
pub use stamp::{StampCoordinate, Status};
pub use transaction::Transaction;
pub use transaction_state::{TransactionInput, TransactionState, TxEffect};
pub use well_known::{WellKnownConcept, WellKnownPattern};
pub use write_adapter::WriteAdapter;
