// Copyright 2025 Cowboy AI, LLC.

//! Composition nodes: record drafts that validate and then write themselves

use crate::errors::{ComposerError, ComposerResult};
use crate::identifiers::{PublicId, TransactionId};
use crate::stamp::StampCoordinate;
use crate::write_adapter::WriteAdapter;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;

/// Kind of record a node drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Bare addressable node
    Concept,
    /// Field schema
    Pattern,
    /// Schema-conformant data about another component
    Semantic,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Concept => f.write_str("concept"),
            ComponentKind::Pattern => f.write_str("pattern"),
            ComponentKind::Semantic => f.write_str("semantic"),
        }
    }
}

/// Identity bound once: supplied by the caller or generated at first read
///
/// # Examples
///
/// ```rust
/// use cim_composer::{LazyIdentity, PublicId};
///
/// let identity = LazyIdentity::new();
/// let first = identity.get().clone();
/// assert_eq!(identity.get(), &first);
/// assert!(identity.assign(PublicId::new()).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LazyIdentity(OnceCell<PublicId>);

impl LazyIdentity {
    /// Unbound identity; a random id is generated on first read
    pub fn new() -> Self {
        Self(OnceCell::new())
    }

    /// Identity bound to a caller-supplied id
    pub fn supplied(id: PublicId) -> Self {
        Self(OnceCell::from(id))
    }

    /// Bind to `id` if still unbound; binding the same id again is accepted
    pub fn assign(&self, id: PublicId) -> ComposerResult<()> {
        match self.0.set(id) {
            Ok(()) => Ok(()),
            Err(id) if self.0.get() == Some(&id) => Ok(()),
            Err(id) => Err(ComposerError::IdentityError(format!(
                "identity already bound to {}, cannot rebind to {id}",
                self.get()
            ))),
        }
    }

    /// Resolved identity, generating one if nothing was supplied
    pub fn get(&self) -> &PublicId {
        self.0.get_or_init(PublicId::new)
    }

    /// True once the identity has been supplied or read
    pub fn is_bound(&self) -> bool {
        self.0.get().is_some()
    }
}

/// A record draft that can check its preconditions and write one version
///
/// [`CompositionNode::validate_and_write`] is the only path sessions use to
/// reach the write adapter: a failed `validate` means nothing is written.
pub trait CompositionNode {
    /// Kind of record this node drafts
    fn kind(&self) -> ComponentKind;

    /// Resolved identity of the draft
    fn public_id(&self) -> &PublicId;

    /// Kind-specific precondition check
    fn validate(&self) -> ComposerResult<()>;

    /// Write one version through the adapter; callers go through
    /// `validate_and_write`
    fn write(
        &self,
        adapter: &dyn WriteAdapter,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<()>;

    /// Validate, then write; returns the identity that was written
    fn validate_and_write(
        &self,
        adapter: &dyn WriteAdapter,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<PublicId> {
        self.validate()?;
        self.write(adapter, stamp, transaction)?;
        Ok(self.public_id().clone())
    }

    /// Short description for logs and errors
    fn describe(&self) -> String {
        format!("{} {}", self.kind(), self.public_id())
    }
}
