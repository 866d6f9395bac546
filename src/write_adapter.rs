// Copyright 2025 Cowboy AI, LLC.

//! Write adapter: the contract an entity store offers to this layer
//!
//! The store owns identity resolution (including alias merging), version
//! storage and ordering. This layer only asks it to stage one version per
//! call and later to finalize or discard everything one transaction staged.

use crate::errors::ComposerResult;
use crate::fields::{FieldDefinition, FieldValue};
use crate::identifiers::{PublicId, TransactionId};
use crate::stamp::StampCoordinate;

/// Create-or-append access to concept, pattern and semantic records
///
/// Every write stages a version under `stamp` on behalf of `transaction`;
/// nothing becomes durable until [`WriteAdapter::commit_transaction`] is
/// called for that transaction. Several transactions may share a stamp, and
/// finalizing one must never touch what another staged. Implementations must
/// make [`WriteAdapter::cancel_transaction`] all-or-nothing.
pub trait WriteAdapter: Send + Sync {
    /// Stage a concept version
    fn write_concept(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<()>;

    /// Stage a pattern version; `field_definitions` order is the positional
    /// contract semantics rely on and must be kept exactly
    fn write_pattern(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        meaning: &PublicId,
        purpose: &PublicId,
        field_definitions: &[FieldDefinition],
    ) -> ComposerResult<()>;

    /// Stage a semantic version; values are positional against the pattern's
    /// field definitions and are not checked here
    fn write_semantic(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        referenced_component: &PublicId,
        pattern: &PublicId,
        field_values: &[FieldValue],
    ) -> ComposerResult<()>;

    /// Make every version `transaction` staged durable
    fn commit_transaction(
        &self,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        components: &[PublicId],
    ) -> ComposerResult<()>;

    /// Discard every version `transaction` staged
    fn cancel_transaction(
        &self,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        components: &[PublicId],
    ) -> ComposerResult<()>;
}
