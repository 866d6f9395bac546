// Copyright 2025 Cowboy AI, LLC.

//! Semantic assembler

use super::node::{ComponentKind, CompositionNode, LazyIdentity};
use crate::errors::{ComposerError, ComposerResult};
use crate::fields::{FieldValue, FieldValues};
use crate::identifiers::{PublicId, TransactionId};
use crate::stamp::StampCoordinate;
use crate::write_adapter::WriteAdapter;
use std::cell::OnceCell;
use tracing::debug;

/// Draft of a semantic version: data about a referenced component, read
/// positionally against a pattern
///
/// The referenced component is set exactly once, either by the caller or by
/// the handle it is attached to. Field values are not checked against the
/// pattern's field definitions.
#[derive(Debug, Clone, Default)]
pub struct SemanticAssembler {
    identity: LazyIdentity,
    reference: OnceCell<PublicId>,
    rebound: Option<PublicId>,
    pattern: Option<PublicId>,
    field_values: FieldValues,
}

impl SemanticAssembler {
    /// Semantic with a generated identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Semantic with a caller-supplied identity
    pub fn with_public_id(id: PublicId) -> Self {
        Self::with_identity(LazyIdentity::supplied(id))
    }

    pub(crate) fn with_identity(identity: LazyIdentity) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    /// Set the referenced component
    ///
    /// Calling this again with a different component does not replace the
    /// first one; the node then fails validation with
    /// [`ComposerError::ReferenceAlreadySet`] and is never written.
    pub fn reference(mut self, component: PublicId) -> Self {
        if let Err(component) = self.reference.set(component) {
            if self.reference.get() != Some(&component) {
                self.rebound = Some(component);
            }
        }
        self
    }

    /// Bind the referenced component; fails if bound to a different id
    pub fn set_reference(&self, component: PublicId) -> ComposerResult<()> {
        match self.reference.set(component) {
            Ok(()) => Ok(()),
            Err(component) if self.reference.get() == Some(&component) => Ok(()),
            Err(_) => Err(ComposerError::ReferenceAlreadySet {
                node: self.describe(),
            }),
        }
    }

    /// The referenced component, or a state error if not yet established
    pub fn referenced_component(&self) -> ComposerResult<&PublicId> {
        self.reference
            .get()
            .ok_or_else(|| ComposerError::ReferenceNotSet {
                node: self.describe(),
            })
    }

    /// Set the pattern the values are read against
    pub fn pattern(mut self, pattern: PublicId) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Append one field value
    pub fn field_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.field_values.push(value.into());
        self
    }

    /// Append field values in order
    pub fn field_values(mut self, values: impl IntoIterator<Item = FieldValue>) -> Self {
        self.field_values.extend(values);
        self
    }

    /// Field values in positional order
    pub fn values(&self) -> &[FieldValue] {
        &self.field_values
    }
}

impl CompositionNode for SemanticAssembler {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Semantic
    }

    fn public_id(&self) -> &PublicId {
        self.identity.get()
    }

    fn validate(&self) -> ComposerResult<()> {
        self.referenced_component()?;
        if let Some(rebound) = &self.rebound {
            debug!(public_id = %self.public_id(), rebound = %rebound, "Reference set twice");
            return Err(ComposerError::ReferenceAlreadySet {
                node: self.describe(),
            });
        }
        if self.pattern.is_none() {
            return Err(ComposerError::validation(format!(
                "{} has no pattern",
                self.describe()
            )));
        }
        Ok(())
    }

    fn write(
        &self,
        adapter: &dyn WriteAdapter,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<()> {
        let reference = self.referenced_component()?;
        let pattern = self.pattern.as_ref().ok_or_else(|| {
            ComposerError::validation(format!("{} has no pattern", self.describe()))
        })?;
        debug!(
            public_id = %self.public_id(),
            reference = %reference,
            pattern = %pattern,
            fields = self.field_values.len(),
            "Writing semantic"
        );
        adapter.write_semantic(
            self.public_id(),
            stamp,
            transaction,
            reference,
            pattern,
            &self.field_values,
        )
    }
}
