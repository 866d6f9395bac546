// Copyright 2025 Cowboy AI, LLC.

//! Pattern assembler

use super::node::{ComponentKind, CompositionNode, LazyIdentity};
use crate::errors::{ComposerError, ComposerResult};
use crate::fields::{FieldDataType, FieldDefinition};
use crate::identifiers::{PublicId, TransactionId};
use crate::stamp::StampCoordinate;
use crate::write_adapter::WriteAdapter;
use tracing::debug;

/// Draft of a pattern version: meaning, purpose and ordered field definitions
///
/// The order fields are added in is the positional contract semantics of
/// this pattern are read against; it is passed to the store unchanged.
#[derive(Debug, Clone, Default)]
pub struct PatternAssembler {
    identity: LazyIdentity,
    meaning: Option<PublicId>,
    purpose: Option<PublicId>,
    field_definitions: Vec<FieldDefinition>,
}

impl PatternAssembler {
    /// Pattern with a generated identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern with a caller-supplied identity
    pub fn with_public_id(id: PublicId) -> Self {
        Self {
            identity: LazyIdentity::supplied(id),
            ..Self::default()
        }
    }

    /// Set the meaning concept
    pub fn meaning(mut self, meaning: PublicId) -> Self {
        self.meaning = Some(meaning);
        self
    }

    /// Set the purpose concept
    pub fn purpose(mut self, purpose: PublicId) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// Append one field definition
    pub fn field(mut self, meaning: PublicId, purpose: PublicId, data_type: FieldDataType) -> Self {
        self.field_definitions
            .push(FieldDefinition::new(meaning, purpose, data_type));
        self
    }

    /// Append field definitions in order
    pub fn fields(mut self, definitions: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.field_definitions.extend(definitions);
        self
    }

    /// Field definitions in declaration order
    pub fn field_definitions(&self) -> &[FieldDefinition] {
        &self.field_definitions
    }
}

impl CompositionNode for PatternAssembler {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Pattern
    }

    fn public_id(&self) -> &PublicId {
        self.identity.get()
    }

    fn validate(&self) -> ComposerResult<()> {
        if self.meaning.is_none() {
            return Err(ComposerError::validation(format!(
                "pattern {} has no meaning",
                self.public_id()
            )));
        }
        if self.purpose.is_none() {
            return Err(ComposerError::validation(format!(
                "pattern {} has no purpose",
                self.public_id()
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
        let (Some(meaning), Some(purpose)) = (&self.meaning, &self.purpose) else {
            return Err(ComposerError::validation(format!(
                "pattern {} is missing meaning or purpose",
                self.public_id()
            )));
        };
        debug!(
            public_id = %self.public_id(),
            fields = self.field_definitions.len(),
            "Writing pattern"
        );
        adapter.write_pattern(
            self.public_id(),
            stamp,
            transaction,
            meaning,
            purpose,
            &self.field_definitions,
        )
    }
}
