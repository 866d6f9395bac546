// Copyright 2025 Cowboy AI, LLC.

//! Concept assembler

use super::node::{ComponentKind, CompositionNode, LazyIdentity};
use crate::errors::ComposerResult;
use crate::identifiers::{PublicId, TransactionId};
use crate::stamp::StampCoordinate;
use crate::write_adapter::WriteAdapter;
use tracing::debug;

/// Draft of a concept version; concepts carry identity only
#[derive(Debug, Clone, Default)]
pub struct ConceptAssembler {
    identity: LazyIdentity,
}

impl ConceptAssembler {
    /// Concept with a generated identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Concept with a caller-supplied identity (new or existing record)
    pub fn with_public_id(id: PublicId) -> Self {
        Self {
            identity: LazyIdentity::supplied(id),
        }
    }
}

impl CompositionNode for ConceptAssembler {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Concept
    }

    fn public_id(&self) -> &PublicId {
        self.identity.get()
    }

    fn validate(&self) -> ComposerResult<()> {
        Ok(())
    }

    fn write(
        &self,
        adapter: &dyn WriteAdapter,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<()> {
        debug!(public_id = %self.public_id(), "Writing concept");
        adapter.write_concept(self.public_id(), stamp, transaction)
    }
}
