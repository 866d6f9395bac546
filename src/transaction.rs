// Copyright 2025 Cowboy AI, LLC.

//! Session transaction: the append-only set of component identities staged
//! for one atomic commit or cancel

use crate::errors::{ComposerError, ComposerResult};
use crate::identifiers::{PublicId, TransactionId};
use crate::state_machine::{MealyMachine, State, StateTransition};
use crate::transaction_state::{TransactionInput, TransactionState, TxEffect};
use indexmap::IndexSet;
use tracing::debug;

/// Registered identities of one session plus their lifecycle state
///
/// Registration is only accepted while the transaction is open. Commit and
/// cancel are terminal; calling either once the transaction is terminal is a
/// no-op that reports `None`.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: TransactionId,
    machine: MealyMachine<TransactionState>,
    components: IndexSet<PublicId>,
}

impl Transaction {
    /// Create an open, empty transaction
    pub fn new() -> Self {
        Self {
            id: TransactionId::new(),
            machine: MealyMachine::new(TransactionState::Open),
            components: IndexSet::new(),
        }
    }

    /// Transaction identifier
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> TransactionState {
        *self.machine.current_state()
    }

    /// True while registrations are accepted
    pub fn is_open(&self) -> bool {
        !self.state().is_terminal()
    }

    /// Register a written component; returns false if it was already registered
    pub fn register(&mut self, component: PublicId) -> ComposerResult<bool> {
        if !self.is_open() {
            return Err(ComposerError::TransactionTerminal {
                transaction_id: self.id.to_string(),
                state: self.state().name().to_string(),
            });
        }
        self.machine
            .transition_to(TransactionState::Open, TransactionInput::Register)?;
        let added = self.components.insert(component);
        debug!(
            transaction_id = %self.id,
            added,
            count = self.components.len(),
            "Registered component"
        );
        Ok(added)
    }

    /// Number of distinct registered components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// True when `component` is registered
    pub fn contains(&self, component: &PublicId) -> bool {
        self.components.contains(component)
    }

    /// Registered components in registration order
    pub fn components(&self) -> impl Iterator<Item = &PublicId> {
        self.components.iter()
    }

    /// Lifecycle transitions taken so far, oldest first
    pub fn history(&self) -> &[StateTransition<TransactionState, TransactionInput, TxEffect>] {
        self.machine.transition_history()
    }

    /// Move to Committed; `None` when already terminal
    pub fn commit(&mut self) -> ComposerResult<Option<TxEffect>> {
        self.finish(TransactionState::Committed, TransactionInput::Commit)
    }

    /// Move to Cancelled; `None` when already terminal
    pub fn cancel(&mut self) -> ComposerResult<Option<TxEffect>> {
        self.finish(TransactionState::Cancelled, TransactionInput::Cancel)
    }

    fn finish(
        &mut self,
        target: TransactionState,
        input: TransactionInput,
    ) -> ComposerResult<Option<TxEffect>> {
        if !self.is_open() {
            return Ok(None);
        }
        self.machine.transition_to(target, input).map(Some)
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_counts_distinct_ids() {
        let mut tx = Transaction::new();
        let a = PublicId::new();
        let b = PublicId::new();

        assert!(tx.register(a.clone()).unwrap());
        assert!(tx.register(b.clone()).unwrap());
        assert!(!tx.register(a.clone()).unwrap());

        assert_eq!(tx.len(), 2);
        assert_eq!(tx.components().cloned().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_commit_is_terminal_and_idempotent() {
        let mut tx = Transaction::new();
        tx.register(PublicId::new()).unwrap();

        assert_eq!(tx.commit().unwrap(), Some(TxEffect::Finalize));
        assert_eq!(tx.state(), TransactionState::Committed);
        assert_eq!(tx.commit().unwrap(), None);
        assert_eq!(tx.cancel().unwrap(), None);
        assert_eq!(tx.state(), TransactionState::Committed);
        assert_eq!(tx.len(), 1);
    }

    #[test]
    fn test_cancel_then_commit_stays_cancelled() {
        let mut tx = Transaction::new();
        assert_eq!(tx.cancel().unwrap(), Some(TxEffect::Discard));
        assert_eq!(tx.commit().unwrap(), None);
        assert_eq!(tx.state(), TransactionState::Cancelled);
    }

    #[test]
    fn test_register_after_terminal_is_rejected() {
        let mut tx = Transaction::new();
        tx.commit().unwrap();

        let err = tx.register(PublicId::new()).unwrap_err();
        assert!(err.is_state_error());
        assert!(matches!(err, ComposerError::TransactionTerminal { .. }));
        assert!(tx.is_empty());
    }

    #[test]
    fn test_history_records_each_transition() {
        let mut tx = Transaction::new();
        tx.register(PublicId::new()).unwrap();
        tx.register(PublicId::new()).unwrap();
        tx.cancel().unwrap();
        tx.commit().unwrap();

        let effects: Vec<_> = tx.history().iter().map(|t| t.output).collect();
        assert_eq!(
            effects,
            vec![TxEffect::Stage, TxEffect::Stage, TxEffect::Discard]
        );
        let last = tx.history().last().unwrap();
        assert_eq!(
            (last.from, last.to),
            (TransactionState::Open, TransactionState::Cancelled)
        );
    }
}
