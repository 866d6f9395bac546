// Copyright 2025 Cowboy AI, LLC.

//! Transaction State Machine (Mealy)
//!
//! A session's transaction starts Open and ends in exactly one of Committed
//! or Cancelled. Registration is a self-loop on Open. The output of each edge
//! tells the session what the store has to do.

use crate::state_machine::{MealyStateTransitions, State, TransitionInput};
use serde::{Deserialize, Serialize};
use std::fmt;

/// States of a session transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    /// Accepting registrations
    Open,
    /// Registered versions are durable (terminal)
    Committed,
    /// Registered versions were discarded (terminal)
    Cancelled,
}

impl State for TransactionState {
    fn name(&self) -> &'static str {
        match self {
            TransactionState::Open => "Open",
            TransactionState::Committed => "Committed",
            TransactionState::Cancelled => "Cancelled",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::Committed | TransactionState::Cancelled
        )
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs that drive transaction transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionInput {
    /// A component was written and joins the transaction
    Register,
    /// Finalize every registered component
    Commit,
    /// Discard every registered component
    Cancel,
}

impl TransitionInput for TransactionInput {
    fn description(&self) -> String {
        format!("{self:?}")
    }
}

/// What the store must do as a result of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxEffect {
    /// Keep the version staged
    Stage,
    /// Make staged versions durable
    Finalize,
    /// Drop staged versions
    Discard,
}

impl MealyStateTransitions for TransactionState {
    type Input = TransactionInput;
    type Output = TxEffect;

    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool {
        use TransactionInput as I;
        use TransactionState as S;
        matches!(
            (*self, target, input),
            (S::Open, S::Open, I::Register)
                | (S::Open, S::Committed, I::Commit)
                | (S::Open, S::Cancelled, I::Cancel)
        )
    }

    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self> {
        use TransactionInput as I;
        use TransactionState as S;
        match (*self, input) {
            (S::Open, I::Register) => vec![S::Open],
            (S::Open, I::Commit) => vec![S::Committed],
            (S::Open, I::Cancel) => vec![S::Cancelled],
            _ => Vec::new(),
        }
    }

    fn transition_output(&self, _target: &Self, input: &Self::Input) -> Self::Output {
        match input {
            TransactionInput::Register => TxEffect::Stage,
            TransactionInput::Commit => TxEffect::Finalize,
            TransactionInput::Cancel => TxEffect::Discard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!TransactionState::Open.is_terminal());
        assert!(TransactionState::Committed.is_terminal());
        assert!(TransactionState::Cancelled.is_terminal());
    }

    #[test]
    fn test_can_transition_to_valid_paths() {
        use TransactionInput as I;
        use TransactionState as S;

        assert!(S::Open.can_transition_to(&S::Open, &I::Register));
        assert!(S::Open.can_transition_to(&S::Committed, &I::Commit));
        assert!(S::Open.can_transition_to(&S::Cancelled, &I::Cancel));
    }

    #[test]
    fn test_terminal_states_have_no_edges() {
        use TransactionInput as I;
        use TransactionState as S;

        for state in [S::Committed, S::Cancelled] {
            for input in [I::Register, I::Commit, I::Cancel] {
                assert!(state.valid_transitions(&input).is_empty());
            }
        }
        assert!(!S::Cancelled.can_transition_to(&S::Committed, &I::Commit));
        assert!(!S::Committed.can_transition_to(&S::Open, &I::Register));
    }

    #[test]
    fn test_transition_output_maps_input_to_effect() {
        use TransactionInput as I;
        use TransactionState as S;

        assert_eq!(S::Open.transition_output(&S::Open, &I::Register), TxEffect::Stage);
        assert_eq!(
            S::Open.transition_output(&S::Committed, &I::Commit),
            TxEffect::Finalize
        );
        assert_eq!(
            S::Open.transition_output(&S::Cancelled, &I::Cancel),
            TxEffect::Discard
        );
    }
}
