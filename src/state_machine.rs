// Copyright 2025 Cowboy AI, LLC.

//! State machine building blocks
//!
//! Session and transaction lifecycles are modelled as Mealy machines: the
//! output of a transition depends on the current state AND the input. Guards
//! (`can_transition_to`) decide which edges exist; the machine records every
//! transition it takes.

use crate::errors::{ComposerError, ComposerResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Input to a state machine transition
pub trait TransitionInput: Debug + Clone {
    /// Get a description of this input for logging
    fn description(&self) -> String;
}

/// Trait for types that can be used as states in a state machine
pub trait State: Debug + Clone + PartialEq + Eq {
    /// Get the name of this state for logging/debugging
    fn name(&self) -> &'static str;

    /// Check if this is a terminal state
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Mealy Machine: Output depends on current state AND input
pub trait MealyStateTransitions: State {
    /// The input type for transitions
    type Input: TransitionInput;
    /// The output type for transitions
    type Output: Debug + Clone;

    /// Check if a transition is valid given the input
    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool;

    /// Get valid transitions for a given input
    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self>;

    /// Get the output for a transition
    fn transition_output(&self, target: &Self, input: &Self::Input) -> Self::Output;
}

/// Record of a state transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition<S, I, O> {
    /// The state before the transition
    pub from: S,
    /// The state after the transition
    pub to: S,
    /// The input that triggered the transition
    pub input: I,
    /// The output produced by the transition
    pub output: O,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Mealy state machine with transition history
#[derive(Debug, Clone)]
pub struct MealyMachine<S: MealyStateTransitions> {
    current_state: S,
    transition_history: Vec<StateTransition<S, S::Input, S::Output>>,
}

impl<S: MealyStateTransitions> MealyMachine<S> {
    /// Create a new machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            transition_history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> &S {
        &self.current_state
    }

    /// Transition to the target state driven by `input`
    pub fn transition_to(&mut self, target: S, input: S::Input) -> ComposerResult<S::Output> {
        if !self.current_state.can_transition_to(&target, &input) {
            return Err(ComposerError::InvalidStateTransition {
                from: self.current_state.name().to_string(),
                to: target.name().to_string(),
            });
        }

        let output = self.current_state.transition_output(&target, &input);
        self.transition_history.push(StateTransition {
            from: self.current_state.clone(),
            to: target.clone(),
            input,
            output: output.clone(),
            timestamp: Utc::now(),
        });
        self.current_state = target;
        Ok(output)
    }

    /// All transitions taken so far, oldest first
    pub fn transition_history(&self) -> &[StateTransition<S, S::Input, S::Output>] {
        &self.transition_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Closed,
        Open,
        Locked,
    }

    #[derive(Debug, Clone)]
    enum Action {
        Push,
        Pull,
        Lock,
    }

    impl TransitionInput for Action {
        fn description(&self) -> String {
            format!("{self:?}")
        }
    }

    impl State for Door {
        fn name(&self) -> &'static str {
            match self {
                Door::Closed => "Closed",
                Door::Open => "Open",
                Door::Locked => "Locked",
            }
        }

        fn is_terminal(&self) -> bool {
            matches!(self, Door::Locked)
        }
    }

    impl MealyStateTransitions for Door {
        type Input = Action;
        type Output = &'static str;

        fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool {
            matches!(
                (self, target, input),
                (Door::Closed, Door::Open, Action::Push)
                    | (Door::Open, Door::Closed, Action::Pull)
                    | (Door::Closed, Door::Locked, Action::Lock)
            )
        }

        fn valid_transitions(&self, input: &Self::Input) -> Vec<Self> {
            [Door::Closed, Door::Open, Door::Locked]
                .into_iter()
                .filter(|t| self.can_transition_to(t, input))
                .collect()
        }

        fn transition_output(&self, target: &Self, _input: &Self::Input) -> Self::Output {
            target.name()
        }
    }

    #[test]
    fn test_machine_records_history() {
        let mut door = MealyMachine::new(Door::Closed);
        assert_eq!(door.transition_to(Door::Open, Action::Push).unwrap(), "Open");
        assert_eq!(door.transition_to(Door::Closed, Action::Pull).unwrap(), "Closed");
        assert_eq!(door.transition_to(Door::Locked, Action::Lock).unwrap(), "Locked");

        assert!(door.current_state().is_terminal());
        let history = door.transition_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].from, Door::Closed);
        assert_eq!(history[2].to, Door::Locked);
    }

    #[test]
    fn test_machine_rejects_missing_edge() {
        let mut door = MealyMachine::new(Door::Locked);
        let err = door.transition_to(Door::Open, Action::Push).unwrap_err();
        assert_eq!(
            err,
            ComposerError::InvalidStateTransition {
                from: "Locked".to_string(),
                to: "Open".to_string(),
            }
        );
        assert!(door.transition_history().is_empty());
        assert!(Door::Locked.valid_transitions(&Action::Push).is_empty());
    }
}
