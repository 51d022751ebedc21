//! Finite State Machine (FSM) implementation
//!
//! The transition rules live in a [`TransitionTable`] that is built once and
//! shared; each entity only carries a small [`StateMachine`] cursor with its
//! current state. Rules leaving a state are checked in registration order.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Clone + Eq + Hash + Debug {
    /// Called when entering this state
    fn on_enter(&self) {}
    /// Called when exiting this state
    fn on_exit(&self) {}
}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    /// Target state
    pub to: S,
    /// Condition function
    pub condition: TransitionCondition<C>,
}

impl<S, C> Transition<S, C> {
    /// Create a new transition
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
        }
    }

    /// Check if transition should occur
    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// Transition rules keyed by source state
pub struct TransitionTable<S, C> {
    transitions: HashMap<S, Vec<Transition<S, C>>>,
}

impl<S: State, C> TransitionTable<S, C> {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }

    /// Add a transition
    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition::new(to, condition));
    }

    /// First state `current` should move to under `context`, if any
    pub fn evaluate(&self, current: &S, context: &C) -> Option<S> {
        self.transitions
            .get(current)?
            .iter()
            .find(|transition| transition.should_transition(context))
            .map(|transition| transition.to.clone())
    }
}

impl<S: State, C> Default for TransitionTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-entity position in a state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine<S> {
    current: S,
}

impl<S: State> StateMachine<S> {
    /// Create a new state machine
    pub fn new(initial: S) -> Self {
        initial.on_enter();
        Self { current: initial }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Force transition to a state
    pub fn force_transition(&mut self, to: S) {
        self.current.on_exit();
        self.current = to;
        self.current.on_enter();
    }

    /// Evaluate the table once and take at most one transition.
    /// Returns the new state if one was taken.
    pub fn update<C>(&mut self, table: &TransitionTable<S, C>, context: &C) -> Option<&S> {
        let next = table.evaluate(&self.current, context)?;
        self.force_transition(next);
        Some(&self.current)
    }

    pub fn is_in(&self, state: &S) -> bool {
        &self.current == state
    }
}
