//! Generic named-state machine used by every scanner in the pipeline
//!
//! A `StateGraph` is immutable once built: states are indices, each state
//! holds an ordered list of (guard, next-state) pairs and transition picks
//! the first guard that accepts the input. All per-run bookkeeping (string
//! buffers, radix values, flags) lives with the caller, so one graph can be
//! shared across any number of independent scans.

use thiserror::Error;

use crate::logging::codes;

/// Raised when a state has no transition for the current input
#[derive(Debug, Clone, Error)]
pub enum AutomatonError {
    #[error("No transition from state {state} with input '{input}'")]
    NoTransition { state: &'static str, input: char },
}

impl AutomatonError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            AutomatonError::NoTransition { .. } => codes::lexical::NO_TRANSITION,
        }
    }
}

/// Index of a state inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

type Guard = Box<dyn Fn(char) -> bool>;

struct State {
    /// Diagnostic name, surfaced in NoTransition errors
    name: &'static str,
    deltas: Vec<(Guard, StateId)>,
}

/// An immutable transition graph over characters
pub struct StateGraph {
    states: Vec<State>,
}

impl StateGraph {
    /// Look up the next state for `input`, trying guards in insertion order
    pub fn transition(&self, from: StateId, input: char) -> Result<StateId, AutomatonError> {
        let state = &self.states[from.0];
        for (guard, next) in &state.deltas {
            if guard(input) {
                return Ok(*next);
            }
        }
        Err(AutomatonError::NoTransition {
            state: state.name,
            input,
        })
    }

    /// Diagnostic name of a state
    pub fn name(&self, id: StateId) -> &'static str {
        self.states[id.0].name
    }
}

/// Builder producing an immutable `StateGraph`
#[derive(Default)]
pub struct GraphBuilder {
    states: Vec<State>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named state and get its id
    pub fn state(&mut self, name: &'static str) -> StateId {
        self.states.push(State {
            name,
            deltas: Vec::new(),
        });
        StateId(self.states.len() - 1)
    }

    /// Append a (guard, next-state) pair; earlier deltas win
    pub fn delta<F>(&mut self, from: StateId, guard: F, to: StateId)
    where
        F: Fn(char) -> bool + 'static,
    {
        self.states[from.0].deltas.push((Box::new(guard), to));
    }

    pub fn build(self) -> StateGraph {
        StateGraph {
            states: self.states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn toggle_graph() -> (StateGraph, StateId, StateId) {
        let mut builder = GraphBuilder::new();
        let off = builder.state("Off");
        let on = builder.state("On");
        builder.delta(off, |c| c == '1', on);
        builder.delta(off, |c| c == '0', off);
        builder.delta(on, |c| c == '0', off);
        builder.delta(on, |c| c == '1', on);
        (builder.build(), off, on)
    }

    #[test]
    fn first_matching_guard_wins() {
        let mut builder = GraphBuilder::new();
        let start = builder.state("Start");
        let a = builder.state("A");
        let b = builder.state("B");
        builder.delta(start, |c| c.is_alphabetic(), a);
        builder.delta(start, |_| true, b);
        let graph = builder.build();

        assert_eq!(graph.transition(start, 'x').unwrap(), a);
        assert_eq!(graph.transition(start, '7').unwrap(), b);
    }

    #[test]
    fn transitions_follow_deltas() {
        let (graph, off, on) = toggle_graph();
        let mut state = off;
        for c in "1101".chars() {
            state = graph.transition(state, c).unwrap();
        }
        assert_eq!(state, on);
    }

    #[test]
    fn missing_transition_is_fatal() {
        let (graph, off, _) = toggle_graph();
        let err = graph.transition(off, 'x').unwrap_err();
        assert_matches!(err, AutomatonError::NoTransition { state: "Off", input: 'x' });
    }

    #[test]
    fn graph_is_reusable_across_runs() {
        // No per-run data lives on the graph, so two interleaved runs
        // cannot contaminate each other.
        let (graph, off, on) = toggle_graph();
        let run_a = graph.transition(off, '1').unwrap();
        let run_b = graph.transition(off, '0').unwrap();
        assert_eq!(run_a, on);
        assert_eq!(run_b, off);
    }
}
