use itertools::Itertools;

use crate::{show::show_state, Show};

use super::StateIndex;

/// A run of a deterministic automaton on a finite word. It records every visited state, starting
/// with the initial one, so a run on a word of length `n` consists of `n + 1` states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    states: Vec<StateIndex>,
    accepting: bool,
}

impl Run {
    pub(crate) fn new(states: Vec<StateIndex>, accepting: bool) -> Self {
        debug_assert!(!states.is_empty(), "a run always contains the initial state");
        Self { states, accepting }
    }

    /// The sequence of visited states.
    pub fn states(&self) -> &[StateIndex] {
        &self.states
    }

    /// The state in which the run ends.
    pub fn reached(&self) -> StateIndex {
        self.states.last().copied().unwrap_or_default()
    }

    /// Whether the reached state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Number of transitions taken, i.e. the length of the word that was read.
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    /// Returns true if no transition was taken.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Show for Run {
    fn show(&self) -> String {
        self.states.iter().map(|&q| format!(" -> {}", show_state(q))).join("")
    }
}
