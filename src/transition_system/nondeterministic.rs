use tracing::trace;

use crate::alphabet::{Alphabet, Symbol};

use super::{StateIndex, StateSet, TransitionSystem};

/// A transition relation `(state, symbol) -> set of states`. Entries may be empty, meaning there is no
/// transition, or contain several successors. Inserting an edge that is already present has no
/// effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NondeterministicTable<S: Symbol> {
    alphabet: Alphabet<S>,
    size: usize,
    successors: Vec<StateSet>,
}

impl<S: Symbol> NondeterministicTable<S> {
    /// Creates a table with `size` states and no transitions.
    pub(crate) fn new(alphabet: Alphabet<S>, size: usize) -> Self {
        let successors = vec![StateSet::empty(); size * alphabet.size()];
        Self {
            alphabet,
            size,
            successors,
        }
    }

    /// Inserts the edge `source --symbol--> target`, where `symbol` is an alphabet position.
    /// Returns false if the edge existed already.
    pub(crate) fn insert(&mut self, source: StateIndex, symbol: usize, target: StateIndex) -> bool {
        debug_assert!(source < self.size && target < self.size);
        let k = self.alphabet.size();
        let inserted = self.successors[source * k + symbol].insert(target);
        if !inserted {
            trace!("ignoring duplicate edge q{source} --{symbol}--> q{target}");
        }
        inserted
    }

    /// Returns the successors of `state` on the symbol at position `symbol`. The caller has to
    /// ensure that both are in range.
    pub(crate) fn successors_by_index(&self, state: StateIndex, symbol: usize) -> &StateSet {
        &self.successors[state * self.alphabet.size() + symbol]
    }

    /// Collects the successors of all states in `states` on the symbol at position `symbol`.
    pub(crate) fn step_by_index(&self, states: &StateSet, symbol: usize) -> StateSet {
        let mut out = StateSet::empty();
        for &q in states {
            out.union_with(self.successors_by_index(q, symbol));
        }
        out
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(StateSet::len).sum()
    }
}

impl<S: Symbol> TransitionSystem for NondeterministicTable<S> {
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.size
    }
}
