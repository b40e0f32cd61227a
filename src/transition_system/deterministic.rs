use crate::alphabet::{Alphabet, Symbol};

use super::{StateIndex, TransitionSystem};

/// A total transition function `(state, symbol) -> state`. The successors are stored in one
/// contiguous vector, row by row, where each row has one entry per alphabet symbol.
///
/// Instances are only created through the [`super::AutomatonBuilder`] or by a subset construction,
/// both of which guarantee that every pair has exactly one successor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicTable<S: Symbol> {
    alphabet: Alphabet<S>,
    size: usize,
    successors: Vec<StateIndex>,
}

impl<S: Symbol> DeterministicTable<S> {
    /// Assembles a table with `size` states from its rows. Every row must have exactly one entry
    /// per symbol and every entry must be a valid state index.
    pub(crate) fn from_rows<I>(alphabet: Alphabet<S>, size: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<StateIndex>>,
    {
        let successors: Vec<_> = rows.into_iter().flatten().collect();
        debug_assert_eq!(successors.len(), size * alphabet.size());
        debug_assert!(successors.iter().all(|&p| p < size));
        Self {
            alphabet,
            size,
            successors,
        }
    }

    /// Returns the successor of `state` on the symbol at position `symbol`. The caller has to
    /// ensure that both are in range.
    pub(crate) fn successor_by_index(&self, state: StateIndex, symbol: usize) -> StateIndex {
        self.successors[state * self.alphabet.size() + symbol]
    }

    /// Returns the row of `state`, which lists the successors in alphabet order.
    pub fn row(&self, state: StateIndex) -> Option<&[StateIndex]> {
        if state >= self.size {
            return None;
        }
        let k = self.alphabet.size();
        self.successors.get(state * k..(state + 1) * k)
    }
}

impl<S: Symbol> TransitionSystem for DeterministicTable<S> {
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.size
    }
}
