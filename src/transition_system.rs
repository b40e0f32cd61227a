use crate::{
    alphabet::{Alphabet, Symbol},
    error::{AutomatonError, Result},
    word::FiniteWord,
};

mod state_set;
pub use state_set::StateSet;

mod deterministic;
pub use deterministic::DeterministicTable;

mod nondeterministic;
pub use nondeterministic::NondeterministicTable;

/// Contains the builder through which every automaton is created.
pub mod builder;
pub use builder::AutomatonBuilder;

mod run;
pub use run::Run;

/// Rendering of transition tables.
pub mod table;
pub use table::TransitionTable;

/// Algorithms that derive new information from a transition table, namely the subset construction
/// and the computation of epsilon closures.
pub mod operations;

/// States are identified by their position, so an automaton with `n` states uses the indices `0..n`.
pub type StateIndex = usize;

/// Shared interface of the transition tables. A transition system knows its [`Alphabet`] and its number
/// of states and offers validation of state indices and symbols against those.
pub trait TransitionSystem {
    /// The type of symbols labelling the transitions.
    type Symbol: Symbol;

    /// Returns a reference to the alphabet.
    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns an iterator over all state indices in ascending order.
    fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Returns true if `state` is a valid index for this transition system.
    fn contains_state(&self, state: StateIndex) -> bool {
        state < self.size()
    }

    /// Returns `state` if it exists and an [`AutomatonError::InvalidState`] otherwise.
    fn check_state(&self, state: StateIndex) -> Result<StateIndex, Self::Symbol> {
        if self.contains_state(state) {
            Ok(state)
        } else {
            Err(AutomatonError::InvalidState {
                state,
                size: self.size(),
            })
        }
    }

    /// Checks every state of the given set, see [`Self::check_state`].
    fn check_states(&self, states: &StateSet) -> Result<(), Self::Symbol> {
        states
            .iter()
            .try_for_each(|&q| self.check_state(q).map(|_| ()))
    }

    /// Returns the position of `symbol` in the alphabet. Fails with [`AutomatonError::InvalidSymbol`]
    /// if the symbol is unknown.
    fn symbol_index(&self, symbol: &Self::Symbol) -> Result<usize, Self::Symbol> {
        self.alphabet()
            .index_of(symbol)
            .ok_or_else(|| AutomatonError::InvalidSymbol(symbol.clone()))
    }

    /// Returns the position of `symbol` in the alphabet, additionally rejecting the epsilon symbol
    /// as it can never be read from an input word.
    fn observable_index(&self, symbol: &Self::Symbol) -> Result<usize, Self::Symbol> {
        if self.alphabet().is_epsilon(symbol) {
            return Err(AutomatonError::InvalidSymbol(symbol.clone()));
        }
        self.symbol_index(symbol)
    }

    /// Translates a whole word into alphabet positions, so that an invalid symbol is reported
    /// even if a simulation would have stopped before reaching it.
    fn word_indices<W>(&self, word: W) -> Result<Vec<usize>, Self::Symbol>
    where
        W: FiniteWord<Self::Symbol>,
    {
        word.symbols()
            .map(|sym| self.observable_index(&sym))
            .collect()
    }
}
