use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, Symbol},
    error::Result,
    show::show_state,
    transition_system::{
        operations::{SubsetConstruction, SubsetOptions},
        table::TableRow,
        AutomatonBuilder, NondeterministicTable, StateIndex, StateSet, TransitionSystem,
        TransitionTable,
    },
    word::FiniteWord,
    Show,
};

/// A nondeterministic finite automaton (NFA). From a state, there may be any number of transitions
/// on the same symbol and there may be several initial states. A word is accepted if there exists
/// a run on it which ends in an accepting state.
///
/// An NFA has no silent transitions, an epsilon symbol in its alphabet is treated like every other
/// symbol when transitions are followed. Use an [`crate::automaton::ENFA`] for automata with
/// silent transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NFA<S: Symbol> {
    table: NondeterministicTable<S>,
    initial: StateSet,
    accepting: StateSet,
}

impl<S: Symbol> NFA<S> {
    /// Returns a builder, which is the only way of creating an [`NFA`] from scratch.
    pub fn builder() -> AutomatonBuilder<S> {
        AutomatonBuilder::new()
    }

    pub(crate) fn from_parts(
        table: NondeterministicTable<S>,
        initial: StateSet,
        accepting: StateSet,
    ) -> Self {
        Self {
            table,
            initial,
            accepting,
        }
    }

    /// The set of initial states.
    pub fn initial_states(&self) -> &StateSet {
        &self.initial
    }

    /// The set of accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    /// Returns true if `state` is accepting, fails if the state does not exist.
    pub fn is_accepting(&self, state: StateIndex) -> Result<bool, S> {
        let state = self.check_state(state)?;
        Ok(self.accepting.contains(state))
    }

    /// Returns the successors of `state` on `symbol`, which may be empty.
    pub fn successors(&self, state: StateIndex, symbol: &S) -> Result<&StateSet, S> {
        let state = self.check_state(state)?;
        let symbol = self.symbol_index(symbol)?;
        Ok(self.table.successors_by_index(state, symbol))
    }

    /// Returns the union of the successors of all states in `states` on `symbol`.
    pub fn step(&self, states: &StateSet, symbol: &S) -> Result<StateSet, S> {
        self.check_states(states)?;
        let symbol = self.symbol_index(symbol)?;
        Ok(self.table.step_by_index(states, symbol))
    }

    /// Decides whether `word` is accepted by simulating all runs at once. The simulation stops as soon
    /// as no state is active anymore.
    pub fn evaluate<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        let word = self.word_indices(word)?;
        let mut active = self.initial.clone();
        for (i, symbol) in word.into_iter().enumerate() {
            active = self.table.step_by_index(&active, symbol);
            trace!("active after {} symbols: {}", i + 1, active.show());
            if active.is_empty() {
                debug!("NFA has no active states left, rejecting");
                return Ok(false);
            }
        }
        Ok(active.intersects(&self.accepting))
    }

    /// Applies the subset construction starting from the set of initial states.
    pub fn subset_construction(&self) -> Result<SubsetConstruction<S>, S> {
        self.subset_construction_with(self.initial.clone(), SubsetOptions::default())
    }

    /// Applies the subset construction starting from the given set of states.
    pub fn subset_construction_from(&self, initial: StateSet) -> Result<SubsetConstruction<S>, S> {
        self.subset_construction_with(initial, SubsetOptions::default())
    }

    /// Applies the subset construction starting from the given set of states, respecting the given
    /// [`SubsetOptions`].
    pub fn subset_construction_with(
        &self,
        initial: StateSet,
        options: SubsetOptions,
    ) -> Result<SubsetConstruction<S>, S> {
        SubsetConstruction::build(&self.table, initial, &self.accepting, options)
    }

    /// Renders the transition table, every cell lists the successors of a state on a symbol.
    pub fn transition_table(&self) -> TransitionTable {
        let columns = (0..self.alphabet().size()).collect::<Vec<_>>();
        let rows = self.state_indices().map(|q| TableRow {
            initial: self.initial.contains(q),
            accepting: self.accepting.contains(q),
            name: show_state(q),
            cells: columns
                .iter()
                .map(|&a| self.table.successors_by_index(q, a).show())
                .collect(),
        });
        TransitionTable::build(self.alphabet(), &columns, rows)
    }
}

impl<S: Symbol> TransitionSystem for NFA<S> {
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        self.table.alphabet()
    }

    fn size(&self) -> usize {
        self.table.size()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AutomatonError;
    use crate::prelude::*;

    /// Accepts the words containing `0x0` for an arbitrary symbol `x`.
    fn zero_any_zero() -> NFA<char> {
        NFA::builder()
            .with_states(4)
            .with_alphabet(['0', '1'])
            .with_initial(0)
            .with_accepting([3])
            .with_edges([
                (0, '0', 0),
                (0, '0', 1),
                (0, '1', 0),
                (1, '0', 2),
                (1, '1', 2),
                (2, '0', 3),
                (3, '0', 3),
                (3, '1', 3),
            ])
            .into_nfa()
            .unwrap()
    }

    #[test_log::test]
    fn simulation() {
        let nfa = zero_any_zero();
        assert_eq!(nfa.evaluate("000"), Ok(true));
        assert_eq!(nfa.evaluate("1010"), Ok(true));
        assert_eq!(nfa.evaluate("0110"), Ok(false));
        assert_eq!(nfa.evaluate(""), Ok(false));
        assert_eq!(nfa.evaluate("01a"), Err(AutomatonError::InvalidSymbol('a')));
    }

    #[test]
    fn steps() {
        let nfa = zero_any_zero();
        assert_eq!(nfa.successors(0, &'0'), Ok(&StateSet::from([0, 1])));
        assert_eq!(nfa.successors(2, &'1'), Ok(&StateSet::empty()));
        assert_eq!(
            nfa.step(&StateSet::from([0, 1]), &'0'),
            Ok(StateSet::from([0, 1, 2]))
        );
        assert_eq!(
            nfa.step(&StateSet::from([0, 9]), &'0'),
            Err(AutomatonError::InvalidState { state: 9, size: 4 })
        );
        assert_eq!(
            nfa.step(&StateSet::from([0]), &'x'),
            Err(AutomatonError::InvalidSymbol('x'))
        );
        assert_eq!(nfa.is_accepting(3), Ok(true));
        assert_eq!(
            nfa.is_accepting(4),
            Err(AutomatonError::InvalidState { state: 4, size: 4 })
        );
    }

    #[test]
    fn evaluation_is_repeatable() {
        let nfa = zero_any_zero();
        for word in ["000", "0110", "", "11010"] {
            let first = nfa.evaluate(word);
            assert_eq!(first, nfa.evaluate(word));
            assert_eq!(first, nfa.evaluate(word));
        }
    }

    #[test]
    fn dead_end_rejects_early() {
        let nfa = NFA::builder()
            .with_states(2)
            .with_alphabet(['a', 'b'])
            .with_initial(0)
            .with_accepting([1])
            .with_edges([(0, 'a', 1)])
            .into_nfa()
            .unwrap();
        assert_eq!(nfa.evaluate("a"), Ok(true));
        assert_eq!(nfa.evaluate("ab"), Ok(false));
        assert_eq!(nfa.evaluate("bbbb"), Ok(false));
        // the whole word is validated, even after all runs died
        assert_eq!(nfa.evaluate("bc"), Err(AutomatonError::InvalidSymbol('c')));
    }

    #[test]
    fn epsilon_is_an_ordinary_symbol() {
        let nfa = NFA::builder()
            .with_states(2)
            .with_alphabet(['a'])
            .with_epsilon('e')
            .with_initial(0)
            .with_accepting([1])
            .with_edges([(0, 'e', 1)])
            .into_nfa()
            .unwrap();
        assert_eq!(nfa.step(&StateSet::singleton(0), &'e'), Ok(StateSet::singleton(1)));
        // silent transitions are not followed by an NFA
        assert_eq!(nfa.evaluate(""), Ok(false));
        assert_eq!(nfa.evaluate("e"), Err(AutomatonError::InvalidSymbol('e')));
    }

    #[test]
    fn table() {
        let table = zero_any_zero().transition_table().to_string();
        assert!(table.contains("{ q0, q1 }"));
        assert!(table.contains("∅"));
        assert!(table.contains("* q3"));
    }
}
