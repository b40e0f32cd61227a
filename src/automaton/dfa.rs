use tracing::debug;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::Result,
    show::show_state,
    transition_system::{
        table::TableRow, AutomatonBuilder, DeterministicTable, Run, StateIndex, StateSet,
        TransitionSystem, TransitionTable,
    },
    word::FiniteWord,
};

/// A deterministic finite automaton (DFA). Its transition function is total, so from every state
/// there is precisely one transition on each symbol, and a word is accepted if reading it from the
/// initial state leads to an accepting state.
///
/// A DFA is immutable, it is created through [`DFA::builder`]. Evaluating a word does not change
/// the automaton, so the same instance can be queried any number of times.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// // accepts all words that contain `011`
/// let dfa = DFA::builder()
///     .with_states(4)
///     .with_alphabet(['0', '1'])
///     .with_initial(0)
///     .with_accepting([3])
///     .with_edges([
///         (0, '0', 1), (0, '1', 0),
///         (1, '0', 1), (1, '1', 2),
///         (2, '0', 1), (2, '1', 3),
///         (3, '0', 3), (3, '1', 3),
///     ])
///     .into_dfa()
///     .unwrap();
/// assert_eq!(dfa.evaluate("10110"), Ok(true));
/// assert_eq!(dfa.run("011").unwrap().states(), &[0, 1, 2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DFA<S: Symbol> {
    table: DeterministicTable<S>,
    initial: StateIndex,
    accepting: StateSet,
}

impl<S: Symbol> DFA<S> {
    /// Returns a builder, which is the only way of creating a [`DFA`] from scratch.
    pub fn builder() -> AutomatonBuilder<S> {
        AutomatonBuilder::new()
    }

    pub(crate) fn from_parts(
        table: DeterministicTable<S>,
        initial: StateIndex,
        accepting: StateSet,
    ) -> Self {
        debug_assert!(initial < table.size());
        debug_assert!(accepting.max_state().map_or(true, |q| q < table.size()));
        Self {
            table,
            initial,
            accepting,
        }
    }

    /// The initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
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

    /// Returns the state that is reached from `state` on `symbol`.
    pub fn successor(&self, state: StateIndex, symbol: &S) -> Result<StateIndex, S> {
        let state = self.check_state(state)?;
        let symbol = self.observable_index(symbol)?;
        Ok(self.table.successor_by_index(state, symbol))
    }

    /// Reads `word` starting in the initial state and records all visited states. Fails with
    /// [`crate::error::AutomatonError::InvalidSymbol`] if the word contains an unknown symbol.
    pub fn run<W: FiniteWord<S>>(&self, word: W) -> Result<Run, S> {
        let word = self.word_indices(word)?;
        let mut states = Vec::with_capacity(word.len() + 1);
        states.push(self.initial);

        let mut current = self.initial;
        for symbol in word {
            current = self.table.successor_by_index(current, symbol);
            states.push(current);
        }
        Ok(Run::new(states, self.accepting.contains(current)))
    }

    /// Decides whether `word` is accepted. The empty word is accepted if and only if the initial
    /// state is accepting.
    pub fn evaluate<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        let word = self.word_indices(word)?;
        let reached = word
            .into_iter()
            .fold(self.initial, |q, a| self.table.successor_by_index(q, a));
        let accepted = self.accepting.contains(reached);
        debug!(
            "DFA reached {} and {}",
            show_state(reached),
            if accepted { "accepts" } else { "rejects" }
        );
        Ok(accepted)
    }

    /// Renders the transition table, see [`TransitionTable`].
    pub fn transition_table(&self) -> TransitionTable {
        let columns = (0..self.alphabet().size()).collect::<Vec<_>>();
        let rows = self.state_indices().map(|q| TableRow {
            initial: q == self.initial,
            accepting: self.accepting.contains(q),
            name: show_state(q),
            cells: self
                .table
                .row(q)
                .unwrap_or_default()
                .iter()
                .map(|&p| show_state(p))
                .collect(),
        });
        TransitionTable::build(self.alphabet(), &columns, rows)
    }
}

impl<S: Symbol> TransitionSystem for DFA<S> {
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
    use itertools::Itertools;

    use crate::error::AutomatonError;
    use crate::prelude::*;

    fn contains_011() -> DFA<char> {
        DFA::builder()
            .with_states(4)
            .with_alphabet(['0', '1'])
            .with_initial(0)
            .with_accepting([3])
            .with_edges([
                (0, '0', 1),
                (0, '1', 0),
                (1, '0', 1),
                (1, '1', 2),
                (2, '0', 1),
                (2, '1', 3),
                (3, '0', 3),
                (3, '1', 3),
            ])
            .into_dfa()
            .unwrap()
    }

    #[test_log::test]
    fn substring_matcher() {
        let dfa = contains_011();
        assert_eq!(dfa.evaluate("011"), Ok(true));
        assert_eq!(dfa.evaluate("000"), Ok(false));
        assert_eq!(dfa.evaluate("0110"), Ok(true));
        assert_eq!(dfa.evaluate(""), Ok(false));
        assert_eq!(dfa.evaluate("1101011"), Ok(true));
        assert_eq!(dfa.evaluate(vec!['0', '1', '0']), Ok(false));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let dfa = contains_011();
        for word in ["011", "0101", "", "111011"] {
            let first = dfa.evaluate(word);
            assert_eq!(first, dfa.evaluate(word));
            assert_eq!(first, dfa.evaluate(word));
        }
    }

    #[test]
    fn empty_word_depends_on_initial_state() {
        let dfa = DFA::builder()
            .with_states(1)
            .with_alphabet(['x'])
            .with_initial(0)
            .with_accepting([0])
            .with_edges([(0, 'x', 0)])
            .into_dfa()
            .unwrap();
        assert_eq!(dfa.evaluate(""), Ok(true));
        assert_eq!(dfa.run("").unwrap().states(), &[0]);
    }

    #[test]
    fn unknown_symbols_and_states() {
        let dfa = contains_011();
        assert_eq!(dfa.evaluate("0121"), Err(AutomatonError::InvalidSymbol('2')));
        assert_eq!(dfa.run("2").unwrap_err(), AutomatonError::InvalidSymbol('2'));
        assert_eq!(dfa.successor(0, &'1'), Ok(0));
        assert_eq!(
            dfa.successor(4, &'1'),
            Err(AutomatonError::InvalidState { state: 4, size: 4 })
        );
        assert_eq!(dfa.is_accepting(3), Ok(true));
        assert_eq!(dfa.is_accepting(2), Ok(false));
        assert_eq!(
            dfa.is_accepting(99),
            Err(AutomatonError::InvalidState { state: 99, size: 4 })
        );
    }

    #[test]
    fn runs_record_every_state() {
        let run = contains_011().run("0011").unwrap();
        assert_eq!(run.states(), &[0, 1, 1, 2, 3]);
        assert_eq!(run.reached(), 3);
        assert!(run.is_accepting());
        assert_eq!(run.show(), " -> q0 -> q1 -> q1 -> q2 -> q3");
    }

    #[test]
    fn table() {
        let table = contains_011().transition_table().to_string();
        let lines = table.lines().collect_vec();
        // border, header, separator and then one line per state
        assert!(lines[1].contains("State"));
        assert!(lines[3].contains("->") && lines[3].contains("q0"));
        assert!(lines.iter().any(|l| l.contains("* q3")));
        assert_eq!(lines.iter().filter(|l| l.contains("->")).count(), 1);
        assert!(table.lines().all(|l| !l.contains("Where")));
    }
}
