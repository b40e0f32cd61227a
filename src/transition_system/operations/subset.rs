use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, Symbol},
    automaton::DFA,
    error::{AutomatonError, Result},
    math::{self, IndexedSet},
    transition_system::{
        table::TableRow, DeterministicTable, NondeterministicTable, StateIndex, StateSet,
        TransitionSystem, TransitionTable,
    },
    word::FiniteWord,
    Show,
};

/// Options that influence a [`SubsetConstruction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubsetOptions {
    /// The maximal number of composite states that may be discovered. Without a limit, the
    /// construction only stops once all reachable sets are found, which may be `2^n` many for an
    /// automaton with `n` states.
    pub max_states: Option<usize>,
}

impl SubsetOptions {
    /// Limits the construction to at most `max_states` composite states.
    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states: Some(max_states),
        }
    }
}

/// The deterministic automaton obtained by lazily applying the subset construction to a
/// nondeterministic one. Only the sets of states that are reachable from the initial set are
/// explored. They are numbered in the order of their discovery by a depth-first search that tries
/// the symbols in alphabet order and immediately descends into every newly found set. This
/// numbering determines the labels `A`, `B`, `C`, ... of the composite states.
///
/// Transitions leading to the empty set are not recorded, so the transition function may be
/// partial. A composite state without outgoing transitions is a valid sink that rejects
/// everything, [`Self::into_dfa`] makes the function total by adding one explicit sink.
///
/// The epsilon symbol of the alphabet, if there is one, is treated like any other symbol during the
/// construction. As it never occurs in an input word, [`Self::evaluate`] rejects it like every
/// automaton does and [`Self::into_dfa`] drops its column.
#[derive(Clone, Debug)]
pub struct SubsetConstruction<S: Symbol> {
    alphabet: Alphabet<S>,
    states: IndexedSet<StateSet>,
    transitions: Vec<Vec<Option<StateIndex>>>,
    accepting: Vec<bool>,
}

impl<S: Symbol> SubsetConstruction<S> {
    /// Runs the construction on `table` starting from `initial`. A set of states is accepting if it
    /// contains at least one state from `accepting`.
    ///
    /// The search keeps a stack of frames, each holding a discovered composite state and the position
    /// of the next symbol to try. Processing the symbols in order and always continuing with the
    /// topmost frame yields exactly the discovery order of a recursive search, but the depth is not
    /// limited by the call stack.
    pub(crate) fn build(
        table: &NondeterministicTable<S>,
        initial: StateSet,
        accepting: &StateSet,
        options: SubsetOptions,
    ) -> Result<Self, S> {
        table.check_states(&initial)?;

        let k = table.alphabet().size();
        let bound = math::powerset_size(table.size());
        let limit = options.max_states.unwrap_or(bound);
        let mut out = Self {
            alphabet: table.alphabet().clone(),
            states: IndexedSet::default(),
            transitions: vec![],
            accepting: vec![],
        };

        out.discover(initial, accepting, limit)?;
        let mut stack = vec![(0, 0)];

        while let Some(frame) = stack.last_mut() {
            let (source, position) = *frame;
            if position == k {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let target = table.step_by_index(&out.states[source], position);
            if target.is_empty() {
                continue;
            }
            let target_id = match out.states.get_index_of(&target) {
                Some(id) => id,
                None => {
                    let id = out.discover(target, accepting, limit)?;
                    stack.push((id, 0));
                    id
                }
            };
            out.transitions[source][position] = Some(target_id);
        }

        debug_assert!(out.size() <= bound);
        debug!(
            "subset construction discovered {} of at most {} composite states",
            out.size(),
            bound
        );
        Ok(out)
    }

    /// Appends a new composite state to the registry and returns its index.
    fn discover(&mut self, set: StateSet, accepting: &StateSet, limit: usize) -> Result<usize, S> {
        if self.states.len() >= limit {
            return Err(AutomatonError::ResourceExhausted { limit });
        }
        let id = self.states.len();
        trace!("discovered {} = {:?}", math::alphabetic_label(id), set);
        self.accepting.push(set.intersects(accepting));
        self.transitions.push(vec![None; self.alphabet.size()]);
        let (inserted, fresh) = self.states.insert_full(set);
        debug_assert!(fresh && inserted == id);
        Ok(id)
    }

    /// The composite states in the order of their discovery.
    pub fn states(&self) -> impl Iterator<Item = &StateSet> + '_ {
        self.states.iter()
    }

    /// Returns the composite state with the given index.
    pub fn state(&self, index: StateIndex) -> Result<&StateSet, S> {
        let index = self.check_state(index)?;
        Ok(&self.states[index])
    }

    /// Returns the index under which `set` was discovered, if it was discovered at all.
    pub fn index_of(&self, set: &StateSet) -> Option<StateIndex> {
        self.states.get_index_of(set)
    }

    /// The label of the composite state with the given index, these are `A`, `B`, ..., `Z`, `AA`, ...
    pub fn label(&self, index: StateIndex) -> Result<String, S> {
        let index = self.check_state(index)?;
        Ok(math::alphabetic_label(index))
    }

    /// The initial composite state, which is always the first one.
    pub fn initial(&self) -> StateIndex {
        0
    }

    /// Returns whether the composite state with the given index is accepting.
    pub fn is_accepting(&self, index: StateIndex) -> Result<bool, S> {
        let index = self.check_state(index)?;
        Ok(self.accepting[index])
    }

    /// Iterates over the indices of all accepting composite states.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.accepting.iter().positions(|&b| b)
    }

    /// Returns the composite state reached from `index` on `symbol`, or `None` if that is the
    /// empty set.
    pub fn successor(&self, index: StateIndex, symbol: &S) -> Result<Option<StateIndex>, S> {
        let index = self.check_state(index)?;
        let symbol = self.symbol_index(symbol)?;
        Ok(self.transitions[index][symbol])
    }

    /// Decides whether `word` is accepted. A word on which a transition to the empty set is taken
    /// is rejected.
    pub fn evaluate<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        let word = self.word_indices(word)?;
        let mut current = self.initial();
        for symbol in word {
            match self.transitions[current][symbol] {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }
        Ok(self.accepting[current])
    }

    /// Converts `self` into a [`DFA`] over the observable symbols of the alphabet. If some transition
    /// leads to the empty set, an additional rejecting sink state is appended which loops on every
    /// symbol.
    pub fn into_dfa(self) -> DFA<S> {
        let epsilon = self.alphabet.epsilon_index();
        let columns = (0..self.alphabet.size())
            .filter(|&i| Some(i) != epsilon)
            .collect_vec();

        let size = self.size();
        let sink = size;
        let needs_sink = self
            .transitions
            .iter()
            .any(|row| columns.iter().any(|&i| row[i].is_none()));
        let total = if needs_sink { size + 1 } else { size };

        let mut rows = self
            .transitions
            .iter()
            .map(|row| columns.iter().map(|&i| row[i].unwrap_or(sink)).collect_vec())
            .collect_vec();
        if needs_sink {
            trace!("adding sink {} to complete the transition function", sink);
            rows.push(vec![sink; columns.len()]);
        }

        let accepting = self.accepting_states().collect();
        DFA::from_parts(
            DeterministicTable::from_rows(self.alphabet.without_epsilon(), total, rows),
            self.initial(),
            accepting,
        )
    }

    /// Renders the transition table of the constructed automaton together with a legend that lists
    /// the states making up each composite state. A column for the epsilon symbol is only shown if
    /// it is used by at least one transition.
    pub fn transition_table(&self) -> TransitionTable {
        let epsilon = self.alphabet.epsilon_index();
        let columns = (0..self.alphabet.size())
            .filter(|&i| Some(i) != epsilon || self.transitions.iter().any(|row| row[i].is_some()))
            .collect_vec();

        let rows = (0..self.size()).map(|q| TableRow {
            initial: q == self.initial(),
            accepting: self.accepting[q],
            name: math::alphabetic_label(q),
            cells: columns
                .iter()
                .map(|&i| match self.transitions[q][i] {
                    Some(p) => math::alphabetic_label(p),
                    None => "∅".to_string(),
                })
                .collect(),
        });

        let legend = self
            .states
            .iter()
            .enumerate()
            .map(|(q, set)| format!("{} = {}", math::alphabetic_label(q), set.show()));
        TransitionTable::build(&self.alphabet, &columns, rows).with_legend(legend)
    }
}

impl<S: Symbol> TransitionSystem for SubsetConstruction<S> {
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::automaton::{find_disagreement, words_up_to};
    use crate::error::AutomatonError;
    use crate::prelude::*;

    /// Accepts words over `0` and `1` that contain a `0` followed by any symbol and another `0`.
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

    /// The `k`-th symbol from the end is a `b`, needs `2^k` composite states.
    fn kth_from_last(k: usize) -> NFA<char> {
        let mut builder = NFA::builder()
            .with_states(k + 1)
            .with_alphabet(['a', 'b'])
            .with_initial(0)
            .with_accepting([k])
            .with_edges([(0, 'a', 0), (0, 'b', 0), (0, 'b', 1)]);
        for i in 1..k {
            builder.add_edge(i, 'a', i + 1).add_edge(i, 'b', i + 1);
        }
        builder.into_nfa().unwrap()
    }

    #[test_log::test]
    fn discovery_order() {
        let sc = zero_any_zero().subset_construction().unwrap();
        let expected: Vec<StateSet> = vec![
            [0].into(),
            [0, 1].into(),
            [0, 1, 2].into(),
            [0, 1, 2, 3].into(),
            [0, 2, 3].into(),
            [0, 1, 3].into(),
            [0, 3].into(),
            [0, 2].into(),
        ];
        assert_eq!(sc.states().cloned().collect_vec(), expected);
        assert_eq!(sc.size(), 8);
        assert_eq!(sc.label(3), Ok("D".to_string()));
        assert_eq!(
            sc.label(8),
            Err(AutomatonError::InvalidState { state: 8, size: 8 })
        );
        assert_eq!(sc.index_of(&StateSet::from([0, 3])), Some(6));
        assert_eq!(sc.accepting_states().collect_vec(), vec![3, 4, 5, 6]);

        let transitions = (0..sc.size())
            .map(|q| {
                ['0', '1']
                    .iter()
                    .map(|a| sc.successor(q, a).unwrap().map(|p| sc.label(p).unwrap()))
                    .map(Option::unwrap_or_default)
                    .join("")
            })
            .collect_vec();
        assert_eq!(
            transitions,
            vec!["BA", "CH", "DH", "DE", "FG", "DE", "FG", "FA"]
        );
    }

    #[test]
    fn construction_is_reproducible() {
        let nfa = zero_any_zero();
        let first = nfa.subset_construction().unwrap();
        let second = nfa.subset_construction().unwrap();
        assert!(first.states().eq(second.states()));
        assert_eq!(
            first.transition_table().to_string(),
            second.transition_table().to_string()
        );
        for word in ["000", "0110", "", "10100"] {
            let verdict = first.evaluate(word);
            assert_eq!(verdict, first.evaluate(word));
            assert_eq!(verdict, second.evaluate(word));
        }
    }

    #[test_log::test]
    fn accepts_the_same_language() {
        let nfa = zero_any_zero();
        let sc = nfa.subset_construction().unwrap();
        assert_eq!(
            find_disagreement(&nfa, &sc, words_up_to(nfa.alphabet(), 8)),
            Ok(None)
        );
        assert_eq!(sc.evaluate("0110"), Ok(false));
        assert_eq!(sc.evaluate("1000"), Ok(true));
        assert_eq!(sc.evaluate("012"), Err(AutomatonError::InvalidSymbol('2')));

        let dfa = sc.into_dfa();
        assert_eq!(dfa.size(), 8);
        assert_eq!(
            find_disagreement(&nfa, &dfa, words_up_to(nfa.alphabet(), 8)),
            Ok(None)
        );
    }

    #[test]
    fn worst_case_family() {
        for k in 1..=6 {
            let nfa = kth_from_last(k);
            let sc = nfa.subset_construction().unwrap();
            assert_eq!(sc.size(), 1 << k);
            assert!(sc.size() <= crate::math::powerset_size(nfa.size()));
        }
        let nfa = kth_from_last(4);
        let sc = nfa.subset_construction().unwrap();
        assert_eq!(
            find_disagreement(&nfa, &sc, words_up_to(nfa.alphabet(), 7)),
            Ok(None)
        );
    }

    #[test]
    fn state_limit() {
        let nfa = kth_from_last(6);
        let options = SubsetOptions::with_max_states(10);
        assert_eq!(
            nfa.subset_construction_with(StateSet::from([0]), options)
                .map(|sc| sc.size()),
            Err(AutomatonError::ResourceExhausted { limit: 10 })
        );
        let options = SubsetOptions::with_max_states(64);
        assert_eq!(
            nfa.subset_construction_with(StateSet::from([0]), options)
                .map(|sc| sc.size()),
            Ok(64)
        );
    }

    #[test]
    fn sinks() {
        let nfa = NFA::builder()
            .with_states(2)
            .with_alphabet(['a', 'b'])
            .with_initial(0)
            .with_accepting([1])
            .with_edges([(0, 'a', 1)])
            .into_nfa()
            .unwrap();
        let sc = nfa.subset_construction().unwrap();
        assert_eq!(sc.size(), 2);
        assert_eq!(sc.successor(0, &'b'), Ok(None));
        assert_eq!(sc.successor(1, &'a'), Ok(None));
        assert_eq!(sc.evaluate("ab"), Ok(false));

        let dfa = sc.into_dfa();
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.successor(1, &'a'), Ok(2));
        assert_eq!(dfa.successor(2, &'b'), Ok(2));
        assert_eq!(dfa.is_accepting(2), Ok(false));
        assert_eq!(dfa.evaluate("a"), Ok(true));
        assert_eq!(dfa.evaluate("aa"), Ok(false));
        assert_eq!(dfa.evaluate("b"), Ok(false));
    }

    #[test]
    fn start_sets() {
        let nfa = zero_any_zero();
        let sc = nfa.subset_construction_from(StateSet::from([0, 3])).unwrap();
        assert_eq!(sc.state(0), Ok(&StateSet::from([0, 3])));
        assert_eq!(sc.is_accepting(0), Ok(true));
        assert_eq!(
            sc.is_accepting(99),
            Err(AutomatonError::InvalidState {
                state: 99,
                size: sc.size()
            })
        );
        assert_eq!(
            sc.state(99),
            Err(AutomatonError::InvalidState {
                state: 99,
                size: sc.size()
            })
        );
        assert_eq!(sc.evaluate(""), Ok(true));
        assert_eq!(
            nfa.subset_construction_from(StateSet::from([0, 7]))
                .map(|sc| sc.size()),
            Err(AutomatonError::InvalidState { state: 7, size: 4 })
        );
    }

    #[test]
    fn long_chains() {
        let n = 100_000;
        let mut builder = NFA::builder()
            .with_states(n)
            .with_alphabet(['a'])
            .with_initial(0)
            .with_accepting([n - 1]);
        for i in 0..n - 1 {
            builder.add_edge(i, 'a', i + 1);
        }
        let sc = builder.into_nfa().unwrap().subset_construction().unwrap();
        assert_eq!(sc.size(), n);
        assert_eq!(sc.state(n - 1), Ok(&StateSet::singleton(n - 1)));
        assert_eq!(sc.evaluate(vec!['a'; n - 1]), Ok(true));
        assert_eq!(sc.evaluate(vec!['a'; n]), Ok(false));
    }

    #[test]
    fn table() {
        let nfa = NFA::builder()
            .with_states(2)
            .with_alphabet(['a', 'b'])
            .with_epsilon('ε')
            .with_initial(0)
            .with_accepting([1])
            .with_edges([(0, 'a', 1), (0, 'a', 0), (1, 'b', 1)])
            .into_nfa()
            .unwrap();
        let sc = nfa.subset_construction().unwrap();
        let table = sc.transition_table();
        let header = table.table().lines().nth(1).unwrap_or_default();
        assert_eq!(
            header
                .split('│')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect_vec(),
            vec!["State", "a", "b"]
        );
        assert_eq!(table.legend(), ["A = { q0 }", "B = { q0, q1 }", "C = { q1 }"]);
        let rendered = table.to_string();
        assert!(rendered.contains("Where:\nA = { q0 }"));
        assert!(rendered.contains("∅"));

        let dfa = sc.into_dfa();
        assert_eq!(dfa.alphabet().size(), 2);
        assert_eq!(dfa.size(), 4);
    }
}
