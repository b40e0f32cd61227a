use itertools::Itertools;
use tracing::debug;

use crate::{
    alphabet::{Alphabet, Symbol},
    automaton::{DFA, ENFA, NFA},
    error::{AutomatonError, MalformedReason, Result},
};

use super::{DeterministicTable, NondeterministicTable, StateIndex, StateSet, TransitionSystem};

/// Helper struct for the construction of automata. It collects the number of states, the alphabet, the
/// initial and accepting states as well as a list of edges. Nothing is checked until one of the
/// finishing methods [`Self::into_dfa`], [`Self::into_nfa`] or [`Self::into_enfa`] is called, which
/// validate the collected data and produce an immutable automaton.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']` which accepts
/// precisely the words with an odd number of `b`s.
/// ```
/// use finite_automata::prelude::*;
///
/// let dfa = AutomatonBuilder::new()
///     .with_states(2)
///     .with_alphabet(['a', 'b'])
///     .with_initial(0)
///     .with_accepting([1])
///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .into_dfa()
///     .unwrap();
/// assert_eq!(dfa.evaluate("abab"), Ok(false));
/// assert_eq!(dfa.evaluate("ab"), Ok(true));
/// ```
#[derive(Clone, Debug)]
pub struct AutomatonBuilder<S> {
    size: usize,
    symbols: Vec<S>,
    epsilon: Option<S>,
    initial: Vec<StateIndex>,
    accepting: Vec<StateIndex>,
    edges: Vec<(StateIndex, S, StateIndex)>,
}

impl<S> Default for AutomatonBuilder<S> {
    fn default() -> Self {
        Self {
            size: 0,
            symbols: vec![],
            epsilon: None,
            initial: vec![],
            accepting: vec![],
            edges: vec![],
        }
    }
}

/// The validated ingredients shared by all kinds of automata.
struct Parts<S: Symbol> {
    table: NondeterministicTable<S>,
    initial: StateSet,
    accepting: StateSet,
}

impl<S: Symbol> AutomatonBuilder<S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of states, the states are then `0..size`.
    pub fn with_states(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the symbols of the alphabet, their order is preserved.
    pub fn with_alphabet<I: IntoIterator<Item = S>>(mut self, symbols: I) -> Self {
        self.symbols = symbols.into_iter().collect();
        self
    }

    /// Designates `epsilon` as the symbol marking silent transitions. It need not be part of the
    /// symbols given to [`Self::with_alphabet`].
    pub fn with_epsilon(mut self, epsilon: S) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Makes `state` the only initial state.
    pub fn with_initial(mut self, state: StateIndex) -> Self {
        self.initial = vec![state];
        self
    }

    /// Sets the initial states, only a nondeterministic automaton may have more than one.
    pub fn with_initial_states<I: IntoIterator<Item = StateIndex>>(mut self, states: I) -> Self {
        self.initial = states.into_iter().collect();
        self
    }

    /// Adds the given states to the set of accepting states.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    /// Adds a list of edges, each given as a triple `(source, symbol, target)`. Adding an edge more
    /// than once has no effect.
    pub fn with_edges<I: IntoIterator<Item = (StateIndex, S, StateIndex)>>(mut self, edges: I) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Adds a single edge `source --symbol--> target`.
    pub fn add_edge(&mut self, source: StateIndex, symbol: S, target: StateIndex) -> &mut Self {
        self.edges.push((source, symbol, target));
        self
    }

    fn alphabet(&self) -> Result<Alphabet<S>, S> {
        match &self.epsilon {
            Some(eps) => Alphabet::with_epsilon(self.symbols.iter().cloned(), eps.clone()),
            None => Alphabet::new(self.symbols.iter().cloned()),
        }
    }

    fn validate(self) -> Result<Parts<S>, S> {
        let size = self.size;
        if size == 0 {
            return Err(MalformedReason::NoStates.into());
        }
        let alphabet = self.alphabet()?;

        if self.initial.is_empty() {
            return Err(MalformedReason::NoInitialState.into());
        }
        if let Some(&state) = self.initial.iter().find(|&&q| q >= size) {
            return Err(MalformedReason::InitialOutOfRange { state, size }.into());
        }
        if let Some(&state) = self.accepting.iter().find(|&&q| q >= size) {
            return Err(MalformedReason::AcceptingOutOfRange { state, size }.into());
        }

        let mut table = NondeterministicTable::new(alphabet, size);
        for (source, symbol, target) in self.edges {
            let source = table.check_state(source)?;
            let target = table.check_state(target)?;
            let symbol = table.symbol_index(&symbol)?;
            table.insert(source, symbol, target);
        }

        Ok(Parts {
            table,
            initial: self.initial.into_iter().collect(),
            accepting: self.accepting.into_iter().collect(),
        })
    }

    fn single_initial(initial: &StateSet) -> Result<StateIndex, S> {
        match initial.iter().exactly_one() {
            Ok(&q) => Ok(q),
            Err(_) => Err(MalformedReason::MultipleInitialStates.into()),
        }
    }

    /// Builds a [`NFA`]. If an epsilon symbol was designated, it is kept in the alphabet but treated
    /// like any other symbol, use [`Self::into_enfa`] to obtain silent transitions.
    pub fn into_nfa(self) -> Result<NFA<S>, S> {
        let Parts {
            table,
            initial,
            accepting,
        } = self.validate()?;
        debug!(
            "built NFA with {} states and {} edges",
            table.size(),
            table.edge_count()
        );
        Ok(NFA::from_parts(table, initial, accepting))
    }

    /// Builds a [`DFA`]. This fails if an epsilon symbol was designated, if there is more than one
    /// initial state or if the transitions do not form a total function.
    pub fn into_dfa(self) -> Result<DFA<S>, S> {
        if self.epsilon.is_some() {
            return Err(MalformedReason::EpsilonInDeterministic.into());
        }
        let Parts {
            table,
            initial,
            accepting,
        } = self.validate()?;
        let initial = Self::single_initial(&initial)?;

        let k = table.alphabet().size();
        let mut rows = Vec::with_capacity(table.size());
        for q in table.state_indices() {
            let mut row = Vec::with_capacity(k);
            for (i, symbol) in table.alphabet().universe().enumerate() {
                let successors = table.successors_by_index(q, i);
                match (successors.iter().next(), successors.len()) {
                    (Some(&p), 1) => row.push(p),
                    (None, _) => {
                        return Err(AutomatonError::IncompleteTransitionTable {
                            state: q,
                            symbol: symbol.clone(),
                        })
                    }
                    _ => {
                        return Err(
                            MalformedReason::NondeterministicEdge { state: q, symbol: i }.into()
                        )
                    }
                }
            }
            rows.push(row);
        }

        let size = table.size();
        let alphabet = table.alphabet().clone();
        debug!("built DFA with {size} states over {k} symbols");
        Ok(DFA::from_parts(
            DeterministicTable::from_rows(alphabet, size, rows),
            initial,
            accepting,
        ))
    }

    /// Builds an [`ENFA`] and computes its epsilon closures. This requires that an epsilon symbol
    /// was designated through [`Self::with_epsilon`] and that there is a single initial state.
    pub fn into_enfa(self) -> Result<ENFA<S>, S> {
        if self.epsilon.is_none() {
            return Err(MalformedReason::MissingEpsilon.into());
        }
        let Parts {
            table,
            initial,
            accepting,
        } = self.validate()?;
        let initial = Self::single_initial(&initial)?;
        debug!(
            "built ENFA with {} states and {} edges",
            table.size(),
            table.edge_count()
        );
        ENFA::from_parts(table, initial, accepting)
    }
}
