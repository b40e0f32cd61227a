use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, Symbol},
    error::{AutomatonError, MalformedReason, Result},
    show::show_state,
    transition_system::{
        operations::ClosureTable, table::TableRow, AutomatonBuilder, NondeterministicTable,
        StateIndex, StateSet, TransitionSystem, TransitionTable,
    },
    word::FiniteWord,
    Show,
};

use super::NFA;

/// A nondeterministic finite automaton with silent transitions (ε-NFA). One symbol of the alphabet is
/// designated as epsilon, transitions labelled with it can be taken without reading anything.
///
/// Upon creation, the epsilon closure of every state is computed and stored in a [`ClosureTable`].
/// As the automaton cannot be modified afterwards, the stored closures are always up to date.
/// The set of active states is kept closed under silent transitions: simulation starts in the
/// closure of the initial state and after each symbol the closures of all reached states are
/// added.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let enfa = ENFA::builder()
///     .with_states(2)
///     .with_alphabet(['a'])
///     .with_epsilon('_')
///     .with_initial(0)
///     .with_accepting([1])
///     .with_edges([(0, '_', 1), (1, 'a', 0)])
///     .into_enfa()
///     .unwrap();
/// assert_eq!(enfa.closure(0), Ok(&StateSet::from([0, 1])));
/// assert_eq!(enfa.evaluate(""), Ok(true));
/// assert_eq!(enfa.evaluate("aa"), Ok(true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ENFA<S: Symbol> {
    table: NondeterministicTable<S>,
    initial: StateIndex,
    accepting: StateSet,
    epsilon: usize,
    closures: ClosureTable,
    initial_closure: StateSet,
}

impl<S: Symbol> ENFA<S> {
    /// Returns a builder, which is the only way of creating an [`ENFA`] from scratch.
    pub fn builder() -> AutomatonBuilder<S> {
        AutomatonBuilder::new()
    }

    pub(crate) fn from_parts(
        table: NondeterministicTable<S>,
        initial: StateIndex,
        accepting: StateSet,
    ) -> Result<Self, S> {
        let epsilon = table
            .alphabet()
            .epsilon_index()
            .ok_or(MalformedReason::MissingEpsilon)?;
        let closures = ClosureTable::compute(&table, epsilon);
        let initial_closure = closures.of_set(&StateSet::singleton(initial));
        Ok(Self {
            table,
            initial,
            accepting,
            epsilon,
            closures,
            initial_closure,
        })
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

    /// Computes the epsilon closures of all states from scratch. The result always equals
    /// [`Self::closures`], which returns the closures computed when the automaton was built.
    pub fn compute_closures(&self) -> ClosureTable {
        ClosureTable::compute(&self.table, self.epsilon)
    }

    /// The epsilon closures of all states.
    pub fn closures(&self) -> &ClosureTable {
        &self.closures
    }

    /// Returns the epsilon closure of `state`.
    pub fn closure(&self, state: StateIndex) -> Result<&StateSet, S> {
        self.closures
            .get(state)
            .ok_or(AutomatonError::InvalidState {
                state,
                size: self.size(),
            })
    }

    /// Returns the union of the epsilon closures of all states in `states`.
    pub fn closure_of_set(&self, states: &StateSet) -> Result<StateSet, S> {
        self.check_states(states)?;
        Ok(self.closures.of_set(states))
    }

    /// The states that are active before any symbol is read, which is the closure of the initial state.
    pub fn initial_states(&self) -> &StateSet {
        &self.initial_closure
    }

    /// Follows all transitions on `symbol` from the states in `states` and adds the closures of the
    /// reached states. `symbol` must not be the epsilon symbol.
    pub fn transition(&self, states: &StateSet, symbol: &S) -> Result<StateSet, S> {
        self.check_states(states)?;
        let symbol = self.observable_index(symbol)?;
        Ok(self.transition_by_index(states, symbol))
    }

    fn transition_by_index(&self, states: &StateSet, symbol: usize) -> StateSet {
        let mut out = StateSet::empty();
        for &q in states {
            for &p in self.table.successors_by_index(q, symbol) {
                // `out` is a union of closures, so it already contains the closure of `p`
                if out.contains(p) {
                    continue;
                }
                if let Some(closure) = self.closures.get(p) {
                    out.union_with(closure);
                }
            }
        }
        out
    }

    /// Returns the sets of active states while reading `word`, starting with the closure of the
    /// initial state. The sequence stops early if no state is active anymore.
    pub fn active_sets<W: FiniteWord<S>>(&self, word: W) -> Result<Vec<StateSet>, S> {
        let word = self.word_indices(word)?;
        let mut sets = Vec::with_capacity(word.len() + 1);
        sets.push(self.initial_states().clone());
        for symbol in word {
            let next = match sets.last() {
                Some(active) if !active.is_empty() => self.transition_by_index(active, symbol),
                _ => break,
            };
            sets.push(next);
        }
        Ok(sets)
    }

    /// Decides whether `word` is accepted. The empty word is accepted if the closure of the initial
    /// state contains an accepting state. The simulation stops as soon as no state is active anymore.
    pub fn evaluate<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        let word = self.word_indices(word)?;
        let mut active = self.initial_states().clone();
        for (i, symbol) in word.into_iter().enumerate() {
            active = self.transition_by_index(&active, symbol);
            trace!("active after {} symbols: {}", i + 1, active.show());
            if active.is_empty() {
                debug!("ENFA has no active states left, rejecting");
                return Ok(false);
            }
        }
        Ok(active.intersects(&self.accepting))
    }

    /// Produces an equivalent [`NFA`] without silent transitions. Its initial states are the closure
    /// of the initial state and from each state `q` it has a transition on `a` to every state of
    /// [`Self::transition`] applied to `{q}` and `a`. Feeding the result into the subset construction
    /// yields a [`crate::automaton::DFA`] for the language of `self`.
    pub fn remove_epsilon(&self) -> NFA<S> {
        let alphabet = self.alphabet().without_epsilon();
        let mut table = NondeterministicTable::new(alphabet, self.size());
        for q in self.state_indices() {
            let source = StateSet::singleton(q);
            for a in 0..self.alphabet().size() {
                if a == self.epsilon {
                    continue;
                }
                for p in self.transition_by_index(&source, a) {
                    table.insert(q, a, p);
                }
            }
        }
        debug!(
            "removed silent transitions, {} edges remain",
            table.edge_count()
        );
        NFA::from_parts(table, self.initial_states().clone(), self.accepting.clone())
    }

    /// Renders the transition table including the column of the epsilon symbol.
    pub fn transition_table(&self) -> TransitionTable {
        let columns = (0..self.alphabet().size()).collect_vec();
        let rows = self.state_indices().map(|q| TableRow {
            initial: q == self.initial,
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

impl<S: Symbol> TransitionSystem for ENFA<S> {
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        self.table.alphabet()
    }

    fn size(&self) -> usize {
        self.table.size()
    }
}
