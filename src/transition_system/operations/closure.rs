use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    show::show_state,
    transition_system::{NondeterministicTable, StateIndex, StateSet, TransitionSystem},
    Show,
};

/// Stores for every state its epsilon closure, which is the set of all states that can be reached
/// through zero or more silent transitions. Every closure contains the state itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureTable(Vec<StateSet>);

impl ClosureTable {
    /// Computes the closures of all states in ascending order. Each closure is obtained through a
    /// depth-first search along the edges labelled with the symbol at position `epsilon`. The search
    /// uses an explicit stack and marks visited states, so long chains and cycles of silent
    /// transitions are handled without recursion.
    ///
    /// With `n` states and `m` silent edges this takes `O(n * (n + m))` time.
    pub fn compute<S: Symbol>(table: &NondeterministicTable<S>, epsilon: usize) -> Self {
        let size = table.size();
        let mut seen = BitSet::with_capacity(size);
        let mut stack = Vec::with_capacity(size);

        let closures = table
            .state_indices()
            .map(|q| explore(table, epsilon, q, &mut seen, &mut stack))
            .collect_vec();

        debug!(
            "computed epsilon closures of {size} states, {} states in total",
            closures.iter().map(StateSet::len).sum::<usize>()
        );
        Self(closures)
    }

    /// Returns the closure of `state`, if the state exists.
    pub fn get(&self, state: StateIndex) -> Option<&StateSet> {
        self.0.get(state)
    }

    /// Returns the union of the closures of all states in `states`, which the caller has to
    /// validate first.
    pub(crate) fn of_set(&self, states: &StateSet) -> StateSet {
        debug_assert!(states.max_state().map_or(true, |q| q < self.len()));
        let mut out = StateSet::empty();
        for closure in states.iter().filter_map(|&q| self.get(q)) {
            out.union_with(closure);
        }
        out
    }

    /// Iterates over the pairs of states and their closures in ascending order of the states.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &StateSet)> + '_ {
        self.0.iter().enumerate()
    }

    /// Returns the number of states, which is the number of closures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no closures, which cannot happen for a validated automaton.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collects the states reachable from `origin` through silent transitions. `seen` and `stack` are
/// scratch space that is reused between calls.
fn explore<S: Symbol>(
    table: &NondeterministicTable<S>,
    epsilon: usize,
    origin: StateIndex,
    seen: &mut BitSet,
    stack: &mut Vec<StateIndex>,
) -> StateSet {
    seen.clear();
    seen.insert(origin);
    stack.push(origin);
    while let Some(p) = stack.pop() {
        for &r in table.successors_by_index(p, epsilon) {
            if seen.insert(r) {
                trace!("{} reaches {} silently", show_state(origin), show_state(r));
                stack.push(r);
            }
        }
    }
    seen.iter().collect()
}

impl Show for ClosureTable {
    fn show(&self) -> String {
        self.iter()
            .map(|(q, closure)| format!("ECLOSE({}) = {}", show_state(q), closure.show()))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn table(size: usize, silent: &[(StateIndex, StateIndex)]) -> NondeterministicTable<char> {
        let alphabet = Alphabet::with_epsilon(['a'], 'e').unwrap();
        let mut table = NondeterministicTable::new(alphabet, size);
        for &(p, q) in silent {
            table.insert(p, 1, q);
        }
        table.insert(0, 0, size - 1);
        table
    }

    #[test_log::test]
    fn reflexive_and_transitive() {
        let closures = ClosureTable::compute(&table(4, &[(0, 1), (1, 2)]), 1);
        assert_eq!(closures.len(), 4);
        assert_eq!(closures.get(0), Some(&StateSet::from([0, 1, 2])));
        assert_eq!(closures.get(1), Some(&StateSet::from([1, 2])));
        assert_eq!(closures.get(3), Some(&StateSet::from([3])));
        assert_eq!(closures.get(4), None);
        assert_eq!(
            closures.of_set(&StateSet::from([1, 3])),
            StateSet::from([1, 2, 3])
        );
    }

    #[test_log::test]
    fn cycles_terminate() {
        let closures = ClosureTable::compute(&table(2, &[(0, 1), (1, 0)]), 1);
        assert_eq!(closures.get(0), Some(&StateSet::from([0, 1])));
        assert_eq!(closures.get(0), closures.get(1));
        assert_eq!(
            closures.show(),
            "ECLOSE(q0) = { q0, q1 }\nECLOSE(q1) = { q0, q1 }"
        );
    }

    #[test]
    fn closures_are_idempotent() {
        let closures = ClosureTable::compute(
            &table(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]),
            1,
        );
        for (q, closure) in closures.iter() {
            assert!(closure.contains(q));
            assert_eq!(&closures.of_set(closure), closure);
        }
    }

    #[test]
    fn long_silent_chain() {
        let size = 3_000;
        let chain = (0..size - 1).map(|q| (q, q + 1)).collect_vec();
        let closures = ClosureTable::compute(&table(size, &chain), 1);
        assert_eq!(closures.get(0).map(StateSet::len), Some(size));
        assert_eq!(closures.get(size - 1), Some(&StateSet::singleton(size - 1)));
    }

    #[test]
    fn deep_silent_chain() {
        let size = 100_000;
        let chain = (0..size - 1).map(|q| (q, q + 1)).collect_vec();
        let table = table(size, &chain);
        let mut seen = BitSet::with_capacity(size);
        let mut stack = vec![];

        let closure = explore(&table, 1, 0, &mut seen, &mut stack);
        assert_eq!(closure.len(), size);
        assert_eq!(closure.max_state(), Some(size - 1));
        assert!(stack.is_empty());

        let closure = explore(&table, 1, size - 10, &mut seen, &mut stack);
        assert_eq!(closure, (size - 10..size).collect::<StateSet>());
    }
}
