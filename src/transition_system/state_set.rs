use itertools::Itertools;

use crate::{
    math::{self, OrderedSet},
    show::show_state,
    Show,
};

use super::StateIndex;

/// A set of states. It is used as the collection of currently active states when simulating a
/// nondeterministic automaton and as a single composite state in the subset construction.
///
/// The states are kept in ascending order, hence equality, hashing and iteration do not depend on
/// the order in which states were inserted.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(OrderedSet<StateIndex>);

impl StateSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a set that contains only `q`.
    pub fn singleton(q: StateIndex) -> Self {
        Self(OrderedSet::from_iter([q]))
    }

    /// Iterates over the contained states in ascending order.
    pub fn iter(&self) -> math::ordered_set::Iter<'_, StateIndex> {
        self.0.iter()
    }

    /// Returns true if `q` is an element of the set.
    pub fn contains(&self, q: StateIndex) -> bool {
        self.0.contains(&q)
    }

    /// Inserts `q` and returns whether it was not present before.
    pub fn insert(&mut self, q: StateIndex) -> bool {
        self.0.insert(q)
    }

    /// Adds all states of `other` to `self`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.0.extend(other.iter().copied())
    }

    /// Returns a new set that contains the states of both `self` and `other`.
    pub fn union(&self, other: &StateSet) -> StateSet {
        self.0.union(&other.0).copied().collect()
    }

    /// Returns true if `self` and `other` share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|&q| large.contains(q))
    }

    /// Returns true if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of states in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the largest state in the set, if any.
    pub fn max_state(&self) -> Option<StateIndex> {
        self.0.last().copied()
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.iter().map(|q| format!("{q:?}")).join(", "))
        }
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        if self.is_empty() {
            "∅".to_string()
        } else {
            format!("{{ {} }}", self.iter().map(|&q| show_state(q)).join(", "))
        }
    }
}

impl Extend<StateIndex> for StateSet {
    fn extend<T: IntoIterator<Item = StateIndex>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateIndex>>(iter: T) -> Self {
        Self(OrderedSet::from_iter(iter))
    }
}

impl<const N: usize> From<[StateIndex; N]> for StateSet {
    fn from(value: [StateIndex; N]) -> Self {
        Self::from_iter(value)
    }
}

impl IntoIterator for StateSet {
    type IntoIter = math::ordered_set::IntoIter<StateIndex>;
    type Item = StateIndex;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type IntoIter = math::ordered_set::Iter<'a, StateIndex>;
    type Item = &'a StateIndex;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
