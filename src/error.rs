use thiserror::Error;

use crate::transition_system::StateIndex;

/// Describes why the definition of an automaton was rejected before any simulation took place.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("an automaton needs at least one state")]
    NoStates,
    #[error("the symbol at position {0} occurs more than once in the alphabet")]
    DuplicateSymbol(usize),
    #[error("no initial state was given")]
    NoInitialState,
    #[error("initial state q{state} does not exist, there are only {size} states")]
    InitialOutOfRange { state: StateIndex, size: usize },
    #[error("accepting state q{state} does not exist, there are only {size} states")]
    AcceptingOutOfRange { state: StateIndex, size: usize },
    #[error("only a nondeterministic automaton may have more than one initial state")]
    MultipleInitialStates,
    #[error("state q{state} has two different successors on the symbol at position {symbol}")]
    NondeterministicEdge { state: StateIndex, symbol: usize },
    #[error("a deterministic automaton cannot have epsilon transitions")]
    EpsilonInDeterministic,
    #[error("computing epsilon closures requires an alphabet with an epsilon symbol")]
    MissingEpsilon,
}

/// Errors that can occur when building or querying an automaton. The type parameter `S` is
/// the type of symbols, so that an offending symbol can be handed back to the caller.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError<S> {
    /// A symbol was used that is not part of the alphabet, or the epsilon symbol was used
    /// where only observable symbols are allowed.
    #[error("symbol {0:?} is not part of the alphabet")]
    InvalidSymbol(S),
    /// A state index outside of `0..size` was used.
    #[error("state q{state} does not exist, there are only {size} states")]
    InvalidState { state: StateIndex, size: usize },
    /// The definition of the automaton is inconsistent.
    #[error("malformed automaton: {0}")]
    MalformedConstruction(#[from] MalformedReason),
    /// A deterministic automaton has no successor for the given pair.
    #[error("no transition is defined for state q{state} on symbol {symbol:?}")]
    IncompleteTransitionTable { state: StateIndex, symbol: S },
    /// A traversal exceeded the configured maximal number of states.
    #[error("exploration exceeded the limit of {limit} states")]
    ResourceExhausted { limit: usize },
}

/// Shorthand for results whose error is an [`AutomatonError`] over symbols of type `S`.
pub type Result<T, S> = std::result::Result<T, AutomatonError<S>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err: AutomatonError<char> = MalformedReason::NoStates.into();
        assert_eq!(
            err.to_string(),
            "malformed automaton: an automaton needs at least one state"
        );
        assert_eq!(
            AutomatonError::InvalidSymbol('x').to_string(),
            "symbol 'x' is not part of the alphabet"
        );
        assert_eq!(
            AutomatonError::<char>::InvalidState { state: 7, size: 3 }.to_string(),
            "state q7 does not exist, there are only 3 states"
        );
    }
}
