#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Alphabets are ordered collections of distinct symbols, one of which may be designated as
/// the epsilon symbol that labels silent transitions.
pub mod alphabet;

/// Finite words, i.e. finite sequences of symbols that automata read.
pub mod word;

/// Sets, maps and some small numerical helpers used throughout the crate.
pub mod math;

mod show;
pub use show::Show;

/// Errors that can occur while building or running automata.
pub mod error;

/// Transition tables and the algorithms that operate on them: the subset construction and the
/// computation of epsilon closures. Every automaton is backed by one of the tables defined here.
pub mod transition_system;

/// The three kinds of finite automata, deterministic ([`automaton::DFA`]), nondeterministic
/// ([`automaton::NFA`]) and nondeterministic with silent transitions ([`automaton::ENFA`]).
pub mod automaton;

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, CharAlphabet, Symbol},
        automaton::{find_disagreement, words_up_to, Acceptor, DFA, ENFA, NFA},
        error::{AutomatonError, MalformedReason},
        transition_system::{
            operations::{ClosureTable, SubsetConstruction, SubsetOptions},
            AutomatonBuilder, Run, StateIndex, StateSet, TransitionSystem, TransitionTable,
        },
        word::FiniteWord,
        Show,
    };
}
