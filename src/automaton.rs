use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::Result,
    transition_system::operations::SubsetConstruction,
    word::FiniteWord,
};

mod dfa;
pub use dfa::DFA;

mod nfa;
pub use nfa::NFA;

mod enfa;
pub use enfa::ENFA;

/// Implemented by everything that decides acceptance of finite words.
pub trait Acceptor {
    /// The type of symbols that words consist of.
    type Symbol: Symbol;

    /// Returns whether `word` is accepted, fails if the word contains a symbol that is not
    /// part of the alphabet.
    fn accepts<W: FiniteWord<Self::Symbol>>(&self, word: W) -> Result<bool, Self::Symbol>;
}

impl<S: Symbol> Acceptor for DFA<S> {
    type Symbol = S;
    fn accepts<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        self.evaluate(word)
    }
}

impl<S: Symbol> Acceptor for NFA<S> {
    type Symbol = S;
    fn accepts<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        self.evaluate(word)
    }
}

impl<S: Symbol> Acceptor for ENFA<S> {
    type Symbol = S;
    fn accepts<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        self.evaluate(word)
    }
}

impl<S: Symbol> Acceptor for SubsetConstruction<S> {
    type Symbol = S;
    fn accepts<W: FiniteWord<S>>(&self, word: W) -> Result<bool, S> {
        self.evaluate(word)
    }
}

/// Runs both acceptors on every given word and returns the first word on which they disagree. If
/// `None` is returned, the two accept the same words among the given ones.
pub fn find_disagreement<L, R, I, W>(left: &L, right: &R, words: I) -> Result<Option<W>, L::Symbol>
where
    L: Acceptor,
    R: Acceptor<Symbol = L::Symbol>,
    I: IntoIterator<Item = W>,
    W: FiniteWord<L::Symbol>,
{
    for word in words {
        if left.accepts(&word)? != right.accepts(&word)? {
            return Ok(Some(word));
        }
    }
    Ok(None)
}

/// Enumerates all words over the observable symbols of `alphabet` with at most `max_length` symbols,
/// ordered by length and then lexicographically with respect to the alphabet order.
pub fn words_up_to<S: Symbol>(
    alphabet: &Alphabet<S>,
    max_length: usize,
) -> impl Iterator<Item = Vec<S>> {
    let symbols = alphabet.observable().cloned().collect_vec();
    std::iter::once(vec![]).chain((1..=max_length).flat_map(move |length| {
        itertools::repeat_n(symbols.clone(), length).multi_cartesian_product()
    }))
}
