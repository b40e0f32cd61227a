use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::{
    error::{MalformedReason, Result},
    math, Show,
};

/// A symbol of an alphabet, which is also the type of the symbols in a word. Anything that can be
/// compared, ordered, hashed and displayed qualifies, so `char`, integers, `String` or a
/// custom enum all work.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}
impl<S: Clone + Eq + Ord + Hash + Debug + Show> Symbol for S {}

/// An alphabet is a finite, ordered collection of distinct [`Symbol`]s. The order in which the symbols
/// are given is the order in which algorithms iterate over them, so it influences for example the
/// order in which a subset construction discovers its states.
///
/// Optionally, one element of the alphabet is designated as the *epsilon* symbol which marks
/// silent transitions. It is always placed at the very end of the alphabet and never matches
/// an input symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet<S: Symbol> {
    symbols: Vec<S>,
    epsilon: Option<S>,
    positions: math::Map<S, usize>,
}

/// An [`Alphabet`] whose symbols are single `char`s.
pub type CharAlphabet = Alphabet<char>;

impl<S: Symbol> Alphabet<S> {
    /// Creates an alphabet from the given symbols, keeping their order. Fails if a symbol
    /// occurs more than once.
    pub fn new<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self, S> {
        let symbols = symbols.into_iter().collect_vec();
        let mut positions = math::Map::default();
        for (i, sym) in symbols.iter().enumerate() {
            if positions.insert(sym.clone(), i).is_some() {
                return Err(MalformedReason::DuplicateSymbol(i).into());
            }
        }
        Ok(Self {
            symbols,
            epsilon: None,
            positions,
        })
    }

    /// Creates an alphabet from the given symbols and designates `epsilon` as the silent
    /// symbol. If `epsilon` is among `symbols`, it is moved to the end.
    pub fn with_epsilon<I: IntoIterator<Item = S>>(symbols: I, epsilon: S) -> Result<Self, S> {
        let mut symbols = symbols.into_iter().collect_vec();
        let duplicates = symbols.iter().filter(|sym| **sym == epsilon).count();
        if duplicates > 1 {
            let position = symbols
                .iter()
                .positions(|sym| *sym == epsilon)
                .nth(1)
                .unwrap_or_default();
            return Err(MalformedReason::DuplicateSymbol(position).into());
        }
        symbols.retain(|sym| *sym != epsilon);
        symbols.push(epsilon.clone());

        let mut alphabet = Self::new(symbols)?;
        alphabet.epsilon = Some(epsilon);
        Ok(alphabet)
    }

    /// Returns an iterator over all symbols in the alphabet, including the epsilon symbol (which
    /// comes last) if there is one.
    pub fn universe(&self) -> impl Iterator<Item = &S> + '_ {
        self.symbols.iter()
    }

    /// Returns an iterator over the symbols that may occur in an input word, i.e. everything except
    /// the epsilon symbol.
    pub fn observable(&self) -> impl Iterator<Item = &S> + '_ {
        self.symbols.iter().filter(move |sym| !self.is_epsilon(sym))
    }

    /// Returns the position of `symbol` in the alphabet, if it is present.
    pub fn index_of(&self, symbol: &S) -> Option<usize> {
        self.positions.get(symbol).copied()
    }

    /// Returns the symbol at the given position.
    pub fn get(&self, position: usize) -> Option<&S> {
        self.symbols.get(position)
    }

    /// Returns true if the given symbol is present in the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.positions.contains_key(symbol)
    }

    /// The designated epsilon symbol, if any.
    pub fn epsilon(&self) -> Option<&S> {
        self.epsilon.as_ref()
    }

    /// Position of the epsilon symbol, which is always the last one.
    pub fn epsilon_index(&self) -> Option<usize> {
        self.epsilon.as_ref().and_then(|e| self.index_of(e))
    }

    /// Returns true if `symbol` is the designated epsilon symbol.
    pub fn is_epsilon(&self, symbol: &S) -> bool {
        self.epsilon.as_ref() == Some(symbol)
    }

    /// Returns the number of symbols, including epsilon.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns a copy of `self` where the epsilon symbol is no longer present.
    pub fn without_epsilon(&self) -> Self {
        let mut out = self.clone();
        if let Some(eps) = out.epsilon.take() {
            out.symbols.retain(|sym| *sym != eps);
            out.positions.remove(&eps);
        }
        out
    }

    /// Renders a symbol for a table header, the epsilon symbol is displayed as `ε`.
    pub fn show_symbol(&self, symbol: &S) -> String {
        if self.is_epsilon(symbol) {
            "ε".to_string()
        } else {
            symbol.show()
        }
    }
}

/// Creates an [`Alphabet`] from a comma separated list of symbols. The silent symbol can be given
/// after a semicolon, as in `alphabet!['a', 'b'; epsilon 'e']`. Evaluates to a [`Result`] as the
/// symbols may contain duplicates.
#[macro_export]
macro_rules! alphabet {
    ($($sym:expr),* ; epsilon $eps:expr) => {
        $crate::alphabet::Alphabet::with_epsilon([$($sym),*], $eps)
    };
    ($($sym:expr),* $(,)?) => {
        $crate::alphabet::Alphabet::new([$($sym),*])
    };
}
