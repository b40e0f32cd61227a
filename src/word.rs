/// A finite word is a finite sequence of symbols of type `S`. It is implemented for string types
/// (yielding `char`s), slices, arrays and vectors, as well as references to any of these.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
/// assert_eq!("011".collect_vec(), vec!['0', '1', '1']);
/// assert_eq!([1u8, 2].len(), 2);
/// ```
pub trait FiniteWord<S> {
    /// Type for an iterator over the symbols making up the word.
    type Symbols<'this>: Iterator<Item = S>
    where
        Self: 'this;

    /// Returns an iterator over the symbols of the word.
    fn symbols(&self) -> Self::Symbols<'_>;

    /// Returns the number of symbols in the word.
    fn len(&self) -> usize {
        self.symbols().count()
    }

    /// Returns true if the word has no symbols.
    fn is_empty(&self) -> bool {
        self.symbols().next().is_none()
    }

    /// Collects the symbols making up `self` into a vector.
    fn collect_vec(&self) -> Vec<S> {
        self.symbols().collect()
    }
}

impl FiniteWord<char> for str {
    type Symbols<'this> = std::str::Chars<'this>;
    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }
}

impl FiniteWord<char> for String {
    type Symbols<'this> = std::str::Chars<'this>;
    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }
}

impl<S: Clone> FiniteWord<S> for [S] {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;
    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        <[S]>::len(self)
    }
}

impl<S: Clone, const N: usize> FiniteWord<S> for [S; N] {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;
    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        N
    }
}

impl<S: Clone> FiniteWord<S> for Vec<S> {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;
    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<S, W: FiniteWord<S> + ?Sized> FiniteWord<S> for &W {
    type Symbols<'this> = W::Symbols<'this> where Self: 'this;
    fn symbols(&self) -> Self::Symbols<'_> {
        W::symbols(*self)
    }
    fn len(&self) -> usize {
        W::len(*self)
    }
}
