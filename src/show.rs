use itertools::Itertools;

/// Helper trait which can be used to display states, symbols and sets of states in
/// transition tables and log messages.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a symbol it is simply the symbol itself.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be `{ q0, q1 }`.
    /// By default the shown elements are joined by commas and wrapped in braces, the empty
    /// collection is displayed as `∅`.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let inner = iter.into_iter().map(|x| x.show()).join(", ");
        if inner.is_empty() {
            "∅".to_string()
        } else {
            format!("{{ {inner} }}")
        }
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

macro_rules! show_via_to_string {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

show_via_to_string!(u8, u16, u32, u64, usize, i8, i16, i32, i64, bool);

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

/// Displays a state index in the `q0`, `q1`, ... notation used for transition tables.
pub fn show_state(q: usize) -> String {
    format!("q{q}")
}
