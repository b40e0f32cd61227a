use std::collections::BTreeSet;

pub use std::collections::btree_set as ordered_set;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is ascending.
pub type OrderedSet<S> = BTreeSet<S>;

/// A set that remembers the order in which its elements were inserted and assigns each of them
/// a stable position.
pub type IndexedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;

/// Computes `2^n`, saturating at `usize::MAX`. This is the number of distinct subsets of a set
/// with `n` elements and therefore an upper bound on the number of states that a subset
/// construction can ever produce.
pub fn powerset_size(n: usize) -> usize {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .unwrap_or(usize::MAX)
}

/// Turns a position into a spreadsheet style label, so 0 becomes `A`, 25 becomes `Z`, 26
/// becomes `AA` and so on.
pub fn alphabetic_label(mut position: usize) -> String {
    let mut out = vec![];
    loop {
        out.push((b'A' + (position % 26) as u8) as char);
        if position < 26 {
            break;
        }
        position = position / 26 - 1;
    }
    out.iter().rev().collect()
}
