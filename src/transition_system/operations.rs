mod closure;
pub use closure::ClosureTable;

mod subset;
pub use subset::{SubsetConstruction, SubsetOptions};
