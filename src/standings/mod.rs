pub mod delta;
pub mod normalize;
pub mod sort;

pub use delta::{compute_delta, previous_round};
pub use normalize::normalize_row;
pub use sort::{row_ordering, sort_rows, SortDirection, SortField, SortState};
