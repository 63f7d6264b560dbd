//! Comparator engine: directions, indicators, value comparison, stable ordering.

pub mod compare;
pub mod direction;

pub use compare::{collate, compare_directed, compare_values, parse_number, sort_by_column, sorted_order};
pub use direction::{SortDirection, SortIndicator};
