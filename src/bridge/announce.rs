//! Accessible names and live-region announcements.

use crate::sort::SortDirection;

/// Accessible name of a trigger whose column is sorted in `direction`.
///
/// States the column, its direction, and what activation does next.
pub fn sorted_label(label: &str, direction: SortDirection) -> String {
    format!(
        "{label}, sorted {direction}. Activate to sort {}.",
        direction.opposite()
    )
}

/// Live-region text after a table was sorted.
pub fn sort_announcement(caption: &str, label: &str, direction: SortDirection) -> String {
    format!("The table named \"{caption}\" is now sorted by {label} in {direction} order.")
}
