//! Crate error type.
//!
//! Only configuration problems are errors. Malformed cell data never is: it
//! degrades to text ordering or an "Invalid" display marker.

use crate::markup::MarkupError;

/// Errors raised by the enhancement pass, the grid and the page host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A sort was attempted on a table with no live region immediately after it.
    #[error("table \"{caption}\" has sortable headers but no live region immediately after it")]
    MissingLiveRegion { caption: String },
    /// A sortable header is not inside a table.
    #[error("sortable header is not inside a table")]
    MissingTable,
    /// A table has no header row to enhance or render into.
    #[error("table has no header row")]
    MissingHeaderRow,
    /// A column key that the grid does not declare.
    #[error("unknown column key: {0}")]
    UnknownColumn(String),
    /// A column exists but cannot be sorted.
    #[error("column is not sortable: {0}")]
    NotSortable(String),
    /// Two columns share a key.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),
    /// A node id that is not (or no longer) in the document.
    #[error("node is not in the document")]
    NodeNotFound,
    /// A template failed to parse.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}
