//! Snapshot helpers.
//!
//! Functions that turn a rendered table into plain text suitable for snapshot
//! tests and assertions.

use crate::bridge::read_indicator;
use crate::bridge::table::header_label;
use crate::dom::{Dom, NodeId};
use crate::sort::SortIndicator;

/// Render a table as text: one line per row, cells joined with `" | "`.
///
/// The first line holds the header labels; a sorted header is suffixed with
/// `[asc]` or `[desc]`. Rows are listed in DOM order.
///
/// ```
/// use gridkit::markup::parse_document;
/// use gridkit::testing::table_to_string;
///
/// let (dom, root) = parse_document(
///     "<table><tr><th aria-sort=ascending>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>",
/// )
/// .unwrap();
/// let table = dom.first_descendant(root, |d| d.is("table")).unwrap();
/// assert_eq!(table_to_string(&dom, table), "A [asc] | B\n1 | 2");
/// ```
pub fn table_to_string(dom: &Dom, table: NodeId) -> String {
    let rows = dom.descendants_matching(table, |d| d.is("tr"));
    rows.into_iter()
        .map(|row| {
            dom.element_children(row)
                .into_iter()
                .map(|cell| cell_text(dom, cell))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_text(dom: &Dom, cell: NodeId) -> String {
    let label = header_label(dom, cell);
    if !dom.get(cell).is_some_and(|d| d.is("th")) {
        return label;
    }
    match read_indicator(dom, cell) {
        SortIndicator::Absent => label,
        SortIndicator::Ascending => format!("{label} [asc]"),
        SortIndicator::Descending => format!("{label} [desc]"),
    }
}
