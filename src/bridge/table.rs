//! Reading the sortable-table structure out of the DOM.

use crate::config::GridConfig;
use crate::dom::{Dom, NodeId};
use crate::error::GridError;

/// The `<table>` enclosing `node`.
pub fn table_of(dom: &Dom, node: NodeId) -> Result<NodeId, GridError> {
    if !dom.contains(node) {
        return Err(GridError::NodeNotFound);
    }
    dom.closest(node, |d| d.is("table"))
        .ok_or(GridError::MissingTable)
}

/// Sortable header cells under `start`, in document order.
pub fn sortable_headers(dom: &Dom, start: NodeId, config: &GridConfig) -> Vec<NodeId> {
    dom.descendants_matching(start, |d| d.is("th") && d.has_attr(&config.sortable_attr))
}

/// The enhanced root that owns `node`: its nearest inclusive ancestor
/// carrying the initialisation marker.
pub fn enhancing_root(dom: &Dom, node: NodeId, config: &GridConfig) -> Option<NodeId> {
    dom.closest(node, |d| d.has_attr(&config.init_attr))
}

/// Position of a cell among the cells of its row.
pub fn column_index(dom: &Dom, cell: NodeId) -> usize {
    dom.parent(cell)
        .and_then(|row| dom.element_children(row).iter().position(|&c| c == cell))
        .unwrap_or(0)
}

/// The first `<tbody>` of `table`.
pub fn body_of(dom: &Dom, table: NodeId) -> Option<NodeId> {
    dom.element_children(table)
        .into_iter()
        .find(|&c| dom.get(c).is_some_and(|d| d.is("tbody")))
}

/// Data rows of a `<tbody>`, in current order.
pub fn body_rows(dom: &Dom, tbody: NodeId) -> Vec<NodeId> {
    dom.element_children(tbody)
        .into_iter()
        .filter(|&c| dom.get(c).is_some_and(|d| d.is("tr")))
        .collect()
}

/// The trigger button already installed in `header`, if any.
pub fn trigger_of(dom: &Dom, header: NodeId, config: &GridConfig) -> Option<NodeId> {
    dom.element_children(header).into_iter().find(|&c| {
        dom.get(c)
            .is_some_and(|d| d.is("button") && d.has_class(&config.trigger_class))
    })
}

/// Visible label of a header.
pub fn header_label(dom: &Dom, header: NodeId) -> String {
    dom.text_content(header).trim().to_owned()
}

/// Caption text of `table`, or an empty string.
pub fn caption_of(dom: &Dom, table: NodeId) -> String {
    dom.element_children(table)
        .into_iter()
        .find(|&c| dom.get(c).is_some_and(|d| d.is("caption")))
        .map(|c| dom.text_content(c).trim().to_owned())
        .unwrap_or_default()
}

/// The live region immediately following `table`.
pub fn live_region_of(dom: &Dom, table: NodeId) -> Option<NodeId> {
    dom.next_sibling(table)
        .filter(|&n| dom.get(n).is_some_and(|d| d.has_attr("aria-live")))
}

/// The value a cell sorts by: its override attribute, else its trimmed text.
pub fn cell_sort_value(dom: &Dom, cell: NodeId, config: &GridConfig) -> String {
    match dom.attr(cell, &config.sort_value_attr) {
        Some(value) => value.trim().to_owned(),
        None => dom.text_content(cell).trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_document;

    const TABLE: &str = r#"
        <div>
          <table>
            <caption> Data table </caption>
            <thead><tr><th data-sortable>Name</th><th data-sortable>Age</th><th>Notes</th></tr></thead>
            <tbody>
              <tr><td>Ann</td><td data-sort-value="30">thirty</td><td>x</td></tr>
              <tr><td>Bob</td><td>25</td><td>y</td></tr>
            </tbody>
          </table>
          <div aria-live="polite"></div>
        </div>"#;

    #[test]
    fn reads_structure() {
        let (dom, root) = parse_document(TABLE).unwrap();
        let config = GridConfig::default();
        let headers = sortable_headers(&dom, root, &config);
        assert_eq!(headers.len(), 2);
        assert_eq!(header_label(&dom, headers[1]), "Age");
        assert_eq!(column_index(&dom, headers[1]), 1);

        let table = table_of(&dom, headers[0]).unwrap();
        assert_eq!(caption_of(&dom, table), "Data table");
        assert!(live_region_of(&dom, table).is_some());

        let tbody = body_of(&dom, table).unwrap();
        let rows = body_rows(&dom, tbody);
        assert_eq!(rows.len(), 2);
        let cells = dom.element_children(rows[0]);
        assert_eq!(cell_sort_value(&dom, cells[1], &config), "30");
        assert_eq!(cell_sort_value(&dom, cells[0], &config), "Ann");
    }

    #[test]
    fn header_outside_table() {
        let (dom, root) = parse_document("<div><th data-sortable>Loose</th></div>").unwrap();
        let th = dom.query_by_tag("th")[0];
        assert_eq!(table_of(&dom, th), Err(GridError::MissingTable));
        assert!(table_of(&dom, root).is_err());
    }

    #[test]
    fn live_region_must_be_adjacent() {
        let (dom, _) = parse_document("<div><table></table><p>gap</p><div aria-live=polite></div></div>").unwrap();
        let table = dom.query_by_tag("table")[0];
        assert_eq!(live_region_of(&dom, table), None);
    }
}
