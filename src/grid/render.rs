//! Rendering grid props into table markup, and re-rendering in place.
//!
//! The initial render never writes `aria-sort`, whatever the declared sort
//! says. A re-render keeps existing header cells (matched by column key) so
//! their triggers, indicators and accessible names survive, regenerates the
//! body, and never touches the live region.

use std::collections::HashMap;

use super::column::Column;
use super::value::{display, override_value, Row};
use crate::bridge::{read_indicator, sorted_label, table::trigger_of, write_indicator};
use crate::config::GridConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::GridError;
use crate::sort::SortIndicator;

/// Nodes of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridNodes {
    pub table: NodeId,
    pub caption: NodeId,
    pub header_row: NodeId,
    pub tbody: NodeId,
    pub live_region: NodeId,
}

/// What a render pass draws.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub caption: &'a str,
    pub columns: &'a [Column],
    pub rows: &'a [Row],
    /// Column whose cells carry the active-sort marker.
    pub active_column: Option<&'a str>,
}

/// Render a fresh table and live region as the last children of `host`.
pub fn render_table(
    dom: &mut Dom,
    host: NodeId,
    input: &RenderInput<'_>,
    config: &GridConfig,
) -> Result<GridNodes, GridError> {
    if !dom.contains(host) {
        return Err(GridError::NodeNotFound);
    }

    let table = dom.insert_child(host, NodeData::new("table").with_class(config.table_class.as_str()));
    let caption = dom.insert_child(table, NodeData::new("caption"));
    dom.set_text(caption, input.caption);

    let thead = dom.insert_child(table, NodeData::new("thead"));
    let header_row = dom.insert_child(thead, NodeData::new("tr"));
    for column in input.columns {
        let th = dom.insert_child(header_row, header_cell(column, config));
        dom.set_text(th, &column.label);
    }

    let tbody = dom.insert_child(table, NodeData::new("tbody"));
    render_rows(dom, tbody, input, config);

    let live_region = dom.insert_child(
        host,
        NodeData::new("div")
            .with_class(config.live_region_class.as_str())
            .with_attr("aria-live", "polite")
            .with_attr("aria-atomic", "true")
            .with_attr("role", "status"),
    );

    Ok(GridNodes {
        table,
        caption,
        header_row,
        tbody,
        live_region,
    })
}

/// Bring a rendered table in line with new props.
pub fn update_table(dom: &mut Dom, nodes: &GridNodes, input: &RenderInput<'_>, config: &GridConfig) -> Result<(), GridError> {
    if !dom.contains(nodes.table) {
        return Err(GridError::NodeNotFound);
    }
    dom.set_text(nodes.caption, input.caption);

    let mut existing: HashMap<String, NodeId> = dom
        .element_children(nodes.header_row)
        .into_iter()
        .filter_map(|th| {
            dom.attr(th, &config.column_key_attr)
                .map(|key| (key.to_owned(), th))
        })
        .collect();

    for column in input.columns {
        let th = match existing.remove(&column.key) {
            Some(th) => {
                refresh_header(dom, th, column, config);
                th
            }
            None => {
                let th = dom.insert_child(nodes.header_row, header_cell(column, config));
                dom.set_text(th, &column.label);
                th
            }
        };
        dom.append(th, nodes.header_row);
    }
    for (_, stale) in existing {
        dom.remove(stale);
    }

    dom.clear_children(nodes.tbody);
    render_rows(dom, nodes.tbody, input, config);
    Ok(())
}

fn header_cell(column: &Column, config: &GridConfig) -> NodeData {
    let mut data = NodeData::new("th")
        .with_attr("scope", "col")
        .with_attr(config.column_key_attr.as_str(), column.key.as_str());
    if column.sortable {
        data.set_attr(&config.sortable_attr, "");
    }
    data
}

/// Update a kept header's label and sortability without losing its indicator.
fn refresh_header(dom: &mut Dom, th: NodeId, column: &Column, config: &GridConfig) {
    match (column.sortable, trigger_of(dom, th, config)) {
        (true, Some(trigger)) => {
            dom.set_text(trigger, &column.label);
            if let Some(direction) = read_indicator(dom, th).direction() {
                dom.set_attr(trigger, "aria-label", sorted_label(&column.label, direction));
            }
        }
        (true, None) => {
            dom.set_attr(th, &config.sortable_attr, "");
            dom.set_text(th, &column.label);
        }
        (false, _) => {
            dom.remove_attr(th, &config.sortable_attr);
            write_indicator(dom, th, SortIndicator::Absent);
            dom.set_text(th, &column.label);
        }
    }
}

fn render_rows(dom: &mut Dom, tbody: NodeId, input: &RenderInput<'_>, config: &GridConfig) {
    for row in input.rows {
        let tr = dom.insert_child(tbody, NodeData::new("tr"));
        for column in input.columns {
            let value = row.get(&column.key);
            let mut cell = NodeData::new("td");
            if let Some(raw) = override_value(value, column.value_type) {
                cell.set_attr(&config.sort_value_attr, raw);
            }
            if input.active_column == Some(column.key.as_str()) {
                cell.add_class(&config.active_cell_class);
            }
            let td = dom.insert_child(tr, cell);
            dom.set_text(td, &display(value, column.value_type));
        }
    }
}
