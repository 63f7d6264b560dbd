//! The toggle-sort algorithm.
//!
//! A sort is computed as a [`SortPlan`] from a shared view of the document and
//! then applied in one pass, so every configuration error is raised before
//! anything is mutated.

use log::debug;

use super::announce::{sort_announcement, sorted_label};
use super::table::{
    body_of, body_rows, caption_of, cell_sort_value, column_index, header_label, live_region_of,
    sortable_headers, table_of, trigger_of,
};
use crate::config::GridConfig;
use crate::dom::{Dom, NodeId};
use crate::error::GridError;
use crate::sort::{sorted_order, SortDirection, SortIndicator};

/// Why a sort is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// A user activation: flip the header, clear the others and announce.
    Toggle,
    /// Re-applying an indicator already present when the table was enhanced.
    Replay(SortDirection),
}

/// Everything a sort will change, computed without touching the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SortPlan {
    pub table: NodeId,
    pub header: NodeId,
    pub column: usize,
    pub direction: SortDirection,
    pub label: String,
    /// Body the rows are re-inserted into, if the table has one.
    pub tbody: Option<NodeId>,
    /// Body rows in their new order.
    pub rows: Vec<NodeId>,
    /// Other sortable headers that lose their indicator.
    pub cleared: Vec<NodeId>,
    /// Live region and the text written into it.
    pub announcement: Option<(NodeId, String)>,
}

/// Result of a completed sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub table: NodeId,
    pub header: NodeId,
    pub column: usize,
    pub direction: SortDirection,
    pub announcement: Option<String>,
}

/// Write a header's sort indicator.
///
/// This is the only place `aria-sort` is written. `Absent` removes the
/// attribute; the unsorted state is never spelled `"none"`.
pub fn write_indicator(dom: &mut Dom, header: NodeId, indicator: SortIndicator) {
    match indicator.as_attr() {
        Some(value) => dom.set_attr(header, "aria-sort", value),
        None => {
            dom.remove_attr(header, "aria-sort");
        }
    }
}

/// Read a header's sort indicator.
pub fn read_indicator(dom: &Dom, header: NodeId) -> SortIndicator {
    SortIndicator::from_attr(dom.attr(header, "aria-sort"))
}

/// Compute the effect of sorting on `header`.
pub fn plan_sort(
    dom: &Dom,
    header: NodeId,
    mode: SortMode,
    config: &GridConfig,
) -> Result<SortPlan, GridError> {
    let table = table_of(dom, header)?;

    let (direction, announce) = match mode {
        SortMode::Toggle => (read_indicator(dom, header).next(), true),
        SortMode::Replay(direction) => (direction, false),
    };

    let label = header_label(dom, header);
    let announcement = if announce {
        let region = live_region_of(dom, table).ok_or_else(|| GridError::MissingLiveRegion {
            caption: caption_of(dom, table),
        })?;
        let text = sort_announcement(&caption_of(dom, table), &label, direction);
        Some((region, text))
    } else {
        None
    };

    let column = column_index(dom, header);
    let tbody = body_of(dom, table);
    let rows = match tbody {
        Some(tbody) => {
            let rows = body_rows(dom, tbody);
            let keys: Vec<String> = rows
                .iter()
                .map(|&row| {
                    dom.element_children(row)
                        .get(column)
                        .map(|&cell| cell_sort_value(dom, cell, config))
                        .unwrap_or_default()
                })
                .collect();
            sorted_order(&keys, direction)
                .into_iter()
                .map(|i| rows[i])
                .collect()
        }
        None => Vec::new(),
    };

    let cleared = if announce {
        sortable_headers(dom, table, config)
            .into_iter()
            .filter(|&h| h != header)
            .collect()
    } else {
        Vec::new()
    };

    Ok(SortPlan {
        table,
        header,
        column,
        direction,
        label,
        tbody,
        rows,
        cleared,
        announcement,
    })
}

/// Apply a plan produced by [`plan_sort`].
pub fn apply_sort(dom: &mut Dom, plan: &SortPlan, config: &GridConfig) -> SortOutcome {
    write_indicator(dom, plan.header, plan.direction.into());
    if let Some(trigger) = trigger_of(dom, plan.header, config) {
        dom.set_attr(trigger, "aria-label", sorted_label(&plan.label, plan.direction));
    }

    if let Some(tbody) = plan.tbody {
        for &row in &plan.rows {
            dom.append(row, tbody);
            let cells = dom.element_children(row);
            for (i, &cell) in cells.iter().enumerate() {
                if let Some(data) = dom.get_mut(cell) {
                    if i == plan.column {
                        data.add_class(&config.active_cell_class);
                    } else {
                        data.remove_class(&config.active_cell_class);
                    }
                }
            }
        }
    }

    for &other in &plan.cleared {
        write_indicator(dom, other, SortIndicator::Absent);
        if let Some(trigger) = trigger_of(dom, other, config) {
            dom.remove_attr(trigger, "aria-label");
        }
    }

    if let Some((region, text)) = &plan.announcement {
        dom.set_text(*region, text);
    }

    debug!(
        "sorted table by column {} ({}) {}",
        plan.column, plan.label, plan.direction
    );

    SortOutcome {
        table: plan.table,
        header: plan.header,
        column: plan.column,
        direction: plan.direction,
        announcement: plan.announcement.as_ref().map(|(_, text)| text.clone()),
    }
}

/// Toggle the sort on `header` in response to a user activation.
pub fn toggle_sort(dom: &mut Dom, header: NodeId, config: &GridConfig) -> Result<SortOutcome, GridError> {
    let plan = plan_sort(dom, header, SortMode::Toggle, config)?;
    Ok(apply_sort(dom, &plan, config))
}
