//! The data grid component.
//!
//! The grid owns the canonical columns and rows. The enhancement pass owns the
//! DOM's sort state: it alone writes `aria-sort` and reorders rendered rows.
//! After each activation the grid's reconciliation listener reads the
//! indicator the enhancement just wrote, adopts it as its own sort state,
//! re-sorts its canonical rows the same way and emits a [`SortChange`].

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::column::{validate_columns, Column, ValueType};
use super::render::{render_table, update_table, GridNodes, RenderInput};
use super::value::{sort_key, Row};
use crate::bridge::table::trigger_of;
use crate::bridge::{activated_header, enhance, install_triggers, read_indicator, Enhancement};
use crate::component::{Component, ComponentContext};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::event::{Envelope, ListenerContext, ListenerHandle, ListenerPhase, Message};
use crate::page::Page;
use crate::sort::{sorted_order, SortDirection};

// ---------------------------------------------------------------------------
// SortState / SortChange
// ---------------------------------------------------------------------------

/// A sort: the active column key (if any) and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }
}

/// Emitted once per completed user sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortChange {
    pub column: String,
    pub direction: SortDirection,
    pub value_type: ValueType,
}

impl Message for SortChange {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message_name(&self) -> &str {
        "SortChange"
    }
}

// ---------------------------------------------------------------------------
// GridState
// ---------------------------------------------------------------------------

struct Mounted {
    nodes: GridNodes,
    enhancement: Enhancement,
    reconcile: ListenerHandle,
}

struct GridState {
    config: GridConfig,
    caption: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    /// Sort declared by hosting code or adopted from the DOM.
    sort: SortState,
    /// Last sort confirmed by an indicator in the DOM.
    applied: Option<SortState>,
    dirty: bool,
    mounted: Option<Mounted>,
}

impl GridState {
    fn column(&self, key: &str) -> Result<&Column, GridError> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_owned()))
    }

    /// Stable re-sort of the canonical rows, matching the DOM sort.
    fn sort_rows(&mut self, column: &Column, direction: SortDirection) {
        let keys: Vec<String> = self.rows.iter().map(|row| sort_key(row, column)).collect();
        let mut slots: Vec<Option<Row>> = std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = sorted_order(&keys, direction)
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();
    }

    /// Adopt the direction the enhancement pass just wrote for `key`.
    fn reconcile(&mut self, key: &str, direction: SortDirection) -> Result<SortChange, GridError> {
        let column = self.column(key)?.clone();
        self.sort = SortState::new(key, direction);
        self.applied = Some(self.sort.clone());
        self.sort_rows(&column, direction);
        Ok(SortChange {
            column: column.key,
            direction,
            value_type: column.value_type,
        })
    }

    /// Re-apply the confirmed sort to canonical rows before a re-render.
    ///
    /// A confirmed sort on a column that is gone or no longer sortable is
    /// dropped.
    fn resort_applied(&mut self) {
        let Some(applied) = self.applied.clone() else {
            return;
        };
        let column = applied
            .column
            .as_deref()
            .and_then(|key| self.columns.iter().find(|c| c.key == key && c.sortable))
            .cloned();
        match column {
            Some(column) => self.sort_rows(&column, applied.direction),
            None => self.applied = None,
        }
    }

    fn render_input(&self) -> RenderInput<'_> {
        RenderInput {
            caption: &self.caption,
            columns: &self.columns,
            rows: &self.rows,
            active_column: self.applied.as_ref().and_then(|s| s.column.as_deref()),
        }
    }
}

// ---------------------------------------------------------------------------
// DataGrid
// ---------------------------------------------------------------------------

/// A sortable data grid.
///
/// `DataGrid` is a cheap handle: clones share state, so hosting code can keep
/// one after handing another to [`Page::mount`]. Setters mark the grid dirty;
/// the page re-renders it on the next [`Page::flush`].
#[derive(Clone)]
pub struct DataGrid {
    state: Rc<RefCell<GridState>>,
}

impl Default for DataGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGrid {
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(GridState {
                config,
                caption: String::new(),
                columns: Vec::new(),
                rows: Vec::new(),
                sort: SortState::default(),
                applied: None,
                dirty: false,
                mounted: None,
            })),
        }
    }

    /// Set the caption (builder).
    pub fn with_caption(self, caption: impl Into<String>) -> Self {
        self.set_caption(caption);
        self
    }

    /// Set the columns (builder).
    pub fn with_columns(self, columns: Vec<Column>) -> Result<Self, GridError> {
        self.set_columns(columns)?;
        Ok(self)
    }

    /// Set the rows (builder).
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Declare a sort (builder). See [`DataGrid::set_sort`].
    pub fn with_sort(self, column: &str, direction: SortDirection) -> Result<Self, GridError> {
        self.set_sort(Some(column), direction)?;
        Ok(self)
    }

    pub fn set_caption(&self, caption: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.caption = caption.into();
        state.dirty = true;
    }

    /// Replace the columns. Keys must be unique.
    pub fn set_columns(&self, columns: Vec<Column>) -> Result<(), GridError> {
        validate_columns(&columns)?;
        let mut state = self.state.borrow_mut();
        state.columns = columns;
        state.dirty = true;
        Ok(())
    }

    /// Replace the rows. If a sort is in effect the new rows are shown sorted.
    pub fn set_rows(&self, rows: Vec<Row>) {
        let mut state = self.state.borrow_mut();
        state.rows = rows;
        state.dirty = true;
    }

    /// Declare the sort state.
    ///
    /// This only records the declaration; no header shows an indicator until
    /// a trigger is activated.
    pub fn set_sort(&self, column: Option<&str>, direction: SortDirection) -> Result<(), GridError> {
        let mut state = self.state.borrow_mut();
        if let Some(key) = column {
            state.column(key)?;
        }
        state.sort = SortState {
            column: column.map(str::to_owned),
            direction,
        };
        Ok(())
    }

    pub fn caption(&self) -> String {
        self.state.borrow().caption.clone()
    }

    pub fn columns(&self) -> Vec<Column> {
        self.state.borrow().columns.clone()
    }

    /// Canonical rows in their current order.
    pub fn rows(&self) -> Vec<Row> {
        self.state.borrow().rows.clone()
    }

    /// The declared sort state.
    pub fn sort_state(&self) -> SortState {
        self.state.borrow().sort.clone()
    }

    /// The last sort confirmed by the DOM, if any.
    pub fn applied_sort(&self) -> Option<SortState> {
        self.state.borrow().applied.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.borrow().dirty
    }

    /// Nodes of the rendered table while mounted.
    pub fn nodes(&self) -> Option<GridNodes> {
        self.state.borrow().mounted.as_ref().map(|m| m.nodes)
    }

    /// Sort by `key` as if the user activated its header trigger.
    ///
    /// Both the enhancement and reconciliation run, and a [`SortChange`] is
    /// queued on the page.
    pub fn sort_by(&self, page: &mut Page, key: &str) -> Result<(), GridError> {
        let trigger = {
            let state = self.state.borrow();
            let column = state.column(key)?;
            if !column.sortable {
                return Err(GridError::NotSortable(key.to_owned()));
            }
            let mounted = state.mounted.as_ref().ok_or(GridError::NodeNotFound)?;
            let dom = page.dom();
            let found = dom
                .element_children(mounted.nodes.header_row)
                .into_iter()
                .find(|&th| dom.attr(th, &state.config.column_key_attr) == Some(key))
                .and_then(|th| trigger_of(dom, th, &state.config));
            found.ok_or(GridError::NodeNotFound)?
        };
        page.click(trigger).map(|_| ())
    }
}

impl Component for DataGrid {
    fn component_type(&self) -> &str {
        "data-grid"
    }

    fn mount(&mut self, cx: &mut ComponentContext<'_>) -> Result<(), GridError> {
        let mut state = self.state.borrow_mut();
        if state.mounted.is_some() {
            return Ok(());
        }
        // First paint never shows a sort; only the enhancement pass does.
        let input = RenderInput {
            active_column: None,
            ..state.render_input()
        };
        let nodes = render_table(cx.dom, cx.host, &input, &state.config)?;
        let enhancement = enhance(cx.dom, cx.listeners, cx.host, &state.config)?;
        let reconcile = cx.listeners.add(
            cx.host,
            ListenerPhase::Reconcile,
            reconcile_listener(Rc::clone(&self.state), state.config.clone()),
        );
        state.mounted = Some(Mounted {
            nodes,
            enhancement,
            reconcile,
        });
        state.dirty = false;
        debug!("mounted data grid at {:?}", cx.host);
        Ok(())
    }

    fn needs_update(&self) -> bool {
        let state = self.state.borrow();
        state.dirty && state.mounted.is_some()
    }

    fn update(&mut self, cx: &mut ComponentContext<'_>) -> Result<(), GridError> {
        let mut state = self.state.borrow_mut();
        let Some(nodes) = state.mounted.as_ref().map(|m| m.nodes) else {
            return Ok(());
        };
        let was_sorted = state.applied.is_some();
        state.resort_applied();
        update_table(cx.dom, &nodes, &state.render_input(), &state.config)?;
        if was_sorted && state.applied.is_none() {
            cx.dom.set_text(nodes.live_region, "");
        }
        install_triggers(cx.dom, cx.host, &state.config);
        state.dirty = false;
        debug!("re-rendered data grid at {:?}", cx.host);
        Ok(())
    }

    fn unmount(&mut self, cx: &mut ComponentContext<'_>) {
        let mut state = self.state.borrow_mut();
        if let Some(mut mounted) = state.mounted.take() {
            mounted.enhancement.cleanup(cx.dom, cx.listeners);
            mounted.reconcile.remove(cx.listeners);
            state.applied = None;
            debug!("unmounted data grid at {:?}", cx.host);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Listener that reads the indicator back after the enhancement pass ran.
fn reconcile_listener(
    state: Rc<RefCell<GridState>>,
    config: GridConfig,
) -> impl FnMut(&mut ListenerContext<'_>) -> Result<(), GridError> + 'static {
    move |ctx: &mut ListenerContext<'_>| {
        let Some(header) = activated_header(ctx.dom, ctx.event.target, &config) else {
            return Ok(());
        };
        let Some(direction) = read_indicator(ctx.dom, header).direction() else {
            return Ok(());
        };
        let Some(key) = ctx.dom.attr(header, &config.column_key_attr).map(str::to_owned) else {
            return Ok(());
        };
        let change = state.borrow_mut().reconcile(&key, direction)?;
        debug!("grid sorted by {} {}", change.column, change.direction);
        ctx.outbox.push(Envelope::new(change, ctx.current));
        Ok(())
    }
}
