//! # gridkit
//!
//! Design-system widgets over a headless DOM, centred on an accessible,
//! sortable data grid.
//!
//! A table has two authorities over its sort state. The enhancement bridge
//! turns rendered markup into an interactive table and performs every DOM
//! mutation a sort causes: it writes `aria-sort`, reorders rows and announces
//! the result in a live region. The [`DataGrid`](grid::DataGrid) component owns
//! the canonical data and reconciles with the DOM after each activation by
//! reading the indicator back. Both order rows through the same comparator, so
//! they always agree.
//!
//! ## Core Systems
//!
//! - **[`sort`]**: comparator engine, directions and indicators
//! - **[`bridge`]**: enhancement pass and the toggle-sort algorithm
//! - **[`grid`]**: columns, cell formatting, rendering, the grid component
//! - **[`dom`]**: slotmap-backed DOM arena with tree operations and queries
//! - **[`markup`]**: HTML-subset parser and serializer
//! - **[`event`]**: activations, phased listeners, notifications
//! - **[`component`]**: component trait and lifecycle tracking
//! - **[`page`]**: page host with focus chain
//! - **[`testing`]**: headless pilot and snapshot helpers
//!
//! ```
//! use gridkit::grid::{CellValue, Column, DataGrid, Row, ValueType};
//! use gridkit::page::Page;
//!
//! let rows: Vec<Row> = [30, 25, 35]
//!     .into_iter()
//!     .map(|age: i32| [("age".to_owned(), CellValue::from(age))].into_iter().collect())
//!     .collect();
//! let grid = DataGrid::new()
//!     .with_caption("Ages")
//!     .with_columns(vec![Column::new("age", "Age").sortable().with_type(ValueType::Number)])
//!     .unwrap()
//!     .with_rows(rows);
//!
//! let mut page = Page::new();
//! let body = page.body();
//! page.mount(body, grid.clone()).unwrap();
//! grid.sort_by(&mut page, "age").unwrap();
//!
//! let ages: Vec<String> = grid.rows().iter().map(|r| r["age"].to_string()).collect();
//! assert_eq!(ages, ["25", "30", "35"]);
//! ```

// Foundation
pub mod config;
pub mod error;

// Document
pub mod dom;
pub mod markup;

// Events and components
pub mod component;
pub mod event;
pub mod page;

// Sorting
pub mod bridge;
pub mod grid;
pub mod sort;

// Test support
pub mod testing;

pub use config::GridConfig;
pub use error::GridError;
