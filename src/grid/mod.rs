//! The data grid: columns, cell values, rendering and the reconciling component.

pub mod column;
pub mod component;
pub mod render;
pub mod value;

pub use column::{validate_columns, Column, ValueType};
pub use component::{DataGrid, SortChange, SortState};
pub use render::{render_table, update_table, GridNodes, RenderInput};
pub use value::{display, format_number, override_value, sort_key, CellValue, Row, INVALID_DATE, INVALID_NUMBER};
