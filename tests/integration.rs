//! Integration tests for gridkit.
//!
//! These tests exercise the public API from outside the crate: mounting grids
//! on a page, re-rendering after data changes, notifications and teardown.

use gridkit::event::Key;
use gridkit::grid::{Column, DataGrid, Row, SortChange, SortState, ValueType};
use gridkit::sort::SortDirection;
use gridkit::testing::{table_to_string, Pilot};
use gridkit::{GridConfig, GridError};
use pretty_assertions::assert_eq;
use serde_json::json;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn fixture() -> serde_json::Value {
    json!({
        "caption": "Data table",
        "columns": [
            {"key": "name", "label": "Name", "sortable": true},
            {"key": "age", "label": "Age", "sortable": true, "valueType": "number"},
            {"key": "joined", "label": "Joined", "sortable": true, "valueType": "date"},
            {"key": "share", "label": "Share", "valueType": "percentage"}
        ],
        "rows": [
            {"name": "Item 9", "age": 30, "joined": "2024-01-15", "share": 25},
            {"name": "Item 10", "age": 25, "joined": "2023-12-01", "share": 12.5},
            {"name": "Item 2", "age": 35, "joined": "2024-03-05", "share": "n/a"}
        ]
    })
}

fn fixture_grid() -> DataGrid {
    let fixture = fixture();
    let columns: Vec<Column> = serde_json::from_value(fixture["columns"].clone()).unwrap();
    let rows: Vec<Row> = serde_json::from_value(fixture["rows"].clone()).unwrap();
    DataGrid::new()
        .with_caption(fixture["caption"].as_str().unwrap())
        .with_columns(columns)
        .unwrap()
        .with_rows(rows)
}

fn mounted() -> (Pilot, DataGrid) {
    let grid = fixture_grid();
    let mut pilot = Pilot::new();
    pilot.mount(grid.clone()).unwrap();
    (pilot, grid)
}

fn names(grid: &DataGrid) -> Vec<String> {
    grid.rows().iter().map(|row| row["name"].to_string()).collect()
}

fn snapshot(pilot: &Pilot, grid: &DataGrid) -> String {
    table_to_string(pilot.page().dom(), grid.nodes().unwrap().table)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_mount_renders_formatted_cells() {
    let (pilot, grid) = mounted();
    insta::assert_snapshot!(snapshot(&pilot, &grid), @r"
    Name | Age | Joined | Share
    Item 9 | 30 | 15 January 2024 | 25%
    Item 10 | 25 | 1 December 2023 | 12.5%
    Item 2 | 35 | 5 March 2024 | Invalid number
    ");
}

#[test]
fn test_only_sortable_headers_get_triggers() {
    let (pilot, _) = mounted();
    assert!(pilot.trigger("Name").is_ok());
    assert_eq!(pilot.trigger("Share"), Err(GridError::NotSortable("Share".to_owned())));
}

#[test]
fn test_custom_config_is_honoured() {
    let config = GridConfig::new()
        .with_table_class("data-table")
        .with_trigger_class("data-table__sort");
    let grid = DataGrid::with_config(config.clone())
        .with_caption("Custom")
        .with_columns(vec![Column::new("name", "Name").sortable()])
        .unwrap();
    let mut pilot = Pilot::with_config(config);
    pilot.mount(grid.clone()).unwrap();

    let dom = pilot.page().dom();
    let table = grid.nodes().unwrap().table;
    assert!(dom.get(table).unwrap().has_class("data-table"));
    assert_eq!(dom.query_by_class("data-table__sort").len(), 1);
    pilot.click_header("Name").unwrap();
    assert_eq!(pilot.sorted_headers(), ["Name"]);
}

// ---------------------------------------------------------------------------
// Sorting through the page
// ---------------------------------------------------------------------------

#[test]
fn test_date_column_sorts_by_timestamp() {
    let (mut pilot, grid) = mounted();
    pilot.click_header("Joined").unwrap();
    assert_eq!(pilot.column_texts(2), ["1 December 2023", "15 January 2024", "5 March 2024"]);
    assert_eq!(names(&grid), ["Item 10", "Item 9", "Item 2"]);
}

#[test]
fn test_sort_change_notifications() {
    let (mut pilot, _) = mounted();
    pilot.click_header("Age").unwrap();
    pilot.click_header("Age").unwrap();
    assert_eq!(
        pilot.sort_changes(),
        vec![
            SortChange {
                column: "age".to_owned(),
                direction: SortDirection::Ascending,
                value_type: ValueType::Number,
            },
            SortChange {
                column: "age".to_owned(),
                direction: SortDirection::Descending,
                value_type: ValueType::Number,
            },
        ]
    );
    assert!(pilot.messages().is_empty());
}

#[test]
fn test_messages_are_sent_from_the_host() {
    let grid = fixture_grid();
    let mut pilot = Pilot::new();
    let host = pilot.mount(grid).unwrap();
    pilot.click_header("Name").unwrap();
    let messages = pilot.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, host);
    assert_eq!(messages[0].name(), "SortChange");
}

#[test]
fn test_programmatic_sort() {
    let (mut pilot, grid) = mounted();
    grid.sort_by(pilot.page_mut(), "age").unwrap();
    assert_eq!(pilot.column_texts(1), ["25", "30", "35"]);
    assert_eq!(grid.applied_sort(), Some(SortState::new("age", SortDirection::Ascending)));
    assert_eq!(pilot.sort_changes().len(), 1);

    assert_eq!(
        grid.sort_by(pilot.page_mut(), "share"),
        Err(GridError::NotSortable("share".to_owned()))
    );
    assert_eq!(
        grid.sort_by(pilot.page_mut(), "missing"),
        Err(GridError::UnknownColumn("missing".to_owned()))
    );
}

#[test]
fn test_sort_by_requires_mount() {
    let grid = fixture_grid();
    let mut pilot = Pilot::new();
    assert_eq!(grid.sort_by(pilot.page_mut(), "age"), Err(GridError::NodeNotFound));
}

#[test]
fn test_keyboard_reaches_triggers_in_tab_order() {
    let (mut pilot, grid) = mounted();
    let page = pilot.page_mut();
    page.press_key_on_focused(Key::Tab).unwrap();
    page.press_key_on_focused(Key::Tab).unwrap();
    page.press_key_on_focused(Key::Enter).unwrap();
    assert_eq!(grid.sort_state(), SortState::new("age", SortDirection::Ascending));
}

#[test]
fn test_grids_sort_independently() {
    let first = fixture_grid();
    let second = fixture_grid().with_caption("Second table");
    let mut pilot = Pilot::new();
    pilot.mount(first.clone()).unwrap();
    pilot.mount(second.clone()).unwrap();

    second.sort_by(pilot.page_mut(), "name").unwrap();

    let dom = pilot.page().dom();
    assert_eq!(dom.text_content(first.nodes().unwrap().live_region), "");
    assert_eq!(
        dom.text_content(second.nodes().unwrap().live_region),
        "The table named \"Second table\" is now sorted by Name in ascending order."
    );
    assert_eq!(first.applied_sort(), None);
    assert_eq!(names(&first), ["Item 9", "Item 10", "Item 2"]);
    assert_eq!(names(&second), ["Item 2", "Item 9", "Item 10"]);
}

// ---------------------------------------------------------------------------
// Re-rendering
// ---------------------------------------------------------------------------

#[test]
fn test_rerender_preserves_bridge_output() {
    let (mut pilot, grid) = mounted();
    pilot.click_header("Name").unwrap();
    let nodes = grid.nodes().unwrap();
    let announcement = pilot.live_region_text().unwrap();

    let rows: Vec<Row> = serde_json::from_value(json!([
        {"name": "Zed", "age": 1},
        {"name": "Amy", "age": 2}
    ]))
    .unwrap();
    grid.set_rows(rows);
    assert_eq!(pilot.flush().unwrap(), 1);
    assert_eq!(pilot.flush().unwrap(), 0);

    assert_eq!(grid.nodes().unwrap().live_region, nodes.live_region);
    assert_eq!(pilot.live_region_text().unwrap(), announcement);
    assert_eq!(pilot.sorted_headers(), ["Name"]);
    let trigger = pilot.trigger("Name").unwrap();
    assert_eq!(
        pilot.page().dom().attr(trigger, "aria-label"),
        Some("Name, sorted ascending. Activate to sort descending.")
    );
    assert_eq!(pilot.column_texts(0), ["Amy", "Zed"]);
    assert_eq!(names(&grid), ["Amy", "Zed"]);
}

#[test]
fn test_rerender_adds_triggers_for_new_columns() {
    let (mut pilot, grid) = mounted();
    let mut columns = grid.columns();
    columns.push(Column::new("rank", "Rank").sortable());
    grid.set_columns(columns).unwrap();
    pilot.flush().unwrap();

    pilot.click_header("Rank").unwrap();
    assert_eq!(grid.sort_state(), SortState::new("rank", SortDirection::Ascending));
    assert_eq!(pilot.page().dom().query_by_tag("button").len(), 4);
}

#[test]
fn test_rerender_drops_sort_on_removed_column() {
    let (mut pilot, grid) = mounted();
    pilot.click_header("Age").unwrap();
    let columns: Vec<Column> = grid.columns().into_iter().filter(|c| c.key != "age").collect();
    grid.set_columns(columns).unwrap();
    pilot.flush().unwrap();

    assert_eq!(grid.applied_sort(), None);
    assert!(pilot.sorted_headers().is_empty());
    assert!(pilot.page().dom().query_by_class("sortable-table__cell--sorted").is_empty());
    assert_eq!(pilot.live_region_text().as_deref(), Some(""));
}

#[test]
fn test_rerender_keeps_announcement_while_sort_survives() {
    let (mut pilot, grid) = mounted();
    pilot.click_header("Age").unwrap();
    let columns: Vec<Column> = grid.columns().into_iter().filter(|c| c.key != "share").collect();
    grid.set_columns(columns).unwrap();
    pilot.flush().unwrap();

    assert_eq!(
        pilot.live_region_text().as_deref(),
        Some("The table named \"Data table\" is now sorted by Age in ascending order.")
    );
}

#[test]
fn test_caption_update_is_used_by_next_announcement() {
    let (mut pilot, grid) = mounted();
    grid.set_caption("Renamed");
    pilot.flush().unwrap();
    pilot.click_header("Name").unwrap();
    assert_eq!(
        pilot.live_region_text().as_deref(),
        Some("The table named \"Renamed\" is now sorted by Name in ascending order.")
    );
}

// ---------------------------------------------------------------------------
// Enhancing around a mounted grid
// ---------------------------------------------------------------------------

#[test]
fn test_enhancing_the_body_leaves_grid_headers_alone() {
    let (mut pilot, grid) = mounted();
    let enhancement = pilot.enhance_body().unwrap();
    assert!(enhancement.is_active());
    assert_eq!(pilot.page().dom().query_by_tag("button").len(), 3);

    pilot.click_header("Age").unwrap();
    assert_eq!(
        pilot.sort_indicators(),
        [
            ("Name".to_owned(), None),
            ("Age".to_owned(), Some("ascending".to_owned())),
            ("Joined".to_owned(), None),
            ("Share".to_owned(), None),
        ]
    );
    assert_eq!(grid.sort_state(), SortState::new("age", SortDirection::Ascending));
    assert_eq!(pilot.column_texts(1), ["25", "30", "35"]);
    assert_eq!(
        pilot.live_region_text().as_deref(),
        Some("The table named \"Data table\" is now sorted by Age in ascending order.")
    );

    pilot.click_header("Age").unwrap();
    assert_eq!(pilot.column_texts(1), ["35", "30", "25"]);
    assert_eq!(grid.sort_state(), SortState::new("age", SortDirection::Descending));
    assert_eq!(pilot.sort_changes().len(), 2);
}

#[test]
fn test_grid_mounted_into_enhanced_body_sorts_once() {
    let mut pilot = Pilot::new();
    pilot.enhance_body().unwrap();
    let grid = fixture_grid();
    pilot.mount(grid.clone()).unwrap();

    pilot.click_header("Name").unwrap();
    assert_eq!(names(&grid), ["Item 2", "Item 9", "Item 10"]);
    assert_eq!(pilot.column_texts(0), ["Item 2", "Item 9", "Item 10"]);
    assert_eq!(pilot.sorted_headers(), ["Name"]);
    assert_eq!(grid.applied_sort(), Some(SortState::new("name", SortDirection::Ascending)));
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[test]
fn test_remount_starts_unsorted() {
    let grid = fixture_grid();
    let mut pilot = Pilot::new();
    let host = pilot.mount(grid.clone()).unwrap();
    pilot.click_header("Age").unwrap();
    assert!(pilot.page_mut().unmount(host));
    assert_eq!(grid.applied_sort(), None);

    pilot.mount(grid.clone()).unwrap();
    assert_eq!(grid.applied_sort(), None);
    assert!(pilot.sorted_headers().is_empty());
    assert!(pilot.page().dom().query_by_class("sortable-table__cell--sorted").is_empty());
    assert_eq!(pilot.column_texts(1), ["25", "30", "35"]);

    pilot.click_header("Age").unwrap();
    assert_eq!(grid.applied_sort(), Some(SortState::new("age", SortDirection::Ascending)));
}

#[test]
fn test_unmount_is_idempotent() {
    let grid = fixture_grid();
    let mut pilot = Pilot::new();
    let host = pilot.mount(grid.clone()).unwrap();
    assert_eq!(pilot.page().listeners().count_on(host), 2);

    assert!(pilot.page_mut().unmount(host));
    assert!(!pilot.page_mut().unmount(host));
    assert!(pilot.page().listeners().is_empty());
    assert!(!pilot.page().is_mounted(host));
    assert!(grid.nodes().is_none());
    assert!(pilot.headers().is_empty());
}

#[test]
fn test_static_enhancement_cleanup() {
    let mut pilot = Pilot::with_markup(
        r#"<table><caption>Static</caption><thead><tr><th data-sortable>Name</th></tr></thead>
        <tbody><tr><td>b</td></tr><tr><td>a</td></tr></tbody></table>
        <div aria-live="polite" aria-atomic="true"></div>"#,
    )
    .unwrap();
    let mut enhancement = pilot.enhance_body().unwrap();
    let duplicate = pilot.enhance_body().unwrap();
    assert!(!duplicate.is_active());

    pilot.click_header("Name").unwrap();
    assert_eq!(pilot.column_texts(0), ["a", "b"]);

    assert!(pilot.page_mut().cleanup(&mut enhancement));
    assert!(!pilot.page_mut().cleanup(&mut enhancement));
    assert_eq!(pilot.click_header("Name").unwrap(), 0);
    assert_eq!(pilot.column_texts(0), ["a", "b"]);
}
