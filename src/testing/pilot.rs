//! Pilot: programmatic interaction with a headless page.
//!
//! The `Pilot` wraps a [`Page`] and provides methods to mount components,
//! activate header triggers by label, and read back what an assistive
//! technology user would observe: header indicators, column order and the
//! live region.

use crate::bridge::table::{header_label, trigger_of};
use crate::component::Component;
use crate::config::GridConfig;
use crate::dom::NodeId;
use crate::error::GridError;
use crate::event::{Envelope, Key};
use crate::grid::SortChange;
use crate::page::Page;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless page driver for testing.
///
/// # Examples
///
/// ```
/// use gridkit::grid::{Column, DataGrid};
/// use gridkit::testing::Pilot;
///
/// let grid = DataGrid::new()
///     .with_caption("Data table")
///     .with_columns(vec![Column::new("name", "Name").sortable()])
///     .unwrap();
/// let mut pilot = Pilot::new();
/// pilot.mount(grid).unwrap();
/// pilot.click_header("Name").unwrap();
/// assert_eq!(
///     pilot.live_region_text().as_deref(),
///     Some("The table named \"Data table\" is now sorted by Name in ascending order.")
/// );
/// ```
pub struct Pilot {
    page: Page,
    config: GridConfig,
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot {
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    /// A pilot that locates triggers using `config`'s class names.
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            page: Page::new(),
            config,
        }
    }

    /// A pilot whose page body holds `source`, unenhanced.
    pub fn with_markup(source: &str) -> Result<Self, GridError> {
        let mut pilot = Self::new();
        let body = pilot.page.body();
        pilot.page.insert_markup(body, source)?;
        Ok(pilot)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Mount a component into the page body.
    pub fn mount(&mut self, component: impl Component + 'static) -> Result<NodeId, GridError> {
        let body = self.page.body();
        self.page.mount(body, component)
    }

    /// Enhance everything in the page body.
    pub fn enhance_body(&mut self) -> Result<crate::bridge::Enhancement, GridError> {
        let body = self.page.body();
        let config = self.config.clone();
        self.page.enhance(body, &config)
    }

    /// Run the deferred re-render.
    pub fn flush(&mut self) -> Result<usize, GridError> {
        self.page.flush()
    }

    /// Click the trigger in the first header labelled `label`.
    pub fn click_header(&mut self, label: &str) -> Result<usize, GridError> {
        let trigger = self.trigger(label)?;
        self.page.click(trigger)
    }

    /// Press `key` on the trigger in the first header labelled `label`.
    pub fn press_header(&mut self, label: &str, key: Key) -> Result<usize, GridError> {
        let trigger = self.trigger(label)?;
        self.page.press_key(trigger, key)
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Header cells in document order.
    pub fn headers(&self) -> Vec<NodeId> {
        let dom = self.page.dom();
        dom.root()
            .map(|root| dom.descendants_matching(root, |d| d.is("th")))
            .unwrap_or_default()
    }

    /// The first header labelled `label`.
    pub fn header(&self, label: &str) -> Option<NodeId> {
        let dom = self.page.dom();
        self.headers()
            .into_iter()
            .find(|&th| header_label(dom, th) == label)
    }

    /// The trigger of the first header labelled `label`.
    pub fn trigger(&self, label: &str) -> Result<NodeId, GridError> {
        let header = self
            .header(label)
            .ok_or_else(|| GridError::UnknownColumn(label.to_owned()))?;
        trigger_of(self.page.dom(), header, &self.config)
            .ok_or_else(|| GridError::NotSortable(label.to_owned()))
    }

    /// `(label, aria-sort)` for every header, in document order.
    pub fn sort_indicators(&self) -> Vec<(String, Option<String>)> {
        let dom = self.page.dom();
        self.headers()
            .into_iter()
            .map(|th| (header_label(dom, th), dom.attr(th, "aria-sort").map(str::to_owned)))
            .collect()
    }

    /// Headers that currently show an indicator.
    pub fn sorted_headers(&self) -> Vec<String> {
        self.sort_indicators()
            .into_iter()
            .filter_map(|(label, sort)| sort.map(|_| label))
            .collect()
    }

    /// Text of column `index` in every body row of the first table.
    pub fn column_texts(&self, index: usize) -> Vec<String> {
        let dom = self.page.dom();
        let Some(tbody) = dom
            .root()
            .and_then(|root| dom.first_descendant(root, |d| d.is("tbody")))
        else {
            return Vec::new();
        };
        dom.element_children(tbody)
            .into_iter()
            .map(|row| {
                dom.element_children(row)
                    .get(index)
                    .map(|&cell| dom.text_content(cell).trim().to_owned())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Text of the first live region on the page.
    pub fn live_region_text(&self) -> Option<String> {
        let dom = self.page.dom();
        let root = dom.root()?;
        let region = dom.first_descendant(root, |d| d.has_attr("aria-live"))?;
        Some(dom.text_content(region))
    }

    /// Drain queued notifications.
    pub fn messages(&mut self) -> Vec<Envelope> {
        self.page.drain_messages()
    }

    /// Drain queued notifications, keeping only sort changes.
    pub fn sort_changes(&mut self) -> Vec<SortChange> {
        self.messages()
            .iter()
            .filter_map(|e| e.downcast_ref::<SortChange>().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"<table><caption>Scores</caption>
        <thead><tr><th data-sortable>Team</th><th>Notes</th></tr></thead>
        <tbody><tr><td>Owls</td><td>b</td></tr><tr><td>Bats</td><td>a</td></tr></tbody>
        </table><div aria-live="polite"></div>"#;

    #[test]
    fn drives_static_markup() {
        let mut pilot = Pilot::with_markup(TABLE).unwrap();
        pilot.enhance_body().unwrap();
        pilot.click_header("Team").unwrap();
        assert_eq!(pilot.column_texts(0), ["Bats", "Owls"]);
        assert_eq!(pilot.sorted_headers(), ["Team"]);
        assert!(pilot.live_region_text().unwrap().contains("sorted by Team"));
    }

    #[test]
    fn lookup_errors() {
        let mut pilot = Pilot::with_markup(TABLE).unwrap();
        pilot.enhance_body().unwrap();
        assert_eq!(pilot.click_header("Nope"), Err(GridError::UnknownColumn("Nope".to_owned())));
        assert_eq!(pilot.click_header("Notes"), Err(GridError::NotSortable("Notes".to_owned())));
    }
}
