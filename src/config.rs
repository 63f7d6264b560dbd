//! DOM contract shared by the enhancement pass and the grid.
//!
//! Both authorities over a table read and write the same attributes and
//! classes, so they are configured from one [`GridConfig`].

/// Names of the attributes and classes that make up the sortable-table markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Class on the rendered `<table>`.
    pub table_class: String,
    /// Attribute flagging a header cell as sortable.
    pub sortable_attr: String,
    /// Attribute carrying a header's column key.
    pub column_key_attr: String,
    /// Attribute carrying a cell's raw sort value.
    pub sort_value_attr: String,
    /// Class on inserted trigger buttons.
    pub trigger_class: String,
    /// Class marking the cell each row was last sorted on.
    pub active_cell_class: String,
    /// Attribute written on a root once it has been enhanced.
    pub init_attr: String,
    /// Class on the live region element.
    pub live_region_class: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            table_class: "govuk-table".to_owned(),
            sortable_attr: "data-sortable".to_owned(),
            column_key_attr: "data-column-key".to_owned(),
            sort_value_attr: "data-sort-value".to_owned(),
            trigger_class: "sortable-table__button".to_owned(),
            active_cell_class: "sortable-table__cell--sorted".to_owned(),
            init_attr: "data-sortable-table-init".to_owned(),
            live_region_class: "govuk-visually-hidden".to_owned(),
        }
    }
}

impl GridConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table class (builder).
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Set the sortable-header marker attribute (builder).
    pub fn with_sortable_attr(mut self, attr: impl Into<String>) -> Self {
        self.sortable_attr = attr.into();
        self
    }

    /// Set the sort-override attribute (builder).
    pub fn with_sort_value_attr(mut self, attr: impl Into<String>) -> Self {
        self.sort_value_attr = attr.into();
        self
    }

    /// Set the trigger button class (builder).
    pub fn with_trigger_class(mut self, class: impl Into<String>) -> Self {
        self.trigger_class = class.into();
        self
    }

    /// Set the active-sort-cell class (builder).
    pub fn with_active_cell_class(mut self, class: impl Into<String>) -> Self {
        self.active_cell_class = class.into();
        self
    }
}
