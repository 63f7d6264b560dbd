//! Column descriptors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// How a column's values are displayed.
///
/// Sorting never looks at this; it only picks the display format and whether
/// cells carry a raw sort override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Number,
    Date,
    Percentage,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Number => "number",
            ValueType::Date => "date",
            ValueType::Percentage => "percentage",
        }
    }
}

/// One column of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique within a grid; rows are keyed by it.
    pub key: String,
    /// Header text.
    pub label: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub value_type: ValueType,
}

impl Column {
    /// A non-sortable text column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            value_type: ValueType::Text,
        }
    }

    /// Make the column sortable (builder).
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the value type (builder).
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }
}

/// Reject column sets that reuse a key.
pub fn validate_columns(columns: &[Column]) -> Result<(), GridError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(GridError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}
