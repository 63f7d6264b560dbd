//! Cell values, display formatting and sort keys.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::column::{Column, ValueType};
use crate::sort::parse_number;

/// Shown for a number or percentage cell whose value is not a number.
pub const INVALID_NUMBER: &str = "Invalid number";
/// Shown for a date cell whose value is not a date.
pub const INVALID_DATE: &str = "Invalid date";

/// One row: cell values by column key.
pub type Row = BTreeMap<String, CellValue>;

/// A scalar cell value.
///
/// Deserializes from a JSON number, an ISO `YYYY-MM-DD` string or any other
/// string, in that order of preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    /// The value as a finite number, parsing text if needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            CellValue::Text(text) => parse_number(text),
            CellValue::Date(_) => None,
        }
    }

    /// The value as a date, parsing ISO text if needed.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(date) => Some(*date),
            CellValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<NaiveDate> for CellValue {
    fn from(date: NaiveDate) -> Self {
        CellValue::Date(date)
    }
}

/// Format a number with comma thousands separators: `1234.5` → `"1,234.5"`.
pub fn format_number(n: f64) -> String {
    let plain = n.to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Text shown in a cell of the given type. Missing cells are empty.
pub fn display(value: Option<&CellValue>, value_type: ValueType) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value_type {
        ValueType::Text => value.to_string(),
        ValueType::Number => value
            .as_number()
            .map_or_else(|| INVALID_NUMBER.to_owned(), format_number),
        ValueType::Percentage => value
            .as_number()
            .map_or_else(|| INVALID_NUMBER.to_owned(), |n| format!("{}%", format_number(n))),
        ValueType::Date => value
            .as_date()
            .map_or_else(|| INVALID_DATE.to_owned(), |d| d.format("%-d %B %Y").to_string()),
    }
}

/// Raw value a cell sorts by in place of its display text.
///
/// Numbers and percentages sort by their plain decimal, dates by Unix
/// milliseconds at midnight UTC. Text columns and invalid values have none.
pub fn override_value(value: Option<&CellValue>, value_type: ValueType) -> Option<String> {
    let value = value?;
    match value_type {
        ValueType::Text => None,
        ValueType::Number | ValueType::Percentage => value.as_number().map(|n| n.to_string()),
        ValueType::Date => value
            .as_date()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis().to_string()),
    }
}

/// The string a row sorts by in `column`: override if present, else display.
///
/// This is the same precedence the enhancement pass applies to rendered cells.
pub fn sort_key(row: &Row, column: &Column) -> String {
    let value = row.get(&column.key);
    override_value(value, column.value_type)
        .unwrap_or_else(|| display(value, column.value_type).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-1234567.0), "-1,234,567");
    }

    #[test]
    fn display_by_type() {
        assert_eq!(display(Some(&1234.5.into()), ValueType::Number), "1,234.5");
        assert_eq!(display(Some(&"2500".into()), ValueType::Number), "2,500");
        assert_eq!(display(Some(&25_i32.into()), ValueType::Percentage), "25%");
        assert_eq!(display(Some(&12.5.into()), ValueType::Percentage), "12.5%");
        assert_eq!(display(Some(&date(2024, 1, 15)), ValueType::Date), "15 January 2024");
        assert_eq!(display(Some(&"2024-03-05".into()), ValueType::Date), "5 March 2024");
        assert_eq!(display(Some(&"Ann".into()), ValueType::Text), "Ann");
        assert_eq!(display(Some(&30_i32.into()), ValueType::Text), "30");
        assert_eq!(display(None, ValueType::Number), "");
    }

    #[test]
    fn invalid_values_get_markers() {
        assert_eq!(display(Some(&"n/a".into()), ValueType::Number), INVALID_NUMBER);
        assert_eq!(display(Some(&"soon".into()), ValueType::Date), INVALID_DATE);
        assert_eq!(display(Some(&date(2024, 1, 1)), ValueType::Percentage), INVALID_NUMBER);
        assert_eq!(override_value(Some(&"n/a".into()), ValueType::Number), None);
    }

    #[test]
    fn overrides() {
        assert_eq!(override_value(Some(&1234.5.into()), ValueType::Number).as_deref(), Some("1234.5"));
        assert_eq!(override_value(Some(&"Ann".into()), ValueType::Text), None);
        assert_eq!(
            override_value(Some(&date(1970, 1, 2)), ValueType::Date).as_deref(),
            Some("86400000")
        );
    }

    #[test]
    fn sort_key_precedence() {
        let row: Row = [
            ("name".to_owned(), CellValue::from("Ann")),
            ("paid".to_owned(), CellValue::from(1500_i64)),
        ]
        .into_iter()
        .collect();
        let name = Column::new("name", "Name");
        let paid = Column::new("paid", "Paid").with_type(ValueType::Number);
        let missing = Column::new("gone", "Gone");
        assert_eq!(sort_key(&row, &name), "Ann");
        assert_eq!(sort_key(&row, &paid), "1500");
        assert_eq!(sort_key(&row, &missing), "");
    }

    #[test]
    fn untagged_deserialization() {
        let row: Row = serde_json::from_str(r#"{"a": 3, "b": "2024-01-15", "c": "hello"}"#).unwrap();
        assert_eq!(row["a"], CellValue::Number(3.0));
        assert_eq!(row["b"], date(2024, 1, 15));
        assert_eq!(row["c"], CellValue::from("hello"));
    }
}
