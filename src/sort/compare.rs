//! Cell comparator and stable row ordering.
//!
//! Values are compared as strings as they appear at sort time (override value
//! or rendered text). Two values that both parse fully as numbers compare
//! numerically; everything else uses a natural collation that ignores case and
//! punctuation and compares digit runs by value, so `"Item 9"` sorts before
//! `"Item 10"`. The declared column type plays no part here.

use std::cmp::Ordering;

use super::direction::SortDirection;

/// Parse `text` as a number if the whole (trimmed) string is one.
///
/// Only plain decimal notation with optional sign, fraction and exponent is
/// accepted; `inf`, `NaN`, thousands separators and empty strings are not.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !text.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare two cell values.
///
/// `numeric` enables digit-run comparison by value inside the collation; the
/// pure-number fast path applies either way.
pub fn compare_values(a: &str, b: &str, numeric: bool) -> Ordering {
    if let (Some(x), Some(y)) = (parse_number(a), parse_number(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    collate(a, b, numeric)
}

/// Compare two values for a sort in `direction`.
///
/// Descending swaps the operands rather than reversing the result.
pub fn compare_directed(a: &str, b: &str, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => compare_values(a, b, true),
        SortDirection::Descending => compare_values(b, a, true),
    }
}

/// Stable ordering of `keys` in `direction`, as indices into `keys`.
///
/// Both the enhancement pass (over DOM rows) and the grid (over its own rows)
/// order through this function, so equal inputs always produce equal orders.
pub fn sorted_order<S: AsRef<str>>(keys: &[S], direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&i, &j| compare_directed(keys[i].as_ref(), keys[j].as_ref(), direction));
    order
}

/// Sort rows of cell strings on `column`, returning a new sequence.
///
/// Rows shorter than `column + 1` sort as if the cell were empty.
pub fn sort_by_column<R: AsRef<[String]> + Clone>(
    rows: &[R],
    column: usize,
    direction: SortDirection,
) -> Vec<R> {
    let keys: Vec<&str> = rows
        .iter()
        .map(|row| row.as_ref().get(column).map_or("", |cell| cell.trim()))
        .collect();
    sorted_order(&keys, direction)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect()
}

/// Natural, case- and punctuation-insensitive collation.
///
/// Primary comparison folds common Latin accents; accents only break ties.
pub fn collate(a: &str, b: &str, numeric: bool) -> Ordering {
    let primary = compare_keys(&collation_key(a, numeric, true), &collation_key(b, numeric, true));
    if primary != Ordering::Equal {
        return primary;
    }
    compare_keys(&collation_key(a, numeric, false), &collation_key(b, numeric, false))
}

/// One comparable unit of a collation key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Unit {
    /// A run of ASCII digits, leading zeros stripped.
    Digits(String),
    /// A single lowercased letter or non-ASCII digit.
    Letter(char),
}

fn collation_key(text: &str, numeric: bool, fold_accents: bool) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            continue;
        }
        if numeric && c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                run.push(d);
                chars.next();
            }
            let trimmed = run.trim_start_matches('0');
            units.push(Unit::Digits(if trimmed.is_empty() { "0" } else { trimmed }.to_owned()));
            continue;
        }
        for lower in c.to_lowercase() {
            units.push(Unit::Letter(if fold_accents { fold(lower) } else { lower }));
        }
    }
    units
}

fn compare_keys(a: &[Unit], b: &[Unit]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ordering = match (x, y) {
            (Unit::Digits(x), Unit::Digits(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
            (Unit::Digits(_), Unit::Letter(_)) => Ordering::Less,
            (Unit::Letter(_), Unit::Digits(_)) => Ordering::Greater,
            (Unit::Letter(x), Unit::Letter(y)) => compare_letters(*x, *y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

/// Digits sort before letters, letters by code point.
fn compare_letters(x: char, y: char) -> Ordering {
    x.is_numeric()
        .cmp(&y.is_numeric())
        .reverse()
        .then_with(|| x.cmp(&y))
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ś' | 'š' => 's',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
