//! Sort direction and the header sort indicator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of an applied sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The `aria-sort` token for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Parse an `aria-sort` token. `"none"` and unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "ascending" => Some(SortDirection::Ascending),
            "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a header cell currently shows.
///
/// `Absent` is the unsorted state: the `aria-sort` attribute is missing, never
/// set to `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortIndicator {
    #[default]
    Absent,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Read an indicator from an `aria-sort` attribute value.
    pub fn from_attr(value: Option<&str>) -> Self {
        value
            .and_then(SortDirection::parse)
            .map_or(SortIndicator::Absent, SortIndicator::from)
    }

    /// The attribute value to write, or `None` to remove the attribute.
    pub fn as_attr(self) -> Option<&'static str> {
        self.direction().map(SortDirection::as_str)
    }

    /// The direction shown, if any.
    pub fn direction(self) -> Option<SortDirection> {
        match self {
            SortIndicator::Absent => None,
            SortIndicator::Ascending => Some(SortDirection::Ascending),
            SortIndicator::Descending => Some(SortDirection::Descending),
        }
    }

    /// Direction produced by activating a header in this state.
    ///
    /// Unsorted and descending headers go ascending; ascending goes descending.
    pub fn next(self) -> SortDirection {
        match self {
            SortIndicator::Ascending => SortDirection::Descending,
            SortIndicator::Absent | SortIndicator::Descending => SortDirection::Ascending,
        }
    }
}

impl From<SortDirection> for SortIndicator {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_tokens() {
        assert_eq!(SortDirection::Ascending.as_str(), "ascending");
        assert_eq!(SortDirection::Descending.to_string(), "descending");
        assert_eq!(SortDirection::parse(" descending "), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("none"), None);
        assert_eq!(SortDirection::Ascending.opposite(), SortDirection::Descending);
    }

    #[test]
    fn indicator_from_attr() {
        assert_eq!(SortIndicator::from_attr(None), SortIndicator::Absent);
        assert_eq!(SortIndicator::from_attr(Some("none")), SortIndicator::Absent);
        assert_eq!(SortIndicator::from_attr(Some("ascending")), SortIndicator::Ascending);
        assert_eq!(SortIndicator::from_attr(Some("descending")), SortIndicator::Descending);
    }

    #[test]
    fn absent_has_no_attribute() {
        assert_eq!(SortIndicator::Absent.as_attr(), None);
        assert_eq!(SortIndicator::Descending.as_attr(), Some("descending"));
    }

    #[test]
    fn cycle() {
        let mut indicator = SortIndicator::Absent;
        let mut seen = Vec::new();
        for _ in 0..4 {
            let next = indicator.next();
            seen.push(next);
            indicator = next.into();
        }
        assert_eq!(
            seen,
            vec![
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
                SortDirection::Descending,
            ]
        );
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&SortDirection::Descending).unwrap();
        assert_eq!(json, "\"descending\"");
    }
}
