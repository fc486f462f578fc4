//! Line number provenance for import edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source line of an import statement.
///
/// Graphs built by hand (or from sources without position data) do not know
/// where an import happened; that case is kept as an explicit variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum LineNumber {
    /// Known 1-based line number.
    Known(u32),
    /// Provenance not tracked.
    Unknown,
}

impl LineNumber {
    /// The line number, if known.
    pub fn get(self) -> Option<u32> {
        match self {
            Self::Known(line) => Some(line),
            Self::Unknown => None,
        }
    }
}

impl From<Option<u32>> for LineNumber {
    fn from(line: Option<u32>) -> Self {
        match line {
            Some(line) => Self::Known(line),
            None => Self::Unknown,
        }
    }
}

impl From<LineNumber> for Option<u32> {
    fn from(line: LineNumber) -> Self {
        line.get()
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(line) => write!(f, "l.{}", line),
            Self::Unknown => write!(f, "l.?"),
        }
    }
}

/// Ordered, de-duplicated set of line numbers attributed to one edge.
///
/// Never empty: an edge without any recorded detail carries a single
/// [`LineNumber::Unknown`]. Deserialized lists are normalised the same way
/// as [`LineNumbers::from_details`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<LineNumber>")]
pub struct LineNumbers(Vec<LineNumber>);

impl From<Vec<LineNumber>> for LineNumbers {
    fn from(lines: Vec<LineNumber>) -> Self {
        Self::normalised(lines)
    }
}

impl LineNumbers {
    /// Build from raw detail line numbers, sorting and removing duplicates.
    pub fn from_details<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = Option<u32>>,
    {
        Self::normalised(lines.into_iter().map(LineNumber::from).collect())
    }

    fn normalised(mut lines: Vec<LineNumber>) -> Self {
        lines.sort();
        lines.dedup();
        if lines.is_empty() {
            return Self::unknown();
        }
        Self(lines)
    }

    /// A single unknown line number.
    pub fn unknown() -> Self {
        Self(vec![LineNumber::Unknown])
    }

    /// A single known line number.
    pub fn known(line: u32) -> Self {
        Self(vec![LineNumber::Known(line)])
    }

    /// The line numbers in ascending order.
    pub fn as_slice(&self) -> &[LineNumber] {
        &self.0
    }

    /// Whether every entry is unknown.
    pub fn is_unknown(&self) -> bool {
        self.0.iter().all(|line| *line == LineNumber::Unknown)
    }
}

impl Default for LineNumbers {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for LineNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_line_numbers(&self.0))
    }
}

/// Human-readable form of a set of line numbers, e.g. `l.3, l.?`.
pub fn format_line_numbers(lines: &[LineNumber]) -> String {
    lines
        .iter()
        .map(LineNumber::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_and_unknown() {
        assert_eq!(LineNumber::Known(12).to_string(), "l.12");
        assert_eq!(LineNumber::Unknown.to_string(), "l.?");
        assert_eq!(
            format_line_numbers(&[LineNumber::Known(3), LineNumber::Unknown]),
            "l.3, l.?"
        );
    }

    #[test]
    fn test_from_details_sorts_and_dedups() {
        let lines = LineNumbers::from_details([Some(9), Some(2), Some(9)]);
        assert_eq!(lines.to_string(), "l.2, l.9");
    }

    #[test]
    fn test_no_details_is_unknown() {
        let lines = LineNumbers::from_details(std::iter::empty());
        assert!(lines.is_unknown());
        assert_eq!(lines.to_string(), "l.?");
    }

    #[test]
    fn test_serde_as_optional_integers() {
        let lines = LineNumbers::from_details([Some(4), None]);
        let json = serde_json::to_string(&lines).unwrap();
        assert_eq!(json, "[4,null]");

        let back: LineNumbers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lines);
    }

    #[test]
    fn test_deserialize_empty_list_is_unknown() {
        let lines: LineNumbers = serde_json::from_str("[]").unwrap();
        assert!(lines.is_unknown());
        assert_eq!(lines.to_string(), "l.?");
    }

    #[test]
    fn test_deserialize_sorts_and_dedups() {
        let lines: LineNumbers = serde_json::from_str("[9, null, 2, 9]").unwrap();
        assert_eq!(lines.to_string(), "l.2, l.9, l.?");
    }
}
