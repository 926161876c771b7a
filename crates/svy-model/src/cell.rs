//! Raw cell values as produced by the tabular decoder.

use serde::{Deserialize, Serialize};

/// A single cell from a decoded survey export.
///
/// Survey files mix free text, numeric answers, and blanks. The decoder
/// sniffs numbers at the boundary; downstream code treats cells as opaque
/// except where numeric semantics are explicitly required (via
/// [`CellValue::as_number`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    /// Free-form text content.
    Text(String),
    /// A numeric answer (Likert points, elapsed seconds, counts).
    Number(f64),
    /// Absent or blank cell.
    Missing,
}

impl CellValue {
    /// Types a raw decoder string: blank becomes [`CellValue::Missing`],
    /// finite numeric text becomes [`CellValue::Number`], everything else
    /// stays [`CellValue::Text`].
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric coercion used by the analyzer and the aggregate views.
    ///
    /// `Text` whose trimmed content parses as a finite float coerces too,
    /// covering hand-edited cells. Anything else is a coercion skip, never
    /// an error.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
            Self::Missing => None,
        }
    }

    /// True when the cell carries no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Display rendering for tables and category grouping.
    ///
    /// Returns `None` for missing or blank cells so callers can substitute
    /// their own placeholder label.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Number(value) => Some(value.to_string()),
            Self::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_types_cells() {
        assert_eq!(CellValue::from_raw("  "), CellValue::Missing);
        assert_eq!(CellValue::from_raw("4"), CellValue::Number(4.0));
        assert_eq!(CellValue::from_raw("4.5"), CellValue::Number(4.5));
        assert_eq!(
            CellValue::from_raw("45 sec"),
            CellValue::Text("45 sec".to_string())
        );
    }

    #[test]
    fn from_raw_rejects_non_finite_numbers() {
        assert_eq!(CellValue::from_raw("NaN"), CellValue::Text("NaN".to_string()));
        assert_eq!(CellValue::from_raw("inf"), CellValue::Text("inf".to_string()));
    }

    #[test]
    fn as_number_coerces_numeric_text() {
        assert_eq!(CellValue::Text("45".to_string()).as_number(), Some(45.0));
        assert_eq!(CellValue::Text("45 sec".to_string()).as_number(), None);
        assert_eq!(CellValue::Number(90.0).as_number(), Some(90.0));
        assert_eq!(CellValue::Missing.as_number(), None);
    }

    #[test]
    fn render_formats_numbers_without_trailing_zero() {
        assert_eq!(CellValue::Number(4.0).render().as_deref(), Some("4"));
        assert_eq!(CellValue::Number(4.5).render().as_deref(), Some("4.5"));
        assert_eq!(CellValue::Text(" ".to_string()).render(), None);
        assert_eq!(CellValue::Missing.render(), None);
    }
}
