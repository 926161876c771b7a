//! Quality flags raised by the row analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A data-quality concern attached to a single response row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// Identical or near-identical answers across the scale items.
    Straightlining,
    /// Completed implausibly fast for genuine engagement.
    Speeder,
    /// Reserved in the taxonomy; the current analyzer never raises it.
    MissingData,
}

impl QualityFlag {
    /// Bilingual display label matching the original survey tooling.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Straightlining => "填答一致 (Straightlining)",
            Self::Speeder => "填答過快 (Speeder)",
            Self::MissingData => "缺漏值 (Missing Data)",
        }
    }

    /// Short ASCII name for logs and machine output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Straightlining => "straightlining",
            Self::Speeder => "speeder",
            Self::MissingData => "missing_data",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&QualityFlag::Straightlining).expect("serialize flag");
        assert_eq!(json, "\"straightlining\"");
    }

    #[test]
    fn labels_are_bilingual() {
        assert!(QualityFlag::Speeder.label().contains("Speeder"));
        assert!(QualityFlag::MissingData.label().contains("Missing Data"));
    }
}
