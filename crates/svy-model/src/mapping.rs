//! Column role mappings assigned at import time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Variable code carried by elapsed-time columns. The speeder check keys
/// on this code, wherever it came from (inference or a user edit).
pub const DURATION_CODE: &str = "DURATION";
/// Variable code for respondent or device identifier columns.
pub const ID_CODE: &str = "ID";
/// Variable code for gender demographic columns.
pub const GENDER_CODE: &str = "GENDER";
/// Variable code for age demographic columns.
pub const AGE_CODE: &str = "AGE";

/// Semantic role of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Respondent background variable (gender, age).
    Demographic,
    /// Likert-style rating item; feeds the straightlining check and means.
    Scale,
    /// System metadata (duration, respondent id).
    Meta,
    /// Not analyzed.
    Ignore,
}

impl ColumnRole {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demographic => "demographic",
            Self::Scale => "scale",
            Self::Meta => "meta",
            Self::Ignore => "ignore",
        }
    }

    /// Parse a role from user input, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.trim().to_lowercase().as_str() {
            "demographic" => Ok(Self::Demographic),
            "scale" => Ok(Self::Scale),
            "meta" => Ok(Self::Meta),
            "ignore" => Ok(Self::Ignore),
            _ => Err(ModelError::UnknownRole(value.to_string())),
        }
    }
}

impl FromStr for ColumnRole {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment of a semantic role and an analysis variable code to one
/// source column.
///
/// Created by inference at import, editable by the user before commit,
/// then fixed for the project's lifetime. `original_header` is unique
/// within a dataset and matched case-sensitively against row keys;
/// `variable_code` is a free identifier with no uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub original_header: String,
    pub variable_code: String,
    pub role: ColumnRole,
}

impl ColumnMapping {
    pub fn new(
        original_header: impl Into<String>,
        variable_code: impl Into<String>,
        role: ColumnRole,
    ) -> Self {
        Self {
            original_header: original_header.into(),
            variable_code: variable_code.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(ColumnRole::parse("Scale").expect("parse"), ColumnRole::Scale);
        assert_eq!(
            ColumnRole::parse(" META ").expect("parse"),
            ColumnRole::Meta
        );
        assert!(ColumnRole::parse("chart").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ColumnRole::Demographic).expect("serialize role");
        assert_eq!(json, "\"demographic\"");
    }
}
