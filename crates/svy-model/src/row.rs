//! Row records and their stable identifiers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::ModelError;
use crate::flag::QualityFlag;

/// A deterministic row identifier.
///
/// Short fixed-size binary id rendered as lowercase hex. Identity is stable
/// across filtering and re-rendering; row position is never used as
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId([u8; 16]);

impl RowId {
    pub fn from_first_16_bytes_of_sha256(digest: [u8; 32]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the hex rendering back into an id (the serde string form).
    pub fn parse_hex(value: &str) -> Result<Self, ModelError> {
        let bytes =
            hex::decode(value.trim()).map_err(|_| ModelError::InvalidRowId(value.to_string()))?;
        if bytes.len() != 16 {
            return Err(ModelError::InvalidRowId(value.to_string()));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl serde::Serialize for RowId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RowId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Screening status derived from a row's flags and exclusion bit.
///
/// Every committed row is in exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// No flags, not excluded.
    Clean,
    /// At least one flag, not excluded.
    Flagged,
    /// Excluded from analysis; terminal.
    Excluded,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Flagged => "flagged",
            Self::Excluded => "excluded",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One survey response: raw cells keyed by original header, plus the three
/// system fields maintained by the project.
///
/// `flags` is recomputed whenever quality analysis runs; `is_excluded` is
/// user-controlled, defaults to false, and is monotonic — nothing in scope
/// clears it once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowRecord {
    pub id: RowId,
    pub cells: BTreeMap<String, CellValue>,
    pub flags: BTreeSet<QualityFlag>,
    pub is_excluded: bool,
}

impl RowRecord {
    /// A fresh record with empty flags, not excluded.
    pub fn new(id: RowId, cells: BTreeMap<String, CellValue>) -> Self {
        Self {
            id,
            cells,
            flags: BTreeSet::new(),
            is_excluded: false,
        }
    }

    /// Cell lookup by original header. Case-sensitive exact match; a header
    /// that differs in case from the mapping entry is simply absent.
    pub fn cell(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn status(&self) -> RowStatus {
        if self.is_excluded {
            RowStatus::Excluded
        } else if self.is_flagged() {
            RowStatus::Flagged
        } else {
            RowStatus::Clean
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id(byte: u8) -> RowId {
        RowId::from_first_16_bytes_of_sha256([byte; 32])
    }

    #[test]
    fn row_id_hex_round_trip() {
        let id = sample_id(0xab);
        let parsed = RowId::parse_hex(&id.to_hex()).expect("parse hex id");
        assert_eq!(id, parsed);
    }

    #[test]
    fn row_id_rejects_bad_hex() {
        assert!(RowId::parse_hex("not-hex").is_err());
        assert!(RowId::parse_hex("abcd").is_err());
    }

    #[test]
    fn status_partitions_rows() {
        let mut row = RowRecord::new(sample_id(1), BTreeMap::new());
        assert_eq!(row.status(), RowStatus::Clean);

        row.flags.insert(QualityFlag::Speeder);
        assert_eq!(row.status(), RowStatus::Flagged);

        row.is_excluded = true;
        assert_eq!(row.status(), RowStatus::Excluded);
    }

    #[test]
    fn cell_lookup_is_case_sensitive() {
        let mut cells = BTreeMap::new();
        cells.insert("Gender".to_string(), CellValue::Text("F".to_string()));
        let row = RowRecord::new(sample_id(2), cells);
        assert!(row.cell("Gender").is_some());
        assert!(row.cell("gender").is_none());
    }
}
