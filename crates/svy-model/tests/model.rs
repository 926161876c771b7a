//! Tests for svy-model types.

use std::collections::BTreeMap;

use svy_model::{CellValue, ColumnMapping, ColumnRole, QualityFlag, RowId, RowRecord};

fn sample_row() -> RowRecord {
    let mut cells = BTreeMap::new();
    cells.insert("性別".to_string(), CellValue::Text("女".to_string()));
    cells.insert("填答時間 (秒)".to_string(), CellValue::Number(45.0));
    cells.insert("Q9".to_string(), CellValue::Missing);
    let mut row = RowRecord::new(RowId::from_first_16_bytes_of_sha256([7u8; 32]), cells);
    row.flags.insert(QualityFlag::Speeder);
    row
}

#[test]
fn row_record_serde_round_trip() {
    let row = sample_row();
    let json = serde_json::to_string(&row).expect("serialize row");
    let round: RowRecord = serde_json::from_str(&json).expect("deserialize row");

    assert_eq!(round.id, row.id);
    assert_eq!(round.cells, row.cells);
    assert_eq!(round.flags, row.flags);
    assert!(!round.is_excluded);
}

#[test]
fn row_id_serializes_as_hex_string() {
    let row = sample_row();
    let value = serde_json::to_value(&row).expect("serialize row");
    let id = value
        .get("id")
        .and_then(|v| v.as_str())
        .expect("id field is a string");
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn mapping_round_trips_with_cjk_headers() {
    let mapping = ColumnMapping::new("填答時間 (秒)", "DURATION", ColumnRole::Meta);
    let json = serde_json::to_string(&mapping).expect("serialize mapping");
    let round: ColumnMapping = serde_json::from_str(&json).expect("deserialize mapping");
    assert_eq!(round, mapping);
}
