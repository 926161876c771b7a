//! CSV decoding into a typed response table.
//!
//! The decoder is the only place raw bytes are interpreted. Everything past
//! this boundary works on [`DecodedTable`] and never sees encodings, byte
//! order marks, or ragged records again.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use svy_model::CellValue;

use crate::error::{DecodeError, Result};

/// A decoded dataset: ordered headers plus one cell map per response row.
///
/// Rows keep file order. A short record leaves its trailing columns absent
/// from the map; an explicitly blank cell is present as
/// [`CellValue::Missing`]. Consumers must tolerate both shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl DecodedTable {
    /// True when decoding produced no data rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::from_raw(raw.trim().trim_matches('\u{feff}'))
}

/// Rejects byte streams in encodings the CSV reader would silently garble.
fn validate_encoding(bytes: &[u8]) -> Result<()> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(DecodeError::UnsupportedEncoding {
            encoding: "UTF-16 LE".to_string(),
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(DecodeError::UnsupportedEncoding {
            encoding: "UTF-16 BE".to_string(),
        });
    }
    Ok(())
}

/// Decodes an in-memory CSV byte stream.
///
/// The first non-blank record is the header row. Trailing blank header
/// cells (a trailing delimiter on the header line) are dropped; a blank
/// header between named columns is a decode failure. Fully blank records
/// are skipped. A stream with a header but zero data rows decodes
/// successfully; rejecting empty datasets is a project-level concern.
pub fn decode_csv_bytes(bytes: &[u8]) -> Result<DecodedTable> {
    validate_encoding(bytes)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record
            .iter()
            .map(|raw| raw.trim().trim_matches('\u{feff}').to_string())
            .collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Err(DecodeError::MissingHeader);
    }

    let mut headers: Vec<String> = raw_rows[0].iter().map(|raw| normalize_header(raw)).collect();
    while headers.last().is_some_and(String::is_empty) {
        headers.pop();
    }
    if headers.is_empty() {
        return Err(DecodeError::MissingHeader);
    }
    if let Some(position) = headers.iter().position(String::is_empty) {
        return Err(DecodeError::BlankHeader {
            position: position + 1,
        });
    }
    warn_on_duplicate_headers(&headers);

    let mut rows = Vec::with_capacity(raw_rows.len().saturating_sub(1));
    for record in raw_rows.iter().skip(1) {
        let mut cells = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(raw) = record.get(idx) {
                cells.insert(header.clone(), normalize_cell(raw));
            }
        }
        rows.push(cells);
    }
    Ok(DecodedTable { headers, rows })
}

/// Duplicate headers collapse into one cell per row map. The last column
/// wins, which is surprising enough to call out.
fn warn_on_duplicate_headers(headers: &[String]) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for header in headers {
        if !seen.insert(header.as_str()) && reported.insert(header.as_str()) {
            tracing::warn!(header = %header, "duplicate column header, rightmost value wins");
        }
    }
}

/// Reads and decodes a CSV file from disk.
pub fn read_csv_table(path: &Path) -> Result<DecodedTable> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DecodeError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DecodeError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let table = decode_csv_bytes(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "decoded csv file"
    );
    Ok(table)
}

/// Writes a table back out as CSV. Missing cells render as blank fields.
pub fn write_csv_table(table: &DecodedTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        let record: Vec<String> = table
            .headers
            .iter()
            .map(|header| {
                row.get(header)
                    .and_then(CellValue::render)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| DecodeError::Malformed {
            message: err.to_string(),
        })?;
    fs::write(path, bytes).map_err(|source| DecodeError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
