//! Committed project state and its derived views.
//!
//! A [`ProjectState`] is created whole by [`ProjectState::commit`] and
//! replaced whole on re-import; the only in-place mutations are the two
//! exclusion operations, and those are monotonic. Exclusion is a soft
//! flag, never deletion, so the import-time total and row order survive
//! every downstream action.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::Digest;

use svy_model::{CellValue, ColumnMapping, ColumnRole, RowId, RowRecord, RowStatus};
use svy_screen::{ScreenConfig, analyze_row};

use crate::error::{ProjectError, Result};

/// Category label used when a demographic cell is absent or blank.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Deterministic: sha256("<source_id>\0<record_number>"), first 16 bytes.
fn derive_row_id(source_id: &str, record_number: u64) -> RowId {
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    RowId::from_first_16_bytes_of_sha256(digest)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The committed dataset: screened rows plus the mapping they were
/// screened under.
#[derive(Debug, Clone)]
pub struct ProjectState {
    source_id: String,
    rows: Vec<RowRecord>,
    mappings: Vec<ColumnMapping>,
    total_respondents: usize,
}

impl ProjectState {
    /// Finalizes an import: assigns every row a stable id, screens it
    /// under `mappings`, and produces the state that replaces whatever
    /// the session held before.
    ///
    /// Flags are computed here, once, against the mapping as confirmed;
    /// later mapping edits never reach a committed project. A dataset
    /// with zero rows is rejected rather than committed as an empty
    /// project.
    pub fn commit(
        source_id: impl Into<String>,
        rows: Vec<BTreeMap<String, CellValue>>,
        mappings: Vec<ColumnMapping>,
        config: &ScreenConfig,
    ) -> Result<Self> {
        let source_id = source_id.into();
        if rows.is_empty() {
            return Err(ProjectError::EmptyImport);
        }
        let total_respondents = rows.len();
        let rows: Vec<RowRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| {
                let id = derive_row_id(&source_id, idx as u64 + 1);
                let mut record = RowRecord::new(id, cells);
                record.flags = analyze_row(&record.cells, &mappings, config);
                record
            })
            .collect();
        let flagged = rows.iter().filter(|row| row.is_flagged()).count();
        tracing::info!(
            source = %source_id,
            rows = total_respondents,
            flagged,
            "import committed"
        );
        Ok(Self {
            source_id,
            rows,
            mappings,
            total_respondents,
        })
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// All rows in decoder order, excluded ones included.
    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    #[must_use]
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Row count at import time. Never changes afterwards.
    #[must_use]
    pub fn total_respondents(&self) -> usize {
        self.total_respondents
    }

    /// Rows still part of the analysis, in decoder order.
    pub fn active_rows(&self) -> impl Iterator<Item = &RowRecord> {
        self.rows.iter().filter(|row| !row.is_excluded)
    }

    /// Count of rows not excluded. Derived on demand, never stored.
    #[must_use]
    pub fn valid_respondents(&self) -> usize {
        self.active_rows().count()
    }

    /// Active rows that still carry at least one flag.
    #[must_use]
    pub fn flagged_active_count(&self) -> usize {
        self.active_rows().filter(|row| row.is_flagged()).count()
    }

    /// Every row falls in exactly one bucket.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for row in &self.rows {
            match row.status() {
                RowStatus::Clean => counts.clean += 1,
                RowStatus::Flagged => counts.flagged += 1,
                RowStatus::Excluded => counts.excluded += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn find_row(&self, id: RowId) -> Option<&RowRecord> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Excludes one row. Returns whether the row was newly excluded;
    /// excluding an already excluded row is a no-op, not an error.
    pub fn exclude_row(&mut self, id: RowId) -> Result<bool> {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return Err(ProjectError::UnknownRow { id: id.to_hex() });
        };
        if row.is_excluded {
            return Ok(false);
        }
        row.is_excluded = true;
        tracing::debug!(id = %id, "row excluded");
        Ok(true)
    }

    /// Excludes every active row with a non-empty flag set, leaving clean
    /// rows untouched. Returns the number of newly excluded rows, which
    /// makes repeated application visibly idempotent.
    pub fn exclude_flagged(&mut self) -> usize {
        let mut newly_excluded = 0;
        for row in &mut self.rows {
            if row.is_flagged() && !row.is_excluded {
                row.is_excluded = true;
                newly_excluded += 1;
            }
        }
        if newly_excluded > 0 {
            tracing::info!(excluded = newly_excluded, "flagged rows excluded");
        }
        newly_excluded
    }

    /// Mean of each scale column over active rows, for display.
    ///
    /// Cells that fail numeric coercion are skipped, so the divisor is the
    /// count of coerced values, not the active row count. A column with no
    /// coercible values reports `None` rather than zero.
    #[must_use]
    pub fn scale_means(&self) -> Vec<ScaleMean> {
        self.mappings
            .iter()
            .filter(|mapping| mapping.role == ColumnRole::Scale)
            .map(|mapping| {
                let values: Vec<f64> = self
                    .active_rows()
                    .filter_map(|row| row.cell(&mapping.original_header))
                    .filter_map(CellValue::as_number)
                    .collect();
                let mean = if values.is_empty() {
                    None
                } else {
                    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
                };
                ScaleMean {
                    header: mapping.original_header.clone(),
                    variable_code: mapping.variable_code.clone(),
                    mean,
                    answered: values.len(),
                }
            })
            .collect()
    }

    /// Category counts of each demographic column over active rows.
    ///
    /// Values group by their display rendering; absent and blank cells
    /// fall back to the literal [`UNKNOWN_CATEGORY`] label.
    #[must_use]
    pub fn demographic_counts(&self) -> Vec<DemographicBreakdown> {
        self.mappings
            .iter()
            .filter(|mapping| mapping.role == ColumnRole::Demographic)
            .map(|mapping| {
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for row in self.active_rows() {
                    let label = row
                        .cell(&mapping.original_header)
                        .and_then(CellValue::render)
                        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                    *counts.entry(label).or_insert(0) += 1;
                }
                DemographicBreakdown {
                    header: mapping.original_header.clone(),
                    variable_code: mapping.variable_code.clone(),
                    counts,
                }
            })
            .collect()
    }
}

/// Row counts per screening status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub clean: usize,
    pub flagged: usize,
    pub excluded: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.clean + self.flagged + self.excluded
    }
}

/// Display mean of one scale column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleMean {
    pub header: String,
    pub variable_code: String,
    /// Rounded to two decimal places; `None` when no value coerced.
    pub mean: Option<f64>,
    /// How many active rows contributed a numeric answer.
    pub answered: usize,
}

/// Category counts of one demographic column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicBreakdown {
    pub header: String,
    pub variable_code: String,
    pub counts: BTreeMap<String, usize>,
}
