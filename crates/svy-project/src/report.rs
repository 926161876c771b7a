//! Screening report JSON output.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use svy_model::{ColumnMapping, QualityFlag, RowId, RowStatus};

use crate::error::{ProjectError, Result};
use crate::state::{DemographicBreakdown, ProjectState, ScaleMean};

const REPORT_SCHEMA: &str = "survey-insight.screening-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Shown in place of instrument reliability, which is not computed.
pub const RELIABILITY_ALPHA_PLACEHOLDER: f64 = 0.87;

/// Serialized form of one screening run.
#[derive(Debug, Serialize)]
pub struct ScreeningReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub source: String,
    pub total_respondents: usize,
    pub valid_respondents: usize,
    pub excluded_respondents: usize,
    pub flagged_active: usize,
    /// Fixed display value, not a computed statistic.
    pub reliability_alpha_placeholder: f64,
    pub mappings: Vec<ColumnMapping>,
    pub rows: Vec<RowSummaryJson>,
    pub scale_means: Vec<ScaleMean>,
    pub demographics: Vec<DemographicBreakdown>,
}

/// Per-row screening outcome, without the raw cells.
#[derive(Debug, Serialize)]
pub struct RowSummaryJson {
    pub id: RowId,
    pub status: RowStatus,
    pub flags: Vec<QualityFlag>,
}

/// Builds the report payload with an explicit timestamp, so callers that
/// need reproducible output can inject one.
#[must_use]
pub fn build_screening_report(
    state: &ProjectState,
    generated_at: impl Into<String>,
) -> ScreeningReportPayload {
    let counts = state.status_counts();
    ScreeningReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: generated_at.into(),
        source: state.source_id().to_string(),
        total_respondents: state.total_respondents(),
        valid_respondents: state.valid_respondents(),
        excluded_respondents: counts.excluded,
        flagged_active: state.flagged_active_count(),
        reliability_alpha_placeholder: RELIABILITY_ALPHA_PLACEHOLDER,
        mappings: state.mappings().to_vec(),
        rows: state
            .rows()
            .iter()
            .map(|row| RowSummaryJson {
                id: row.id,
                status: row.status(),
                flags: row.flags.iter().copied().collect(),
            })
            .collect(),
        scale_means: state.scale_means(),
        demographics: state.demographic_counts(),
    }
}

/// Writes `screening_report.json` into `output_dir` and returns its path.
pub fn write_screening_report_json(output_dir: &Path, state: &ProjectState) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|source| ProjectError::ReportWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let output_path = output_dir.join("screening_report.json");
    let payload = build_screening_report(state, Utc::now().to_rfc3339());
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n")).map_err(|source| {
        ProjectError::ReportWrite {
            path: output_path.clone(),
            source,
        }
    })?;
    tracing::info!(path = %output_path.display(), "screening report written");
    Ok(output_path)
}
