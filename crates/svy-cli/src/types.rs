use std::path::PathBuf;

use svy_map::RoleCounts;
use svy_model::ColumnMapping;
use svy_project::Session;

/// Outcome of a full `screen` run. The session ends in the dashboard
/// phase and carries the committed project.
#[derive(Debug)]
pub struct ScreenResult {
    pub source: String,
    pub session: Session,
    pub newly_excluded: usize,
    pub report_path: Option<PathBuf>,
}

/// Outcome of a `mapping` run: the inferred draft, with any overrides
/// applied, before anything is committed.
#[derive(Debug)]
pub struct MappingReview {
    pub source: String,
    pub rows: usize,
    pub mappings: Vec<ColumnMapping>,
    pub role_counts: RoleCounts,
}

/// Outcome of a `sample` run.
#[derive(Debug)]
pub struct SampleResult {
    pub path: PathBuf,
    pub rows: usize,
    pub seed: u64,
}
