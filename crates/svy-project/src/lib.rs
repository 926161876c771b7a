//! Project state machine for survey response screening.
//!
//! Owns the committed dataset and the session workflow around it: staging
//! a decoded file, tuning the inferred mapping, committing with per-row
//! screening, excluding rows, and serializing the screening report.

pub mod error;
pub mod report;
pub mod session;
pub mod state;

pub use error::{ProjectError, Result};
pub use report::{
    RELIABILITY_ALPHA_PLACEHOLDER, RowSummaryJson, ScreeningReportPayload, build_screening_report,
    write_screening_report_json,
};
pub use session::{Session, SessionAction, SessionEvent, SessionPhase, StagedImport};
pub use state::{
    DemographicBreakdown, ProjectState, ScaleMean, StatusCounts, UNKNOWN_CATEGORY,
};
