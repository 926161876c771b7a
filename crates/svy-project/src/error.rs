//! Error types for project state transitions.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionPhase;

/// Errors that can occur while importing, screening, or reporting.
#[derive(Debug, Error)]
pub enum ProjectError {
    // === Import Errors ===
    /// Decoded dataset carried a header but zero response rows.
    #[error("file contains no response rows")]
    EmptyImport,

    /// Action needed a staged import and none exists.
    #[error("no staged import; select a file first")]
    NoStagedImport,

    /// Action needed a committed project and none exists.
    #[error("no committed project; confirm an import first")]
    NoProject,

    // === Session Errors ===
    /// Action arrived outside the phase that permits it.
    #[error("'{action}' is not available during the {phase} phase")]
    InvalidInPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    /// Row addressed by an id the project does not contain.
    #[error("no row with id {id}")]
    UnknownRow { id: String },

    /// Mapping edit failed.
    #[error(transparent)]
    Map(#[from] svy_map::MapError),

    // === Report Errors ===
    /// Failed to write the screening report.
    #[error("failed to write screening report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the screening report payload.
    #[error("failed to encode screening report: {source}")]
    ReportEncode {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
