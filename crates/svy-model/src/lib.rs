//! Core data model for survey response screening.
//!
//! Types shared across the ingest, mapping, screening, and project crates:
//! raw cell values, quality flags, column role mappings, and row records
//! with their stable identifiers.

pub mod cell;
pub mod error;
pub mod flag;
pub mod mapping;
pub mod row;

pub use cell::CellValue;
pub use error::ModelError;
pub use flag::QualityFlag;
pub use mapping::{AGE_CODE, ColumnMapping, ColumnRole, DURATION_CODE, GENDER_CODE, ID_CODE};
pub use row::{RowId, RowRecord, RowStatus};
