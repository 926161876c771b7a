//! Error types for mapping edits.

use thiserror::Error;

/// Errors that can occur while hand-tuning an inferred mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// Edit addressed a header the dataset does not have.
    #[error("no column named '{header}' in the imported headers")]
    UnknownHeader { header: String },

    /// Variable codes must carry at least one non-whitespace character.
    #[error("variable code for column '{header}' cannot be blank")]
    BlankCode { header: String },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
