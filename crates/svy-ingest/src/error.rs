//! Error types for survey data decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding an uploaded dataset.
#[derive(Debug, Error)]
pub enum DecodeError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file contents.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Byte stream is not parseable as CSV.
    #[error("not a parseable CSV stream: {message}")]
    Malformed { message: String },

    /// Byte stream uses an encoding the decoder does not accept.
    #[error("unsupported text encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    /// No header row could be found in the stream.
    #[error("no header row found")]
    MissingHeader,

    /// A header cell between named columns is blank.
    #[error("blank header name at column {position}")]
    BlankHeader { position: usize },
}

impl From<csv::Error> for DecodeError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::FileNotFound {
            path: PathBuf::from("/path/to/responses.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/responses.csv");
    }

    #[test]
    fn test_error_from_csv() {
        let csv_err = csv::ReaderBuilder::new()
            .from_reader(&b"a,b\n1,2,3\n"[..])
            .into_records()
            .next()
            .expect("one record")
            .unwrap_err();
        let decode_err: DecodeError = csv_err.into();
        assert!(matches!(decode_err, DecodeError::Malformed { .. }));
    }
}
