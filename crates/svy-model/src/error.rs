use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid row id '{0}': expected 32 hex characters")]
    InvalidRowId(String),
    #[error("unknown column role '{0}': expected demographic, scale, meta, or ignore")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
