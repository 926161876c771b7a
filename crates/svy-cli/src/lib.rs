//! CLI library components for the survey screening tool.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
