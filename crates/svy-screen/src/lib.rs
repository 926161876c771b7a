pub mod analyze;
pub mod config;

pub use analyze::analyze_row;
pub use config::{
    DEFAULT_MIN_DURATION_SECS, DEFAULT_MIN_SCALE_ITEMS, DEFAULT_VARIANCE_THRESHOLD, ScreenConfig,
};
