//! Screening thresholds.

/// Fewest numeric scale answers a row must carry before the
/// straightlining check is evaluated at all. Short instruments produce
/// too few points to judge response variability.
pub const DEFAULT_MIN_SCALE_ITEMS: usize = 5;
/// Population variance below this reads as invariant responding.
pub const DEFAULT_VARIANCE_THRESHOLD: f64 = 0.2;
/// Responses completed faster than this many seconds count as speeding.
pub const DEFAULT_MIN_DURATION_SECS: f64 = 60.0;

/// Thresholds applied by the row quality analyzer.
///
/// The defaults suit a typical multi-item Likert survey. They are proxies
/// for inattentive responding, not formal statistics, and a caller may
/// loosen or tighten them per dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenConfig {
    /// Minimum collected scale values before straightlining is judged.
    pub min_scale_items: usize,
    /// Strict upper bound on population variance for a straightlining flag.
    pub variance_threshold: f64,
    /// Strict lower bound on plausible completion time in seconds.
    pub min_duration_secs: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            min_scale_items: DEFAULT_MIN_SCALE_ITEMS,
            variance_threshold: DEFAULT_VARIANCE_THRESHOLD,
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_thresholds() {
        let config = ScreenConfig::default();
        assert_eq!(config.min_scale_items, 5);
        assert_eq!(config.variance_threshold, 0.2);
        assert_eq!(config.min_duration_secs, 60.0);
    }
}
