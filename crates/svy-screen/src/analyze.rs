//! Row quality analysis.
//!
//! Pure screening of one response row against its column mapping. Two
//! checks run today: straightlining over scale items and speeding over
//! the duration column. [`QualityFlag::MissingData`] exists in the flag
//! taxonomy but no current check raises it.
//!
//! Cells that fail numeric coercion are skipped, never zero-filled and
//! never an error; a dirty cell degrades that one value, not the row or
//! the batch.

use std::collections::{BTreeMap, BTreeSet};

use svy_model::{CellValue, ColumnMapping, ColumnRole, DURATION_CODE, QualityFlag};

use crate::config::ScreenConfig;

/// Screens one row, returning its quality flags.
///
/// Deterministic in its inputs. An empty set means the row is clean.
#[must_use]
pub fn analyze_row(
    cells: &BTreeMap<String, CellValue>,
    mappings: &[ColumnMapping],
    config: &ScreenConfig,
) -> BTreeSet<QualityFlag> {
    let mut flags = BTreeSet::new();
    if is_straightlining(cells, mappings, config) {
        flags.insert(QualityFlag::Straightlining);
    }
    if is_speeder(cells, mappings, config) {
        flags.insert(QualityFlag::Speeder);
    }
    flags
}

/// Collects the numeric answers of every scale column present on the row
/// and judges their variability. Fewer collected values than
/// `min_scale_items` never raises the flag.
fn is_straightlining(
    cells: &BTreeMap<String, CellValue>,
    mappings: &[ColumnMapping],
    config: &ScreenConfig,
) -> bool {
    let scale_values: Vec<f64> = mappings
        .iter()
        .filter(|mapping| mapping.role == ColumnRole::Scale)
        .filter_map(|mapping| cells.get(mapping.original_header.as_str()))
        .filter_map(CellValue::as_number)
        .collect();
    if scale_values.is_empty() || scale_values.len() < config.min_scale_items {
        return false;
    }
    let all_same = scale_values
        .windows(2)
        .all(|pair| pair[0] == pair[1]);
    all_same || population_variance(&scale_values) < config.variance_threshold
}

/// The first mapping coded `DURATION` drives the check. No duration
/// column, or a duration that fails numeric coercion, means no flag.
fn is_speeder(
    cells: &BTreeMap<String, CellValue>,
    mappings: &[ColumnMapping],
    config: &ScreenConfig,
) -> bool {
    let Some(duration_mapping) = mappings
        .iter()
        .find(|mapping| mapping.variable_code == DURATION_CODE)
    else {
        return false;
    };
    cells
        .get(duration_mapping.original_header.as_str())
        .and_then(CellValue::as_number)
        .is_some_and(|duration| duration < config.min_duration_secs)
}

/// Mean of squared deviations with divisor `count`, not `count - 1`.
fn population_variance(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use svy_model::CellValue;

    fn scale_mappings(count: usize) -> Vec<ColumnMapping> {
        (1..=count)
            .map(|i| ColumnMapping::new(format!("Q{i}"), format!("VAR_{i}"), ColumnRole::Scale))
            .collect()
    }

    fn scale_cells(values: &[f64]) -> BTreeMap<String, CellValue> {
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| (format!("Q{}", idx + 1), CellValue::Number(*value)))
            .collect()
    }

    fn duration_mapping() -> Vec<ColumnMapping> {
        vec![ColumnMapping::new(
            "填答時間 (秒)",
            DURATION_CODE,
            ColumnRole::Meta,
        )]
    }

    fn duration_cells(value: CellValue) -> BTreeMap<String, CellValue> {
        let mut cells = BTreeMap::new();
        cells.insert("填答時間 (秒)".to_string(), value);
        cells
    }

    #[test]
    fn population_variance_matches_hand_computation() {
        let variance = population_variance(&[3.0, 3.0, 3.0, 4.0, 3.0]);
        assert!((variance - 0.16).abs() < 1e-9);
    }

    #[test]
    fn three_identical_answers_are_too_few_to_flag() {
        let flags = analyze_row(
            &scale_cells(&[4.0, 4.0, 4.0]),
            &scale_mappings(3),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn five_identical_answers_flag_straightlining() {
        let flags = analyze_row(
            &scale_cells(&[4.0; 5]),
            &scale_mappings(5),
            &ScreenConfig::default(),
        );
        assert!(flags.contains(&QualityFlag::Straightlining));
    }

    #[test]
    fn near_identical_answers_flag_on_low_variance() {
        // Variance 0.16, under the 0.2 threshold without being all-equal.
        let flags = analyze_row(
            &scale_cells(&[3.0, 3.0, 3.0, 4.0, 3.0]),
            &scale_mappings(5),
            &ScreenConfig::default(),
        );
        assert!(flags.contains(&QualityFlag::Straightlining));
    }

    #[test]
    fn moderate_variance_does_not_flag() {
        // Variance 0.24.
        let flags = analyze_row(
            &scale_cells(&[1.0, 1.0, 1.0, 2.0, 2.0]),
            &scale_mappings(5),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn dirty_scale_cells_are_skipped_not_zeroed() {
        // Four numeric answers plus one non-numeric: below the minimum,
        // so no judgement is made.
        let mut cells = scale_cells(&[4.0, 4.0, 4.0, 4.0]);
        cells.insert("Q5".to_string(), CellValue::Text("n/a".to_string()));
        let flags = analyze_row(&cells, &scale_mappings(5), &ScreenConfig::default());
        assert!(flags.is_empty());
    }

    #[test]
    fn fast_numeric_duration_flags_speeder() {
        let flags = analyze_row(
            &duration_cells(CellValue::Number(45.0)),
            &duration_mapping(),
            &ScreenConfig::default(),
        );
        assert_eq!(flags.len(), 1);
        assert!(flags.contains(&QualityFlag::Speeder));
    }

    #[test]
    fn numeric_text_duration_coerces_and_flags() {
        let flags = analyze_row(
            &duration_cells(CellValue::Text("45".to_string())),
            &duration_mapping(),
            &ScreenConfig::default(),
        );
        assert!(flags.contains(&QualityFlag::Speeder));
    }

    #[test]
    fn unparseable_duration_fails_silently() {
        let flags = analyze_row(
            &duration_cells(CellValue::Text("45 sec".to_string())),
            &duration_mapping(),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn plausible_duration_does_not_flag() {
        let flags = analyze_row(
            &duration_cells(CellValue::Number(90.0)),
            &duration_mapping(),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn speeder_check_skips_rows_without_a_duration_mapping() {
        let flags = analyze_row(
            &duration_cells(CellValue::Number(5.0)),
            &scale_mappings(1),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn exactly_the_threshold_is_not_speeding() {
        let flags = analyze_row(
            &duration_cells(CellValue::Number(60.0)),
            &duration_mapping(),
            &ScreenConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn analysis_is_pure() {
        let mut mappings = scale_mappings(5);
        mappings.extend(duration_mapping());
        let mut cells = scale_cells(&[2.0, 2.0, 2.0, 2.0, 2.0]);
        cells.insert("填答時間 (秒)".to_string(), CellValue::Number(30.0));
        let config = ScreenConfig::default();
        let first = analyze_row(&cells, &mappings, &config);
        let second = analyze_row(&cells, &mappings, &config);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
