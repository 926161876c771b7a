//! Column role inference.
//!
//! Guesses a semantic role and variable code for each source column from
//! its header text. The rules are deliberately loose substring matches so
//! that common survey-tool exports (English and Traditional Chinese) land
//! on a sensible default; the result is a starting point the user can
//! override per column before committing, never ground truth.

use svy_model::{AGE_CODE, ColumnMapping, ColumnRole, DURATION_CODE, GENDER_CODE, ID_CODE};

/// Substring cues for elapsed-time columns. Checked before every other
/// rule so "Response ID Time" classifies as duration, not identifier.
const DURATION_CUES: [&str; 5] = ["time", "duration", "seconds", "時間", "秒"];
/// Substring cues for respondent or device identifier columns.
const ID_CUES: [&str; 3] = ["id", "ip", "編號"];
/// Substring cues for demographic columns.
const DEMOGRAPHIC_CUES: [&str; 5] = ["gender", "age", "sex", "性別", "年齡"];
/// Demographic cues that indicate gender rather than age.
const GENDER_CUES: [&str; 3] = ["gender", "sex", "性別"];

/// Headers longer than this many characters are presumed to be scale
/// items. Long question text usually means a Likert item; short scale
/// items and long demographic questions will misclassify and need a
/// manual edit.
const SCALE_HEADER_MIN_CHARS: usize = 15;

fn contains_any(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower.contains(cue))
}

fn infer_one(header: &str, index: usize) -> ColumnMapping {
    let lower = header.to_lowercase();
    if contains_any(&lower, &DURATION_CUES) {
        return ColumnMapping::new(header, DURATION_CODE, ColumnRole::Meta);
    }
    if contains_any(&lower, &ID_CUES) {
        return ColumnMapping::new(header, ID_CODE, ColumnRole::Meta);
    }
    if contains_any(&lower, &DEMOGRAPHIC_CUES) {
        let code = if contains_any(&lower, &GENDER_CUES) {
            GENDER_CODE
        } else {
            AGE_CODE
        };
        return ColumnMapping::new(header, code, ColumnRole::Demographic);
    }
    let role = if header.chars().count() > SCALE_HEADER_MIN_CHARS {
        ColumnRole::Scale
    } else {
        ColumnRole::Ignore
    };
    ColumnMapping::new(header, format!("VAR_{}", index + 1), role)
}

/// Infers one [`ColumnMapping`] per header, in header order.
///
/// Total function: every header classifies, unmatched ones fall through to
/// [`ColumnRole::Ignore`] with a positional `VAR_<n>` code. Header length
/// is counted in characters so CJK question text measures the same as its
/// Latin equivalent.
#[must_use]
pub fn infer_mappings(headers: &[String]) -> Vec<ColumnMapping> {
    let mappings: Vec<ColumnMapping> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| infer_one(header, index))
        .collect();
    tracing::debug!(
        columns = mappings.len(),
        scale = mappings
            .iter()
            .filter(|m| m.role == ColumnRole::Scale)
            .count(),
        "inferred column roles"
    );
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer_single(header: &str) -> ColumnMapping {
        infer_mappings(&[header.to_string()])
            .pop()
            .expect("one mapping")
    }

    #[test]
    fn classifies_the_usability_survey_headers() {
        let headers: Vec<String> = [
            "問卷編號",
            "填答時間 (秒)",
            "性別",
            "Q1. 我覺得這個系統很有用",
            "Q2. 使用這個系統能提高我的效率",
            "Q3. 我打算繼續使用這個系統",
        ]
        .map(String::from)
        .to_vec();
        let mappings = infer_mappings(&headers);

        assert_eq!(mappings[0].role, ColumnRole::Meta);
        assert_eq!(mappings[0].variable_code, "ID");
        assert_eq!(mappings[1].role, ColumnRole::Meta);
        assert_eq!(mappings[1].variable_code, "DURATION");
        assert_eq!(mappings[2].role, ColumnRole::Demographic);
        assert_eq!(mappings[2].variable_code, "GENDER");
        // 14 chars: short of the scale threshold.
        assert_eq!(mappings[3].role, ColumnRole::Ignore);
        assert_eq!(mappings[3].variable_code, "VAR_4");
        // 17 chars: over the threshold.
        assert_eq!(mappings[4].role, ColumnRole::Scale);
        assert_eq!(mappings[4].variable_code, "VAR_5");
        // Exactly 15 chars: threshold is strictly greater-than.
        assert_eq!(mappings[5].role, ColumnRole::Ignore);
        assert_eq!(mappings[5].variable_code, "VAR_6");
    }

    #[test]
    fn duration_outranks_identifier() {
        let mapping = infer_single("Response ID Time");
        assert_eq!(mapping.role, ColumnRole::Meta);
        assert_eq!(mapping.variable_code, "DURATION");
    }

    #[test]
    fn sex_headers_map_to_gender() {
        let mapping = infer_single("Sex");
        assert_eq!(mapping.role, ColumnRole::Demographic);
        assert_eq!(mapping.variable_code, "GENDER");
    }

    #[test]
    fn age_headers_map_to_age() {
        for header in ["Age (years)", "年齡"] {
            let mapping = infer_single(header);
            assert_eq!(mapping.role, ColumnRole::Demographic);
            assert_eq!(mapping.variable_code, "AGE");
        }
    }

    #[test]
    fn cue_matching_ignores_case() {
        let mapping = infer_single("TOTAL DURATION");
        assert_eq!(mapping.variable_code, "DURATION");
        let mapping = infer_single("Respondent ID");
        assert_eq!(mapping.variable_code, "ID");
    }

    #[test]
    fn length_threshold_counts_characters_not_bytes() {
        // 12 CJK chars: 36 bytes but still under the threshold.
        let mapping = infer_single("這個標題沒有任何提示字眼");
        assert_eq!(mapping.role, ColumnRole::Ignore);
        // 16 chars tips over.
        let mapping = infer_single("zzzzzzzzzzzzzzzz");
        assert_eq!(mapping.role, ColumnRole::Scale);
    }

    #[test]
    fn positional_codes_are_one_based() {
        let headers: Vec<String> = ["first", "second"].map(String::from).to_vec();
        let mappings = infer_mappings(&headers);
        assert_eq!(mappings[0].variable_code, "VAR_1");
        assert_eq!(mappings[1].variable_code, "VAR_2");
    }
}
