//! Pre-commit mapping edits.
//!
//! Between inference and commit the mapping is a draft the user may
//! hand-tune. [`MappingDraft`] is that editable surface: role and code
//! edits address columns by exact header, and the draft converts into the
//! final mapping sequence once the import is confirmed.

use svy_model::{ColumnMapping, ColumnRole};

use crate::error::{MapError, Result};
use crate::infer::infer_mappings;

/// An editable column mapping awaiting import confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDraft {
    mappings: Vec<ColumnMapping>,
}

impl MappingDraft {
    /// Starts a draft by running inference over `headers`.
    #[must_use]
    pub fn from_headers(headers: &[String]) -> Self {
        Self {
            mappings: infer_mappings(headers),
        }
    }

    /// Wraps an existing mapping sequence, keeping its order.
    #[must_use]
    pub fn from_mappings(mappings: Vec<ColumnMapping>) -> Self {
        Self { mappings }
    }

    /// Current mappings in header order.
    #[must_use]
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Looks up the mapping for `header`, matched case-sensitively.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&ColumnMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.original_header == header)
    }

    /// Reassigns the role of every column bearing `header`.
    ///
    /// Headers are unique in well-formed exports, so "every" is normally
    /// one column; duplicated headers share a single edit.
    pub fn set_role(&mut self, header: &str, role: ColumnRole) -> Result<()> {
        let mut edited = false;
        for mapping in &mut self.mappings {
            if mapping.original_header == header {
                mapping.role = role;
                edited = true;
            }
        }
        if edited {
            tracing::debug!(header, role = %role, "mapping role edited");
            Ok(())
        } else {
            Err(MapError::UnknownHeader {
                header: header.to_string(),
            })
        }
    }

    /// Reassigns the variable code of every column bearing `header`.
    ///
    /// Codes are free identifiers with no uniqueness requirement, but a
    /// blank code would make the column unaddressable and is rejected.
    pub fn set_code(&mut self, header: &str, code: &str) -> Result<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(MapError::BlankCode {
                header: header.to_string(),
            });
        }
        let mut edited = false;
        for mapping in &mut self.mappings {
            if mapping.original_header == header {
                mapping.variable_code = code.to_string();
                edited = true;
            }
        }
        if edited {
            tracing::debug!(header, code, "mapping code edited");
            Ok(())
        } else {
            Err(MapError::UnknownHeader {
                header: header.to_string(),
            })
        }
    }

    /// Summary counts per role for review displays.
    #[must_use]
    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for mapping in &self.mappings {
            match mapping.role {
                ColumnRole::Demographic => counts.demographic += 1,
                ColumnRole::Scale => counts.scale += 1,
                ColumnRole::Meta => counts.meta += 1,
                ColumnRole::Ignore => counts.ignore += 1,
            }
        }
        counts
    }

    /// Finalizes the draft into the mapping sequence handed to commit.
    #[must_use]
    pub fn into_mappings(self) -> Vec<ColumnMapping> {
        self.mappings
    }
}

/// Per-role column counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub demographic: usize,
    pub scale: usize,
    pub meta: usize,
    pub ignore: usize,
}

impl RoleCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.demographic + self.scale + self.meta + self.ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MappingDraft {
        let headers: Vec<String> = ["問卷編號", "填答時間 (秒)", "性別", "short"]
            .map(String::from)
            .to_vec();
        MappingDraft::from_headers(&headers)
    }

    #[test]
    fn set_role_edits_the_named_column() {
        let mut draft = draft();
        draft
            .set_role("short", ColumnRole::Scale)
            .expect("edit role");
        assert_eq!(draft.get("short").expect("mapping").role, ColumnRole::Scale);
    }

    #[test]
    fn set_role_rejects_unknown_headers() {
        let mut draft = draft();
        let err = draft
            .set_role("不存在", ColumnRole::Scale)
            .expect_err("unknown header");
        assert_eq!(
            err,
            MapError::UnknownHeader {
                header: "不存在".to_string()
            }
        );
    }

    #[test]
    fn set_code_trims_and_rejects_blank() {
        let mut draft = draft();
        draft.set_code("short", "  Q9  ").expect("edit code");
        assert_eq!(draft.get("short").expect("mapping").variable_code, "Q9");
        let err = draft.set_code("short", "   ").expect_err("blank code");
        assert!(matches!(err, MapError::BlankCode { .. }));
    }

    #[test]
    fn header_matching_is_case_sensitive() {
        let mut draft = draft();
        assert!(draft.set_role("SHORT", ColumnRole::Scale).is_err());
    }

    #[test]
    fn role_counts_cover_every_column() {
        let counts = draft().role_counts();
        assert_eq!(counts.meta, 2);
        assert_eq!(counts.demographic, 1);
        assert_eq!(counts.ignore, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn duplicate_headers_share_one_edit() {
        let headers: Vec<String> = ["twin", "twin"].map(String::from).to_vec();
        let mut draft = MappingDraft::from_headers(&headers);
        draft.set_role("twin", ColumnRole::Meta).expect("edit role");
        assert!(
            draft
                .mappings()
                .iter()
                .all(|mapping| mapping.role == ColumnRole::Meta)
        );
    }
}
