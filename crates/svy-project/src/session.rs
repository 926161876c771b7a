//! Session reducer.
//!
//! One controller owns the whole application state and updates it through
//! [`SessionAction`] values; readers only ever see the state through
//! shared references. Phases gate which actions apply, mirroring the
//! import, cleaning, and dashboard steps a user walks through in order.

use std::collections::BTreeMap;
use std::fmt;

use svy_map::MappingDraft;
use svy_model::{CellValue, ColumnRole, RowId};
use svy_screen::ScreenConfig;

use crate::error::{ProjectError, Result};
use crate::state::ProjectState;

/// Where the session currently is in the screening workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Selecting a file and reviewing the inferred mapping.
    Import,
    /// Project committed; reviewing flags and excluding rows.
    Cleaning,
    /// Aggregate view; exclusions remain available.
    Dashboard,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Cleaning => "cleaning",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decoded dataset waiting for the user to confirm the import.
///
/// Re-selecting a file replaces the whole staged value, last write wins.
/// Nothing here touches the committed project until confirmation.
#[derive(Debug, Clone)]
pub struct StagedImport {
    source: String,
    rows: Vec<BTreeMap<String, CellValue>>,
    draft: MappingDraft,
}

impl StagedImport {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn draft(&self) -> &MappingDraft {
        &self.draft
    }
}

/// Every state transition the session supports.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Stage a decoded dataset and infer its mapping.
    StageImport {
        source: String,
        headers: Vec<String>,
        rows: Vec<BTreeMap<String, CellValue>>,
    },
    /// Reassign the role of a staged column.
    EditMappingRole { header: String, role: ColumnRole },
    /// Reassign the variable code of a staged column.
    EditMappingCode { header: String, code: String },
    /// Drop the staged dataset without committing.
    DiscardStaged,
    /// Commit the staged dataset: screen rows, assign ids, move on.
    ConfirmImport,
    /// Exclude one row by id.
    ExcludeRow { id: RowId },
    /// Exclude every active row that carries a flag.
    ExcludeFlagged,
    /// Move from cleaning to the dashboard.
    AdvanceToDashboard,
    /// Drop everything and return to import.
    Reset,
}

impl SessionAction {
    fn name(&self) -> &'static str {
        match self {
            Self::StageImport { .. } => "stage-import",
            Self::EditMappingRole { .. } => "edit-mapping-role",
            Self::EditMappingCode { .. } => "edit-mapping-code",
            Self::DiscardStaged => "discard-staged",
            Self::ConfirmImport => "confirm-import",
            Self::ExcludeRow { .. } => "exclude-row",
            Self::ExcludeFlagged => "exclude-flagged",
            Self::AdvanceToDashboard => "advance-to-dashboard",
            Self::Reset => "reset",
        }
    }
}

/// What an applied action did, for callers that report progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ImportStaged { columns: usize, rows: usize },
    MappingEdited,
    StagedDiscarded,
    ImportCommitted { total: usize, flagged: usize },
    RowExcluded { newly_excluded: bool },
    FlaggedExcluded { newly_excluded: usize },
    AdvancedToDashboard,
    SessionReset,
}

/// The single owner of project state for one user session.
///
/// Nothing is persisted; dropping the session discards the project.
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    staged: Option<StagedImport>,
    project: Option<ProjectState>,
    config: ScreenConfig,
}

impl Session {
    #[must_use]
    pub fn new(config: ScreenConfig) -> Self {
        Self {
            phase: SessionPhase::Import,
            staged: None,
            project: None,
            config,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    #[must_use]
    pub fn staged(&self) -> Option<&StagedImport> {
        self.staged.as_ref()
    }

    #[must_use]
    pub fn project(&self) -> Option<&ProjectState> {
        self.project.as_ref()
    }

    /// Applies one action, returning what it did.
    ///
    /// An action outside its phase fails without touching any state; every
    /// successful transition leaves the session in a coherent phase.
    pub fn apply(&mut self, action: SessionAction) -> Result<SessionEvent> {
        let name = action.name();
        match action {
            SessionAction::StageImport {
                source,
                headers,
                rows,
            } => {
                self.require_phase(SessionPhase::Import, name)?;
                let draft = MappingDraft::from_headers(&headers);
                let columns = draft.len();
                let row_count = rows.len();
                let replaced = self.staged.replace(StagedImport {
                    source,
                    rows,
                    draft,
                });
                if replaced.is_some() {
                    tracing::debug!("staged import replaced an earlier selection");
                }
                Ok(SessionEvent::ImportStaged {
                    columns,
                    rows: row_count,
                })
            }
            SessionAction::EditMappingRole { header, role } => {
                self.require_phase(SessionPhase::Import, name)?;
                let staged = self.staged.as_mut().ok_or(ProjectError::NoStagedImport)?;
                staged.draft.set_role(&header, role)?;
                Ok(SessionEvent::MappingEdited)
            }
            SessionAction::EditMappingCode { header, code } => {
                self.require_phase(SessionPhase::Import, name)?;
                let staged = self.staged.as_mut().ok_or(ProjectError::NoStagedImport)?;
                staged.draft.set_code(&header, &code)?;
                Ok(SessionEvent::MappingEdited)
            }
            SessionAction::DiscardStaged => {
                self.require_phase(SessionPhase::Import, name)?;
                if self.staged.take().is_none() {
                    return Err(ProjectError::NoStagedImport);
                }
                Ok(SessionEvent::StagedDiscarded)
            }
            SessionAction::ConfirmImport => {
                self.require_phase(SessionPhase::Import, name)?;
                let staged = self.staged.take().ok_or(ProjectError::NoStagedImport)?;
                if staged.rows.is_empty() {
                    // Keep the staging visible so the failure can be
                    // inspected before another file is chosen.
                    self.staged = Some(staged);
                    return Err(ProjectError::EmptyImport);
                }
                let state = ProjectState::commit(
                    staged.source,
                    staged.rows,
                    staged.draft.into_mappings(),
                    &self.config,
                )?;
                let total = state.total_respondents();
                let flagged = state.status_counts().flagged;
                self.project = Some(state);
                self.phase = SessionPhase::Cleaning;
                Ok(SessionEvent::ImportCommitted { total, flagged })
            }
            SessionAction::ExcludeRow { id } => {
                self.require_committed(name)?;
                let project = self.project.as_mut().ok_or(ProjectError::NoProject)?;
                let newly_excluded = project.exclude_row(id)?;
                Ok(SessionEvent::RowExcluded { newly_excluded })
            }
            SessionAction::ExcludeFlagged => {
                self.require_committed(name)?;
                let project = self.project.as_mut().ok_or(ProjectError::NoProject)?;
                let newly_excluded = project.exclude_flagged();
                Ok(SessionEvent::FlaggedExcluded { newly_excluded })
            }
            SessionAction::AdvanceToDashboard => {
                self.require_phase(SessionPhase::Cleaning, name)?;
                if self.project.is_none() {
                    return Err(ProjectError::NoProject);
                }
                self.phase = SessionPhase::Dashboard;
                Ok(SessionEvent::AdvancedToDashboard)
            }
            SessionAction::Reset => {
                self.phase = SessionPhase::Import;
                self.staged = None;
                self.project = None;
                Ok(SessionEvent::SessionReset)
            }
        }
    }

    fn require_phase(&self, expected: SessionPhase, action: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ProjectError::InvalidInPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Exclusion works against any committed project, dashboard included.
    fn require_committed(&self, action: &'static str) -> Result<()> {
        if matches!(self.phase, SessionPhase::Cleaning | SessionPhase::Dashboard) {
            Ok(())
        } else {
            Err(ProjectError::InvalidInPhase {
                action,
                phase: self.phase,
            })
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScreenConfig::default())
    }
}
