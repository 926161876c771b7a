use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use svy_cli::logging::redact_value;
use svy_cli::pipeline::stage_with_overrides;
use svy_cli::summary::respondent_label;
use svy_cli::types::{MappingReview, SampleResult, ScreenResult};
use svy_ingest::{read_csv_table, write_sample_csv};
use svy_project::{Session, SessionAction, SessionEvent, write_screening_report_json};
use svy_screen::ScreenConfig;

use crate::cli::{MappingArgs, SampleArgs, ScreenArgs};

pub fn run_screen(args: &ScreenArgs) -> Result<ScreenResult> {
    let source = source_label(&args.file);
    let decode_start = Instant::now();
    let table = info_span!("decode", source = %source)
        .in_scope(|| read_csv_table(&args.file))
        .with_context(|| format!("read survey export {}", args.file.display()))?;
    info!(
        source = %source,
        columns = table.headers.len(),
        rows = table.rows.len(),
        duration_ms = decode_start.elapsed().as_millis(),
        "decode complete"
    );

    let mut config = ScreenConfig::default();
    if let Some(min_duration) = args.min_duration {
        config.min_duration_secs = min_duration;
    }

    let mut session = Session::new(config);
    let screen_span = info_span!("screen", source = %source);
    let screen_start = Instant::now();
    let (total, flagged, newly_excluded) = screen_span.in_scope(|| -> Result<_> {
        stage_with_overrides(&mut session, source.clone(), table, &args.roles, &args.codes)?;
        session
            .apply(SessionAction::ConfirmImport)
            .context("commit import")?;

        let mut total = 0;
        let mut flagged = 0;
        if let Some(state) = session.project() {
            let counts = state.status_counts();
            total = counts.total();
            flagged = counts.flagged;
            for row in state.rows().iter().filter(|row| row.is_flagged()) {
                let respondent = respondent_label(state, row);
                debug!(
                    row = %row.id,
                    respondent = %redact_value(&respondent),
                    flags = ?row.flags,
                    "row flagged"
                );
            }
        }

        let newly_excluded = if args.exclude_flagged {
            match session
                .apply(SessionAction::ExcludeFlagged)
                .context("exclude flagged rows")?
            {
                SessionEvent::FlaggedExcluded { newly_excluded } => newly_excluded,
                _ => 0,
            }
        } else {
            0
        };
        session
            .apply(SessionAction::AdvanceToDashboard)
            .context("advance to dashboard")?;
        Ok((total, flagged, newly_excluded))
    })?;
    info!(
        source = %source,
        total,
        flagged,
        excluded = newly_excluded,
        duration_ms = screen_start.elapsed().as_millis(),
        "screening complete"
    );

    let report_path = match &args.report {
        Some(dir) => {
            let state = session
                .project()
                .ok_or_else(|| anyhow!("project state missing after commit"))?;
            let path = info_span!("report", source = %source)
                .in_scope(|| write_screening_report_json(dir, state))
                .context("write screening report")?;
            Some(path)
        }
        None => None,
    };

    Ok(ScreenResult {
        source,
        session,
        newly_excluded,
        report_path,
    })
}

pub fn run_mapping(args: &MappingArgs) -> Result<MappingReview> {
    let source = source_label(&args.file);
    let table = info_span!("decode", source = %source)
        .in_scope(|| read_csv_table(&args.file))
        .with_context(|| format!("read survey export {}", args.file.display()))?;
    let rows = table.rows.len();

    let mut session = Session::default();
    stage_with_overrides(&mut session, source.clone(), table, &args.roles, &args.codes)?;
    let staged = session
        .staged()
        .ok_or_else(|| anyhow!("nothing staged after import"))?;
    Ok(MappingReview {
        source,
        rows,
        mappings: staged.draft().mappings().to_vec(),
        role_counts: staged.draft().role_counts(),
    })
}

pub fn run_sample(args: &SampleArgs) -> Result<SampleResult> {
    let table = info_span!("sample", path = %args.path.display())
        .in_scope(|| write_sample_csv(&args.path, args.rows, args.seed))
        .with_context(|| format!("write sample dataset {}", args.path.display()))?;
    Ok(SampleResult {
        path: args.path.clone(),
        rows: table.rows.len(),
        seed: args.seed,
    })
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| path.display().to_string(), ToString::to_string)
}
