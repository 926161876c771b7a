//! Integration tests for the pipeline module.

use std::fs;

use tempfile::TempDir;

use svy_cli::pipeline::{parse_code_override, parse_role_override, stage_with_overrides};
use svy_ingest::{decode_csv_bytes, read_csv_table};
use svy_model::ColumnRole;
use svy_project::{Session, SessionEvent};

const EXPORT: &[u8] =
    "問卷編號,填答時間 (秒),性別,Q1,Q2\nRES_1001,180,男,4,5\nRES_1002,30,女,3,3\n".as_bytes();

#[test]
fn parse_role_override_accepts_any_case() {
    let parsed = parse_role_override("性別=Meta").expect("parse");
    assert_eq!(parsed.header, "性別");
    assert_eq!(parsed.role, ColumnRole::Meta);

    let parsed = parse_role_override(" Q1 =scale").expect("parse with spaces");
    assert_eq!(parsed.header, "Q1");
    assert_eq!(parsed.role, ColumnRole::Scale);
}

#[test]
fn parse_role_override_rejects_malformed_values() {
    let err = parse_role_override("Q1").expect_err("missing separator");
    assert!(err.contains("HEADER=ROLE"));

    let err = parse_role_override("=scale").expect_err("blank header");
    assert!(err.contains("HEADER=ROLE"));

    assert!(parse_role_override("Q1=chart").is_err());
}

#[test]
fn parse_code_override_trims_the_code() {
    let parsed = parse_code_override("性別= SEX ").expect("parse");
    assert_eq!(parsed.header, "性別");
    assert_eq!(parsed.code, "SEX");

    let err = parse_code_override("性別=   ").expect_err("blank code");
    assert!(err.contains("blank"));
}

#[test]
fn staged_overrides_reach_the_draft() {
    let table = decode_csv_bytes(EXPORT).expect("decode");
    let mut session = Session::default();
    let event = stage_with_overrides(
        &mut session,
        "export.csv",
        table,
        &[parse_role_override("Q1=scale").expect("role override")],
        &[parse_code_override("性別=SEX").expect("code override")],
    )
    .expect("stage");
    assert_eq!(event, SessionEvent::ImportStaged { columns: 5, rows: 2 });

    let staged = session.staged().expect("staged");
    assert_eq!(staged.draft().get("Q1").expect("q1").role, ColumnRole::Scale);
    assert_eq!(
        staged.draft().get("性別").expect("gender").variable_code,
        "SEX"
    );
    // untouched columns keep their inferred mapping
    assert_eq!(
        staged.draft().get("問卷編號").expect("id").variable_code,
        "ID"
    );
}

#[test]
fn override_for_an_unknown_header_fails() {
    let table = decode_csv_bytes(EXPORT).expect("decode");
    let mut session = Session::default();
    let err = stage_with_overrides(
        &mut session,
        "export.csv",
        table,
        &[parse_role_override("Missing=scale").expect("parse")],
        &[],
    )
    .expect_err("unknown header");
    assert!(format!("{err:#}").contains("Missing"));
}

#[test]
fn staging_reads_a_file_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).expect("write export");

    let table = read_csv_table(&path).expect("read");
    let mut session = Session::default();
    stage_with_overrides(&mut session, "export.csv", table, &[], &[]).expect("stage");
    assert_eq!(session.staged().expect("staged").row_count(), 2);
}
