//! Stage helpers shared by the CLI commands.

use anyhow::Context;

use svy_ingest::DecodedTable;
use svy_model::ColumnRole;
use svy_project::{Session, SessionAction, SessionEvent};

/// One `--role HEADER=ROLE` override.
#[derive(Debug, Clone)]
pub struct RoleOverride {
    pub header: String,
    pub role: ColumnRole,
}

/// One `--code HEADER=CODE` override.
#[derive(Debug, Clone)]
pub struct CodeOverride {
    pub header: String,
    pub code: String,
}

/// Parses a `HEADER=ROLE` argument. Used as a clap value parser, so the
/// error text surfaces directly in usage output.
pub fn parse_role_override(value: &str) -> Result<RoleOverride, String> {
    let (header, role) = split_override(value, "HEADER=ROLE")?;
    let role = ColumnRole::parse(role).map_err(|error| error.to_string())?;
    Ok(RoleOverride { header, role })
}

/// Parses a `HEADER=CODE` argument.
pub fn parse_code_override(value: &str) -> Result<CodeOverride, String> {
    let (header, code) = split_override(value, "HEADER=CODE")?;
    let code = code.trim();
    if code.is_empty() {
        return Err("variable code must not be blank".to_string());
    }
    Ok(CodeOverride {
        header,
        code: code.to_string(),
    })
}

fn split_override<'a>(value: &'a str, shape: &str) -> Result<(String, &'a str), String> {
    let Some((header, rest)) = value.split_once('=') else {
        return Err(format!("expected {shape}, got {value:?}"));
    };
    let header = header.trim();
    if header.is_empty() {
        return Err(format!("expected {shape}, got {value:?}"));
    }
    Ok((header.to_string(), rest))
}

/// Stages a decoded table on the session and applies the mapping
/// overrides to the inferred draft, in the order given.
pub fn stage_with_overrides(
    session: &mut Session,
    source: impl Into<String>,
    table: DecodedTable,
    roles: &[RoleOverride],
    codes: &[CodeOverride],
) -> anyhow::Result<SessionEvent> {
    let staged = session.apply(SessionAction::StageImport {
        source: source.into(),
        headers: table.headers,
        rows: table.rows,
    })?;
    for edit in roles {
        session
            .apply(SessionAction::EditMappingRole {
                header: edit.header.clone(),
                role: edit.role,
            })
            .with_context(|| format!("set role for column {:?}", edit.header))?;
    }
    for edit in codes {
        session
            .apply(SessionAction::EditMappingCode {
                header: edit.header.clone(),
                code: edit.code.clone(),
            })
            .with_context(|| format!("set code for column {:?}", edit.header))?;
    }
    Ok(staged)
}
