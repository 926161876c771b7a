//! Terminal rendering of mapping reviews and screening summaries.

use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use svy_model::{CellValue, ColumnMapping, ColumnRole, ID_CODE, QualityFlag, RowRecord};
use svy_project::{
    DemographicBreakdown, ProjectState, RELIABILITY_ALPHA_PLACEHOLDER, ScaleMean, StatusCounts,
};

use crate::types::{MappingReview, SampleResult, ScreenResult};

pub fn print_screen_summary(result: &ScreenResult) {
    print!("{}", render_screen_summary(result));
}

pub fn print_mapping_review(review: &MappingReview) {
    print!("{}", render_mapping_review(review));
}

pub fn print_sample_result(result: &SampleResult) {
    print!("{}", render_sample_result(result));
}

pub fn render_screen_summary(result: &ScreenResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source: {}", result.source);
    let Some(state) = result.session.project() else {
        return out;
    };
    let counts = state.status_counts();
    out.push_str(&status_table(counts).to_string());
    out.push('\n');
    if result.newly_excluded > 0 {
        let _ = writeln!(out, "Excluded {} flagged rows.", result.newly_excluded);
    }

    let flagged: Vec<&RowRecord> = state
        .rows()
        .iter()
        .filter(|row| row.is_flagged() && !row.is_excluded)
        .collect();
    if !flagged.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Flagged responses:");
        out.push_str(&flagged_table(state, &flagged).to_string());
        out.push('\n');
    }

    let means = state.scale_means();
    if !means.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Scale items:");
        out.push_str(&means_table(&means).to_string());
        out.push('\n');
        let _ = writeln!(
            out,
            "Reliability alpha (placeholder): {RELIABILITY_ALPHA_PLACEHOLDER}"
        );
    }

    for breakdown in state.demographic_counts() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({}):", breakdown.header, breakdown.variable_code);
        out.push_str(&breakdown_table(&breakdown).to_string());
        out.push('\n');
    }

    if let Some(path) = &result.report_path {
        let _ = writeln!(out);
        let _ = writeln!(out, "Report: {}", path.display());
    }
    out
}

pub fn render_mapping_review(review: &MappingReview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source: {}", review.source);
    let _ = writeln!(out, "Rows: {}", review.rows);
    out.push_str(&mapping_table(&review.mappings).to_string());
    out.push('\n');
    let counts = review.role_counts;
    let _ = writeln!(
        out,
        "Roles: {} demographic / {} scale / {} meta / {} ignore",
        counts.demographic, counts.scale, counts.meta, counts.ignore
    );
    out
}

pub fn render_sample_result(result: &SampleResult) -> String {
    format!(
        "Sample written: {} ({} rows, seed {})\n",
        result.path.display(),
        result.rows,
        result.seed
    )
}

/// Value of the first ID-coded column for a row, or a dash when the
/// dataset carries no such column.
pub fn respondent_label(state: &ProjectState, row: &RowRecord) -> String {
    state
        .mappings()
        .iter()
        .find(|mapping| mapping.variable_code == ID_CODE)
        .and_then(|mapping| row.cell(&mapping.original_header))
        .and_then(CellValue::render)
        .unwrap_or_else(|| "-".to_string())
}

fn status_table(counts: StatusCounts) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Clean").fg(Color::Green),
        Cell::new(counts.clean),
    ]);
    table.add_row(vec![
        Cell::new("Flagged").fg(Color::Yellow),
        Cell::new(counts.flagged),
    ]);
    table.add_row(vec![
        Cell::new("Excluded").fg(Color::Red),
        Cell::new(counts.excluded),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn flagged_table(state: &ProjectState, rows: &[&RowRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Respondent"),
        header_cell("Flags"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        let flags = row
            .flags
            .iter()
            .map(QualityFlag::label)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            dim_cell(row.id.to_hex()),
            Cell::new(respondent_label(state, row)),
            Cell::new(flags).fg(Color::Yellow),
        ]);
    }
    table
}

fn mapping_table(mappings: &[ColumnMapping]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Code"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    for mapping in mappings {
        table.add_row(vec![
            Cell::new(&mapping.original_header),
            Cell::new(&mapping.variable_code),
            role_cell(mapping.role),
        ]);
    }
    table
}

fn means_table(means: &[ScaleMean]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Code"),
        header_cell("Mean"),
        header_cell("Answered"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for mean in means {
        let mean_cell = match mean.mean {
            Some(value) => Cell::new(format!("{value:.2}")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&mean.header),
            Cell::new(&mean.variable_code),
            mean_cell,
            Cell::new(mean.answered),
        ]);
    }
    table
}

fn breakdown_table(breakdown: &DemographicBreakdown) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, count) in &breakdown.counts {
        table.add_row(vec![Cell::new(category), Cell::new(*count)]);
    }
    table
}

fn role_cell(role: ColumnRole) -> Cell {
    match role {
        ColumnRole::Scale => Cell::new(role.as_str()).fg(Color::Green),
        ColumnRole::Demographic => Cell::new(role.as_str()).fg(Color::Blue),
        ColumnRole::Meta => Cell::new(role.as_str()).fg(Color::Yellow),
        ColumnRole::Ignore => dim_cell(role.as_str()),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
