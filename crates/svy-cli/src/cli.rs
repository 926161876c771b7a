//! CLI argument definitions for the survey screening tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use svy_cli::pipeline::{CodeOverride, RoleOverride, parse_code_override, parse_role_override};
use svy_ingest::DEFAULT_SAMPLE_ROWS;

#[derive(Parser)]
#[command(
    name = "survey-insight",
    version,
    about = "Survey Insight - Screen survey exports for low-quality responses",
    long_about = "Screen survey CSV exports for low-quality responses.\n\n\
                  Infers a column mapping from the headers, flags straightlining\n\
                  and speeding respondents, and reports cleaned aggregates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow respondent-level values in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Screen a survey export: infer the mapping, flag rows, summarize.
    Screen(ScreenArgs),

    /// Show the inferred column mapping for a survey export.
    Mapping(MappingArgs),

    /// Write a deterministic sample dataset for trying the tool out.
    Sample(SampleArgs),
}

#[derive(Parser)]
pub struct ScreenArgs {
    /// Path to the survey export CSV.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override an inferred column role (repeatable).
    #[arg(long = "role", value_name = "HEADER=ROLE", value_parser = parse_role_override)]
    pub roles: Vec<RoleOverride>,

    /// Override an inferred variable code (repeatable).
    #[arg(long = "code", value_name = "HEADER=CODE", value_parser = parse_code_override)]
    pub codes: Vec<CodeOverride>,

    /// Exclude every flagged row after screening.
    #[arg(long = "exclude-flagged")]
    pub exclude_flagged: bool,

    /// Directory to write screening_report.json into.
    #[arg(long = "report", value_name = "DIR")]
    pub report: Option<PathBuf>,

    /// Seconds below which a response counts as a speeder.
    #[arg(long = "min-duration", value_name = "SECONDS")]
    pub min_duration: Option<f64>,
}

#[derive(Parser)]
pub struct MappingArgs {
    /// Path to the survey export CSV.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override an inferred column role (repeatable).
    #[arg(long = "role", value_name = "HEADER=ROLE", value_parser = parse_role_override)]
    pub roles: Vec<RoleOverride>,

    /// Override an inferred variable code (repeatable).
    #[arg(long = "code", value_name = "HEADER=CODE", value_parser = parse_code_override)]
    pub codes: Vec<CodeOverride>,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Where to write the sample CSV.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of rows to generate.
    #[arg(long = "rows", value_name = "COUNT", default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub rows: usize,

    /// Seed for the deterministic generator.
    #[arg(long = "seed", value_name = "SEED", default_value_t = 7)]
    pub seed: u64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
