//! CLI argument definitions for the reference-range engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labref",
    version,
    about = "Reference-range engine for the laboratory catalog",
    long_about = "Normalize, validate and consolidate reference ranges for clinical\n\
                  parameters, and classify measured values for report rendering.\n\
                  Input is JSON in any of the producer dialects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow patient-level values (birth dates, results) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize, validate and consolidate a candidate reference-range list.
    Consolidate(ConsolidateArgs),

    /// Resolve a patient's range and classify a measured value against it.
    Evaluate(EvaluateArgs),
}

#[derive(Parser)]
pub struct ConsolidateArgs {
    /// JSON file holding an array of raw candidate segments (any dialect).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write the canonical segment list to this file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct EvaluateArgs {
    /// JSON file holding an evaluation request (segments, sex, birth date, value).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
