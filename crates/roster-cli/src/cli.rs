//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Student roster dashboard - summarize and filter student records",
    long_about = "Summarize a student roster from a CSV or XLSX file.\n\n\
                  Shows headline figures, frequency charts, an age histogram, \n\
                  and a paginated table, all narrowed by filters and a free-text search."
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

    /// Include student values (names, search text) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the dashboard for a roster file.
    Dashboard(DashboardArgs),

    /// List the options of each filter.
    Choices(ChoicesArgs),

    /// Explore the dashboard with line commands.
    Interactive(InteractiveArgs),

    /// Show the effective settings.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// CSV or XLSX file (default: the configured source).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Only students from this state.
    #[arg(long)]
    pub state: Option<String>,

    /// Only students from this board.
    #[arg(long)]
    pub board: Option<String>,

    /// Only students of this gender.
    #[arg(long)]
    pub gender: Option<String>,

    /// Only students in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive search over name, city, district, and state.
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Table page to show (1-based, clamped).
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ChoicesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file.
    #[arg(long)]
    pub init: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
