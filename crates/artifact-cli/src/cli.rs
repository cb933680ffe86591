//! CLI argument definitions for the artifact evaluator.

use std::path::PathBuf;

use artifact_source::DEFAULT_DATA_PATH;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "artifact-evaluator",
    version,
    about = "Explore which characters want which artifact sets, slots and stats",
    long_about = "Explore a precomputed artifact dataset in two linked views.\n\n\
                  browse:   pick a set, see its characters and slot breakdown.\n\
                  evaluate: pick a set, slot and main stat, see who wants it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset document: a local path or an http(s) URL.
    #[arg(
        long = "data",
        value_name = "PATH|URL",
        default_value = DEFAULT_DATA_PATH,
        global = true
    )]
    pub data: String,

    /// Output format for rendered views and reports.
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: OutputArg,

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

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the event target (module path) in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every set with its character counts.
    Sets,

    /// Show one set's characters and slot breakdown.
    Browse(BrowseArgs),

    /// Show who wants one set + slot + main stat combination.
    Evaluate(EvaluateArgs),

    /// Replay input events from a script (or stdin) against one session.
    Session(SessionArgs),

    /// Check the dataset's combination invariants and print summary counts.
    Check,

    /// Show who wants a slot + main stat across all sets.
    MainStat(MainStatArgs),
}

/// Filters shared by every view.
#[derive(Args)]
pub struct FilterArgs {
    /// Only show characters whose role is preferred.
    #[arg(long = "preferred-only")]
    pub preferred_only: bool,

    /// Hide substats ranked worse than N (non-numbers show all ranks).
    #[arg(long = "threshold", value_name = "N", default_value = "3")]
    pub threshold: String,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Set to browse.
    #[arg(value_name = "SET")]
    pub set: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Focus a substat tag.
    #[arg(long = "focus", value_name = "SLOT|MAIN|SUBSTAT|RANK")]
    pub focus: Option<String>,
}

#[derive(Args)]
pub struct EvaluateArgs {
    #[arg(value_name = "SET")]
    pub set: String,

    #[arg(value_name = "SLOT")]
    pub slot: String,

    #[arg(value_name = "MAIN_STAT")]
    pub main_stat: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Focus a character chip.
    #[arg(long = "focus", value_name = "CHARACTER|ROLE")]
    pub focus: Option<String>,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Event script, one event per line (reads stdin when absent).
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

#[derive(Args)]
pub struct MainStatArgs {
    #[arg(value_name = "SLOT")]
    pub slot: String,

    #[arg(value_name = "MAIN_STAT")]
    pub main_stat: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
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
