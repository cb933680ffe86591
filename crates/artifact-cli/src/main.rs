//! Artifact evaluator CLI.

use artifact_cli::logging::{LogConfig, LogFormat, init_logging};
use artifact_cli::render::OutputFormat;
use artifact_source::{DataLocation, load_dataset};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use crate::commands::{
    run_browse, run_check, run_evaluate, run_main_stat, run_session_command, run_sets,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let location = DataLocation::parse(&cli.data);
    let dataset = match load_dataset(&location) {
        Ok(dataset) => dataset,
        Err(error) => {
            error!(%location, "dataset load failed");
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let format = match cli.output {
        OutputArg::Table => OutputFormat::Table,
        OutputArg::Json => OutputFormat::Json,
    };
    let result = match &cli.command {
        Command::Sets => run_sets(&dataset, format).map(|()| 0),
        Command::Browse(args) => run_browse(&dataset, args, format).map(|()| 0),
        Command::Evaluate(args) => run_evaluate(&dataset, args, format).map(|()| 0),
        Command::Session(args) => run_session_command(&dataset, args, format).map(|_| 0),
        Command::Check => run_check(&dataset, format).map(|clean| if clean { 0 } else { 1 }),
        Command::MainStat(args) => run_main_stat(&dataset, args, format).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_log_file(cli.log_file.clone())
        .with_ansi(with_ansi)
}
