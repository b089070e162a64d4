//! Library interface for the `readstat` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use readstat_core::LogLevel;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                 Log filter (e.g., debug, readstat_core=trace)
    READSTAT_LOG_PATH        Explicit log file path
    READSTAT_LOG_DIR         Log directory
    READSTAT_LANG            Default language tag (e.g., en_US, de)
    READSTAT_CACHE_CAPACITY  Entries kept per memoized counter
    READSTAT_PRONUNCIATION_DICT
                             CMU-format dictionary file to load
";

/// Command-line interface definition for readstat.
#[derive(Parser)]
#[command(name = "readstat")]
#[command(about = "Readability scores and text statistics", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log level, overriding the configured one
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Count words, sentences, syllables and more
    Stats(commands::stats::StatsArgs),

    /// Score readability with one or more formulas
    Score(commands::score::ScoreArgs),

    /// List difficult words
    Difficult(commands::difficult::DifficultArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn score_accepts_repeated_formulas() {
        let cli = Cli::try_parse_from([
            "readstat",
            "score",
            "notes.md",
            "--formula",
            "gunning-fog",
            "--formula",
            "wiener_sachtextformel:2",
        ])
        .unwrap();
        let Some(Commands::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.formula.len(), 2);
    }

    #[test]
    fn unknown_formula_is_a_parse_error() {
        let result = Cli::try_parse_from(["readstat", "score", "a.txt", "--formula", "fog"]);
        assert!(result.is_err());
    }

    #[test]
    fn log_level_flag_parses() {
        let cli = Cli::try_parse_from(["readstat", "--log-level", "debug", "info"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }
}
