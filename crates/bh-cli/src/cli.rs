//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Battery history from the power-management log.
///
/// Reconstructs the periods spent running on battery and estimates how long
/// a full charge lasts under real usage.
#[derive(Debug, Parser)]
#[command(name = "bh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize discharge periods and estimated battery endurance.
    Report {
        #[command(flatten)]
        log: LogArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the per-period metrics matrix.
    Periods {
        #[command(flatten)]
        log: LogArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = PeriodsFormat::Csv)]
        format: PeriodsFormat,
    },

    /// Print parsed power events as JSONL.
    Events {
        /// Read the log from a file instead of running the log command ("-" for stdin).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the current battery reading.
    Status,
}

/// Where the log comes from and how to treat a trailing discharge window.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Read the log from a file instead of running the log command ("-" for stdin).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Close a discharge window still open at the end of the log against the
    /// current battery reading.
    #[arg(long)]
    pub live: bool,
}

/// Output formats for the `periods` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodsFormat {
    Csv,
    Json,
}
