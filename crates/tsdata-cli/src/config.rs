//! Command-line configuration.
//!
//! Everything is set through arguments, with environment variable fallbacks
//! for the options a pipeline is likely to fix once:
//!
//! - `TSDATA_LOG_LEVEL` for `--log-level`
//! - `TSDATA_QUIET` for `--quiet`
//! - `TSDATA_STRINGENT` for `validate --stringent`
//!
//! `TSDATA_LOG` takes a full `tracing` filter directive and wins over
//! `--log-level` when set.
//!
//! A path of `-` means stdin for inputs and stdout for outputs.

use crate::error::CliError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Path meaning stdin or stdout
pub const STDIO_PATH: &str = "-";

/// Process time-series TSDATA files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tsdata",
    about = "Validate and convert time-series TSDATA files",
    version
)]
pub struct Cli {
    /// Suppress diagnostics and logging output
    #[arg(short, long, global = true, env = "TSDATA_QUIET")]
    pub quiet: bool,

    /// Logging level for messages on stderr
    #[arg(
        long,
        value_enum,
        global = true,
        env = "TSDATA_LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: LogLevel,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything, including per-line tracing
    Trace,
    /// Header and processing details
    Debug,
    /// Summaries and line diagnostics
    Info,
    /// Line diagnostics only
    Warn,
    /// Fatal errors only
    Error,
}

impl LogLevel {
    /// Filter directive for this level
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a TSDATA file
    ///
    /// Validates metadata and data in INFILE. Each rejected line is reported
    /// on stderr. Exits with status 1 if any line fails.
    Validate(ValidateArgs),

    /// Convert a TSDATA file to CSV
    ///
    /// Writes the column headers and every valid data line of INFILE as CSV
    /// to OUTFILE. Rejected lines are reported and skipped.
    Csv(ConvertArgs),

    /// Rewrite a TSDATA file keeping only valid lines
    ///
    /// Writes the header and every valid data line of INFILE to OUTFILE with
    /// whitespace trimmed from each field. Empty comments are written as a
    /// row of NA. Rejected lines are reported and skipped.
    Clean(ConvertArgs),
}

/// Arguments for `validate`
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Stop after the first data line validation error
    #[arg(short, long, env = "TSDATA_STRINGENT")]
    pub stringent: bool,

    /// Also reject lines whose timestamp is earlier than the previous valid line
    #[arg(long)]
    pub check_time_order: bool,

    /// TSDATA file to validate, or '-' for stdin
    #[arg(value_name = "INFILE")]
    pub input: PathBuf,
}

/// Arguments for `csv` and `clean`
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// TSDATA file to read, or '-' for stdin
    #[arg(value_name = "INFILE")]
    pub input: PathBuf,

    /// File to write, or '-' for stdout
    #[arg(value_name = "OUTFILE")]
    pub output: PathBuf,
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a conversion would write over its own
    /// input.
    pub fn validate(&self) -> Result<(), CliError> {
        if let Commands::Csv(args) | Commands::Clean(args) = &self.command
            && !is_stdio(&args.input)
            && args.input == args.output
        {
            return Err(CliError::Config(format!(
                "OUTFILE would overwrite INFILE {}",
                args.input.display()
            )));
        }
        Ok(())
    }
}

/// Check if a path names stdin or stdout
#[must_use]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}
