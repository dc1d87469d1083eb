//! Command-line tool for TSDATA files
//!
//! Provides the `tsdata` binary with three commands:
//!
//! - `validate INFILE`: check the header and every data line
//! - `csv INFILE OUTFILE`: convert valid lines to CSV
//! - `clean INFILE OUTFILE`: rewrite a TSDATA file keeping valid lines only
//!
//! Rejected lines are reported on stderr as `line N, <reason>`.
//!
//! # Example
//!
//! ```no_run
//! use tsdata_cli::{Cli, run};
//!
//! let cli = Cli::from_args();
//! cli.validate().expect("Invalid configuration");
//! run(&cli).expect("Command failed");
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;

pub use config::{Cli, Commands, ConvertArgs, LogLevel, ValidateArgs};
pub use error::CliError;

use tsdata_format::{DiagnosticSink, DiscardSink, TracingSink};

/// Run the selected command
///
/// Diagnostics go through `tracing` unless `--quiet` is set, in which case
/// they are dropped.
///
/// # Errors
///
/// Returns the command's error, including `CliError::ValidationFailed` when
/// `validate` rejected any line.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let mut sink: Box<dyn DiagnosticSink> = if cli.quiet {
        Box::new(DiscardSink)
    } else {
        Box::new(TracingSink)
    };

    match &cli.command {
        Commands::Validate(args) => commands::validate::run(args, sink.as_mut())?,
        Commands::Csv(args) => commands::csv::run(args, sink.as_mut())?,
        Commands::Clean(args) => commands::clean::run(args, sink.as_mut())?,
    };
    Ok(())
}
