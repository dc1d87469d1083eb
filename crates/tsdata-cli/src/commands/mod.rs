//! Subcommand implementations.
//!
//! Each command takes its parsed arguments and a diagnostic sink, so the
//! same code runs from the binary and from tests.

pub mod clean;
pub mod csv;
pub mod validate;

use crate::error::CliError;
use crate::input::open_input;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;
use tsdata_format::{
    Diagnostic, DiagnosticSink, Record, TsdataReader, ValidationMode, ValidationSummary,
};

/// Open an input and read its header
pub(crate) fn open_reader(path: &Path) -> Result<TsdataReader<Box<dyn BufRead>>, CliError> {
    let input = open_input(path)?;
    let reader = TsdataReader::new(input).map_err(|source| CliError::format(path, source))?;
    debug!(
        columns = reader.metadata().column_count(),
        file_type = reader.metadata().file_type(),
        "read header"
    );
    Ok(reader)
}

/// Pass every valid record to `emit`, reporting and skipping the rest
pub(crate) fn convert<R, F>(
    path: &Path,
    reader: TsdataReader<R>,
    sink: &mut dyn DiagnosticSink,
    mut emit: F,
) -> Result<ValidationSummary, CliError>
where
    R: BufRead,
    F: FnMut(&Record) -> Result<(), CliError>,
{
    let mut summary = ValidationSummary::default();
    for outcome in reader.with_mode(ValidationMode::Lenient) {
        let outcome = outcome.map_err(|source| CliError::format(path, source))?;
        summary.lines += 1;
        match outcome.result {
            Ok(record) => {
                emit(&record)?;
                summary.valid += 1;
            }
            Err(error) => {
                summary.invalid += 1;
                sink.report(&Diagnostic {
                    line_number: outcome.line_number,
                    error,
                });
            }
        }
    }
    Ok(summary)
}
