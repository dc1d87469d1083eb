//! `tsdata csv`

use super::{convert, open_reader};
use crate::config::ConvertArgs;
use crate::error::CliError;
use crate::input::create_output;
use tracing::info;
use tsdata_format::{DiagnosticSink, ValidationSummary};

/// Convert the input to CSV
///
/// The first CSV row holds the column headers. Units, types and comments
/// are not carried over. Rejected lines are reported and left out.
///
/// # Errors
///
/// Fails if the header is invalid or the input or output cannot be used.
/// Rejected data lines are not an error.
pub fn run(
    args: &ConvertArgs,
    sink: &mut dyn DiagnosticSink,
) -> Result<ValidationSummary, CliError> {
    let reader = open_reader(&args.input)?;
    let mut writer = ::csv::Writer::from_writer(create_output(&args.output)?);
    writer.write_record(reader.metadata().headers())?;

    let summary = convert(&args.input, reader, sink, |record| {
        writer.write_record(record.fields())?;
        Ok(())
    })?;
    writer.flush()?;

    info!(
        written = summary.valid,
        skipped = summary.invalid,
        "wrote CSV to {}",
        args.output.display()
    );
    Ok(summary)
}
