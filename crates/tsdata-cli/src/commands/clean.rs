//! `tsdata clean`

use super::{convert, open_reader};
use crate::config::ConvertArgs;
use crate::error::CliError;
use crate::input::create_output;
use tracing::info;
use tsdata_format::{DiagnosticSink, TsdataWriter, ValidationSummary};

/// Rewrite the input keeping only valid lines
///
/// Kept lines have every field trimmed. Nothing is repaired: a line either
/// passes as written or is reported and dropped.
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
    let mut writer = TsdataWriter::new(create_output(&args.output)?);
    writer.write_header(reader.metadata())?;

    let summary = convert(&args.input, reader, sink, |record| {
        writer.write_record(record)?;
        Ok(())
    })?;
    writer.finish()?;

    info!(
        written = summary.valid,
        skipped = summary.invalid,
        "wrote TSDATA to {}",
        args.output.display()
    );
    Ok(summary)
}
