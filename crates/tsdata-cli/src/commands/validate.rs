//! `tsdata validate`

use super::open_reader;
use crate::config::ValidateArgs;
use crate::error::CliError;
use tracing::info;
use tsdata_format::{DiagnosticSink, MonotonicTime, ValidationMode, ValidationSummary};

/// Validate the header and every data line of the input
///
/// Without `--stringent` every line is checked and all failures are
/// reported. With it, checking stops at the first failing line.
///
/// # Errors
///
/// Returns `CliError::ValidationFailed` if any line was rejected, after the
/// rejected lines have been reported to `sink`.
pub fn run(
    args: &ValidateArgs,
    sink: &mut dyn DiagnosticSink,
) -> Result<ValidationSummary, CliError> {
    let mode = if args.stringent {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };

    let mut reader = open_reader(&args.input)?.with_mode(mode);
    if args.check_time_order {
        reader = reader.with_time_order(Box::new(MonotonicTime::new()));
    }

    let summary = reader
        .validate_all(sink)
        .map_err(|source| CliError::format(&args.input, source))?;

    info!(
        lines = summary.lines,
        invalid = summary.invalid,
        stopped_early = summary.stopped_early,
        "validated {}",
        args.input.display()
    );

    if !summary.is_valid() {
        return Err(CliError::ValidationFailed {
            path: args.input.clone(),
            invalid: summary.invalid,
        });
    }
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::{MIXED, VALID, write_fixture};
    use tsdata_format::{Diagnostic, Error, MetadataError};

    fn args(path: &std::path::Path, stringent: bool, check_time_order: bool) -> ValidateArgs {
        ValidateArgs {
            stringent,
            check_time_order,
            input: path.to_path_buf(),
        }
    }

    #[test]
    fn test_valid_file() {
        let (_dir, path) = write_fixture(VALID);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let summary = run(&args(&path, false, true), &mut diagnostics).unwrap();
        assert_eq!(summary.valid, 3);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_reports_every_bad_line() {
        let (_dir, path) = write_fixture(MIXED);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let err = run(&args(&path, false, false), &mut diagnostics).unwrap_err();
        assert!(matches!(err, CliError::ValidationFailed { invalid: 2, .. }));
        assert_eq!(
            diagnostics.iter().map(|d| d.line_number).collect::<Vec<_>>(),
            vec![9, 10]
        );
    }

    #[test]
    fn test_stringent_stops_early() {
        let (_dir, path) = write_fixture(MIXED);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let err = run(&args(&path, true, false), &mut diagnostics).unwrap_err();
        assert!(matches!(err, CliError::ValidationFailed { invalid: 1, .. }));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_time_order_is_opt_in() {
        let (_dir, path) = write_fixture(MIXED);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let err = run(&args(&path, false, true), &mut diagnostics).unwrap_err();
        assert!(matches!(err, CliError::ValidationFailed { invalid: 3, .. }));
    }

    #[test]
    fn test_bad_header() {
        let (_dir, path) = write_fixture("A\nB\nC\nc1\ttime\tfloat\nNA\tNA\nt\tv\n");
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let err = run(&args(&path, false, false), &mut diagnostics).unwrap_err();
        assert!(matches!(
            err,
            CliError::Format {
                source: Error::Metadata(MetadataError::HeaderShape { found: 6, .. }),
                ..
            }
        ));
    }
}
