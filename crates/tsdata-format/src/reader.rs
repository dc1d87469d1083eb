//! Streaming TSDATA file reader
//!
//! The reader owns the line framing: it collects the seven header lines,
//! hands them to [`Metadata::parse_header`], then feeds each following line to
//! [`Metadata::validate_line`] in file order. What happens to a failing line
//! is up to the caller; [`TsdataReader::validate_all`] covers the common case
//! of reporting every failure to a [`DiagnosticSink`].

use crate::column::HEADER_LINES;
use crate::error::{Error, LineError, MetadataError};
use crate::metadata::Metadata;
use crate::policy::TimeOrderPolicy;
use crate::record::{Record, ValidationMode};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Result of validating one data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// 1-based line number in the file; the first data line is 8
    pub line_number: usize,
    /// Validated record or the reason the line was rejected
    pub result: Result<Record, LineError>,
}

/// A rejected line, as delivered to a [`DiagnosticSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the file
    pub line_number: usize,
    /// Why the line was rejected
    pub error: LineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, {}", self.line_number, self.error)
    }
}

/// Destination for per-line diagnostics
pub trait DiagnosticSink {
    /// Receive one rejected line
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        warn!("{diagnostic}");
    }
}

/// Drops every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl DiagnosticSink for DiscardSink {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Counts from a [`TsdataReader::validate_all`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Data lines read
    pub lines: usize,
    /// Lines that validated
    pub valid: usize,
    /// Lines that were rejected
    pub invalid: usize,
    /// Whether strict mode ended the run before the end of input
    pub stopped_early: bool,
}

impl ValidationSummary {
    /// Whether every line read was valid
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// TSDATA file reader over any buffered source
///
/// Input must be UTF-8. Line terminators may be `\n` or `\r\n`.
pub struct TsdataReader<R> {
    reader: R,
    metadata: Metadata,
    mode: ValidationMode,
    time_order: Option<Box<dyn TimeOrderPolicy>>,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> TsdataReader<R> {
    /// Read and validate the header section
    ///
    /// Input that ends before seven lines fails with
    /// [`MetadataError::HeaderShape`].
    pub fn new(mut reader: R) -> Result<Self, Error> {
        let mut lines = Vec::with_capacity(HEADER_LINES);
        let mut buffer = String::new();
        while lines.len() < HEADER_LINES {
            buffer.clear();
            if reader.read_line(&mut buffer)? == 0 {
                return Err(MetadataError::HeaderShape {
                    expected: HEADER_LINES,
                    found: lines.len(),
                }
                .into());
            }
            lines.push(strip_line_ending(&buffer).to_string());
        }

        // Terminate the last line so a blank headers line still counts as a line
        let metadata = Metadata::parse_header(&(lines.join("\n") + "\n"))?;

        Ok(Self {
            reader,
            metadata,
            mode: ValidationMode::default(),
            time_order: None,
            line_number: HEADER_LINES,
            buffer,
        })
    }

    /// Set the line validation mode
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a time ordering policy, applied to every line that validates
    #[must_use]
    pub fn with_time_order(mut self, policy: Box<dyn TimeOrderPolicy>) -> Self {
        self.time_order = Some(policy);
        self
    }

    /// Parsed header
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Current validation mode
    #[must_use]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Read and validate the next data line
    ///
    /// Returns `Ok(None)` at end of input. A blank line is a data line and
    /// is rejected like any other malformed line.
    pub fn read_record(&mut self) -> Result<Option<LineOutcome>, Error> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = strip_line_ending(&self.buffer);
        let mut result = self.metadata.validate_line(line, self.mode);
        if let Some(policy) = self.time_order.as_mut() {
            result = result.and_then(|record| policy.check(&record).map(|()| record));
        }

        Ok(Some(LineOutcome {
            line_number: self.line_number,
            result,
        }))
    }

    /// Validate every remaining line, reporting failures to `sink`
    ///
    /// In [`ValidationMode::Strict`] the run ends at the first failing line.
    /// In [`ValidationMode::Lenient`] failing lines are reported and skipped.
    pub fn validate_all(
        &mut self,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ValidationSummary, Error> {
        let mut summary = ValidationSummary::default();

        while let Some(outcome) = self.read_record()? {
            summary.lines += 1;
            match outcome.result {
                Ok(_) => summary.valid += 1,
                Err(error) => {
                    summary.invalid += 1;
                    sink.report(&Diagnostic {
                        line_number: outcome.line_number,
                        error,
                    });
                    if self.mode.stops_on_error() {
                        summary.stopped_early = true;
                        break;
                    }
                }
            }
        }

        debug!(
            lines = summary.lines,
            valid = summary.valid,
            invalid = summary.invalid,
            stopped_early = summary.stopped_early,
            "validation finished"
        );
        Ok(summary)
    }
}

impl<'a> TsdataReader<&'a [u8]> {
    /// Create a reader from a byte slice
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, Error> {
        Self::new(bytes)
    }
}

impl TsdataReader<BufReader<File>> {
    /// Open a file and read its header
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> Iterator for TsdataReader<R> {
    type Item = Result<LineOutcome, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

impl<R> fmt::Debug for TsdataReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsdataReader")
            .field("metadata", &self.metadata)
            .field("mode", &self.mode)
            .field("time_order", &self.time_order.is_some())
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
