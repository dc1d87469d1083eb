//! Data line validation

use crate::column::{DELIMITER, DELIMITER_STR};
use crate::error::{ColumnFailure, LineError};
use crate::metadata::Metadata;
use crate::time::parse_timestamp;
use chrono::{DateTime, FixedOffset};

/// How column type failures within a line are handled
///
/// The same mode tells file-level drivers such as
/// [`TsdataReader::validate_all`](crate::TsdataReader::validate_all) whether
/// a failing line stops processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Reject the line at the first failing column; stop the file at the first failing line
    #[default]
    Strict,
    /// Check every column and report all failures; skip failing lines and continue
    Lenient,
}

impl ValidationMode {
    /// Whether the first failing line ends processing of the file
    #[must_use]
    pub const fn stops_on_error(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// A validated data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    time: DateTime<FixedOffset>,
}

impl Record {
    /// Whitespace-trimmed fields in header order
    ///
    /// The first field is the timestamp exactly as written, only trimmed.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Parsed timestamp of the first column
    #[must_use]
    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    /// Field by 0-based column index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Take ownership of the fields
    #[must_use]
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Format as a tab-delimited TSDATA data line, without newline
    #[must_use]
    pub fn to_line(&self) -> String {
        self.fields.join(DELIMITER_STR)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Metadata {
    /// Validate one data line against this header
    ///
    /// The first column must hold a real timestamp; `NA` is never accepted
    /// there. Every other column is checked against its declared type after
    /// trimming. No field is ever rewritten or defaulted: a line either
    /// validates as written or is rejected.
    ///
    /// The metadata is expected to be valid. Columns with an unrecognized
    /// type tag reject every value.
    ///
    /// ```
    /// use tsdata_format::{LineError, Metadata, ValidationMode};
    ///
    /// let metadata = Metadata::parse_header("t\np\n\n\ntime\tfloat\nNA\tNA\ntime\tcol1")?;
    ///
    /// let record = metadata.validate_line("2017-05-06T19:52:57.601Z\t6.0", ValidationMode::Strict)
    ///     .expect("valid line");
    /// assert_eq!(record.fields(), ["2017-05-06T19:52:57.601Z", "6.0"]);
    ///
    /// let err = metadata.validate_line("NA\t6.0", ValidationMode::Strict).unwrap_err();
    /// assert!(matches!(err, LineError::InvalidTimestamp { .. }));
    /// # Ok::<(), tsdata_format::MetadataError>(())
    /// ```
    pub fn validate_line(&self, line: &str, mode: ValidationMode) -> Result<Record, LineError> {
        let raw: Vec<&str> = line.split(DELIMITER).collect();
        if raw.len() < 2 {
            return Err(LineError::TooFewColumns { found: raw.len() });
        }
        if raw.len() != self.column_count() {
            return Err(LineError::ColumnCountMismatch {
                expected: self.column_count(),
                found: raw.len(),
            });
        }

        let fields: Vec<String> = raw.iter().map(|f| f.trim().to_string()).collect();

        let time = parse_timestamp(&fields[0]).ok_or_else(|| LineError::InvalidTimestamp {
            value: fields[0].clone(),
        })?;

        let mut failures = Vec::new();
        for (index, (value, checker)) in fields.iter().zip(self.checkers()).enumerate().skip(1) {
            if checker.is_some_and(|column_type| column_type.check(value)) {
                continue;
            }
            failures.push(ColumnFailure {
                column: index + 1,
                value: value.clone(),
            });
            if mode.stops_on_error() {
                break;
            }
        }
        if !failures.is_empty() {
            return Err(LineError::ColumnValidation { failures });
        }

        Ok(Record { fields, time })
    }
}
