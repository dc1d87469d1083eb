//! Error types for TSDATA parsing and validation
//!
//! Errors are split by phase. [`MetadataError`] covers the 7-line header and is
//! always fatal for the file. [`LineError`] covers a single data line and is
//! scoped to that line; the caller decides whether to stop or skip it.
//!
//! Column numbers carried by errors are 1-based, matching what a person sees
//! when opening the file in a spreadsheet.

use std::fmt;
use thiserror::Error;

/// Result type for TSDATA file operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors found while parsing or validating the metadata header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// Header text does not contain exactly the expected number of lines
    #[error("expected {expected} lines in header, found {found}")]
    HeaderShape {
        /// Required number of header lines
        expected: usize,
        /// Number of lines actually present
        found: usize,
    },

    /// First header line is empty
    #[error("missing or empty FileType")]
    MissingFileType,

    /// Second header line is empty
    #[error("missing or empty Project")]
    MissingProject,

    /// A column comment is empty while others are present
    #[error("empty comment in column {column}")]
    EmptyComment {
        /// 1-based column number
        column: usize,
    },

    /// Column comments and types disagree on the number of columns
    #[error("inconsistent Comments column count: {comments} comments for {types} types")]
    CommentCountMismatch {
        /// Number of comment entries
        comments: usize,
        /// Number of type entries
        types: usize,
    },

    /// Types line is empty
    #[error("missing or empty Types")]
    MissingTypes,

    /// A type tag is not one of the recognized tags
    #[error("bad Types value '{value}' in column {column}")]
    UnknownType {
        /// The unrecognized tag
        value: String,
        /// 1-based column number
        column: usize,
    },

    /// Units line is empty
    #[error("missing or empty Units")]
    MissingUnits,

    /// Units and types disagree on the number of columns
    #[error("inconsistent Units column count: {units} units for {types} types")]
    UnitCountMismatch {
        /// Number of unit entries
        units: usize,
        /// Number of type entries
        types: usize,
    },

    /// A unit entry is empty
    #[error("empty Units value in column {column}")]
    EmptyUnit {
        /// 1-based column number
        column: usize,
    },

    /// Headers line is empty
    #[error("missing or empty Headers")]
    MissingHeaders,

    /// Headers and types disagree on the number of columns
    #[error("inconsistent Headers column count: {headers} headers for {types} types")]
    HeaderCountMismatch {
        /// Number of header entries
        headers: usize,
        /// Number of type entries
        types: usize,
    },

    /// The first column header is not `time`
    #[error("first Headers column should be 'time', found '{found}'")]
    FirstColumnNotTime {
        /// The header found in the first column
        found: String,
    },

    /// A column header is empty
    #[error("empty Headers value in column {column}")]
    EmptyHeader {
        /// 1-based column number
        column: usize,
    },

    /// Only the time column is declared
    #[error("expected a time column plus at least one data column, found {found} column(s)")]
    NoDataColumns {
        /// Number of declared columns
        found: usize,
    },
}

/// A single data column that failed its type check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFailure {
    /// 1-based column number
    pub column: usize,
    /// Trimmed field value that was rejected
    pub value: String,
}

impl fmt::Display for ColumnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}, bad value '{}'", self.column, self.value)
    }
}

/// Errors found while validating one data line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Line has fewer than two fields
    #[error("found {found} column(s), expected at least 2")]
    TooFewColumns {
        /// Number of fields found
        found: usize,
    },

    /// Line field count differs from the header column count
    #[error("found {found} columns, expected {expected}")]
    ColumnCountMismatch {
        /// Number of columns declared in the header
        expected: usize,
        /// Number of fields found
        found: usize,
    },

    /// First field is not a timestamp with a timezone offset
    #[error("column 1, invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// Trimmed value of the first field
        value: String,
    },

    /// One or more data fields failed their column type check
    #[error("{}", join_failures(.failures))]
    ColumnValidation {
        /// Failing columns, in column order. Never empty.
        failures: Vec<ColumnFailure>,
    },

    /// Timestamp is earlier than the previous accepted line's timestamp
    #[error("timestamp {current} is earlier than previous timestamp {previous}")]
    OutOfOrder {
        /// Timestamp of the last accepted line
        previous: String,
        /// Timestamp of this line
        current: String,
    },
}

impl LineError {
    /// First failing data column, if this is a column validation error
    #[must_use]
    pub fn first_failure(&self) -> Option<&ColumnFailure> {
        match self {
            Self::ColumnValidation { failures } => failures.first(),
            _ => None,
        }
    }
}

fn join_failures(failures: &[ColumnFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors for whole-file processing
#[derive(Debug, Error)]
pub enum Error {
    /// Header could not be parsed or failed validation
    #[error("invalid metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
