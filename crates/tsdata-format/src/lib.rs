//! TSDATA time-series file format support
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::doc_markdown)] // TSDATA and RFC names don't need backticks
//! TSDATA is a tab-delimited text format for time-series data. Every file
//! starts with a seven line metadata header followed by typed data rows.
//!
//! # Format Overview
//!
//! ```text
//! line 1: FileType
//! line 2: Project
//! line 3: FileDescription            (may be empty)
//! line 4: per-column comments        (may be empty)
//! line 5: per-column type tags       (time, float, integer, text, category, boolean)
//! line 6: per-column units
//! line 7: per-column headers         (first is always "time")
//! line 8+: data rows
//! ```
//!
//! The first data column must always hold an RFC 3339 timestamp with a
//! timezone offset. Every other column accepts `NA` for a missing value.
//!
//! # Example
//!
//! ```
//! use tsdata_format::{TsdataReader, ValidationMode};
//!
//! let content = "\
//! sensor
//! cruise42
//! wind speed
//!
//! time\tfloat
//! NA\tm/s
//! time\tspeed
//! 2017-05-06T19:52:57Z\t6.0
//! NA\t6.1
//! ";
//!
//! let mut reader = TsdataReader::from_bytes(content.as_bytes())?
//!     .with_mode(ValidationMode::Lenient);
//! assert_eq!(reader.metadata().headers(), ["time", "speed"]);
//!
//! let mut diagnostics = Vec::new();
//! let summary = reader.validate_all(&mut diagnostics)?;
//! assert_eq!(summary.valid, 1);
//! assert_eq!(diagnostics[0].to_string(), "line 9, column 1, invalid timestamp 'NA'");
//! # Ok::<(), tsdata_format::Error>(())
//! ```

#![warn(missing_docs)]

mod column;
mod error;
mod metadata;
mod policy;
mod reader;
mod record;
mod time;
mod writer;

pub use column::{
    BOOLEAN_FALSE, BOOLEAN_TRUE, ColumnType, DELIMITER, HEADER_LINES, NA, TIME_HEADER, UnknownTag,
};
pub use error::{ColumnFailure, Error, LineError, MetadataError, Result};
pub use metadata::{Metadata, MetadataBuilder};
pub use policy::{MonotonicTime, TimeOrderPolicy};
pub use reader::{
    Diagnostic, DiagnosticSink, DiscardSink, LineOutcome, TracingSink, TsdataReader,
    ValidationSummary,
};
pub use record::{Record, ValidationMode};
pub use time::parse_timestamp;
pub use writer::TsdataWriter;
