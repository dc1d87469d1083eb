//! Error types for the tsdata command-line tool.

use std::path::PathBuf;
use thiserror::Error;

/// Command failures.
///
/// Per-line problems are not errors here; they go to the diagnostic sink.
/// Only [`CliError::ValidationFailed`] summarises them after the fact.
#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments are inconsistent in a way clap cannot express
    #[error("invalid arguments: {0}")]
    Config(String),

    /// Input file could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        /// Input path as given
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created
    #[error("failed to create {path}: {source}")]
    Create {
        /// Output path as given
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Header was invalid, or reading the input failed part way
    #[error("{path}: {source}")]
    Format {
        /// Input path as given
        path: PathBuf,
        /// Underlying format error
        #[source]
        source: tsdata_format::Error,
    },

    /// CSV output could not be written
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Output could not be written or flushed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more data lines were rejected
    #[error("{path} failed validation ({invalid} invalid line(s))")]
    ValidationFailed {
        /// Input path as given
        path: PathBuf,
        /// Number of rejected lines
        invalid: usize,
    },
}

impl CliError {
    pub(crate) fn format(path: &std::path::Path, source: tsdata_format::Error) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            source,
        }
    }
}
