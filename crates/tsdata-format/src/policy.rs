//! Optional ordering checks across lines
//!
//! Line validation never compares one line with another. Callers that need
//! timestamps to be in order construct a policy explicitly and attach it to a
//! [`TsdataReader`](crate::TsdataReader), or call it themselves.

use crate::error::LineError;
use crate::record::Record;
use chrono::{DateTime, FixedOffset};

/// A check applied to each validated record in file order
pub trait TimeOrderPolicy {
    /// Check a record that passed line validation
    ///
    /// Implementations update their state only when the record is accepted.
    fn check(&mut self, record: &Record) -> Result<(), LineError>;
}

/// Requires timestamps to never decrease
///
/// Equal timestamps are accepted. A rejected record does not move the
/// reference point, so the next line is compared against the last accepted one.
#[derive(Debug, Clone, Default)]
pub struct MonotonicTime {
    last: Option<DateTime<FixedOffset>>,
}

impl MonotonicTime {
    /// Create a policy with no previous timestamp
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last accepted record
    #[must_use]
    pub fn last(&self) -> Option<DateTime<FixedOffset>> {
        self.last
    }
}

impl TimeOrderPolicy for MonotonicTime {
    fn check(&mut self, record: &Record) -> Result<(), LineError> {
        let current = record.time();
        if let Some(previous) = self.last
            && current < previous
        {
            return Err(LineError::OutOfOrder {
                previous: previous.to_rfc3339(),
                current: current.to_rfc3339(),
            });
        }
        self.last = Some(current);
        Ok(())
    }
}
