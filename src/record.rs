//! The unit of input: a timestamped vehicle count.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Timestamp pattern used both for parsing input and for printing reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single observation: the number of cars counted in the interval starting
/// at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub count: u64,
}

impl Record {
    pub fn new(timestamp: NaiveDateTime, count: u64) -> Self {
        Self { timestamp, count }
    }

    /// Calendar date of the observation. No timezone conversion is applied.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Canonical `<YYYY-MM-DDTHH:MM:SS> <count>` form, accepted back by the parser.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp.format(TIMESTAMP_FORMAT), self.count)
    }
}
