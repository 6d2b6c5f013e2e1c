//! Lowest-total run of consecutive records.

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use super::{Aggregator, DEFAULT_WINDOW};
use crate::record::Record;

/// Tracks the run of `window` consecutive records with the lowest total count.
///
/// The current run is kept as a queue with a running sum, so each record is
/// `O(1)` apart from copying the queue when a new quietest run is found. Ties
/// keep the earlier run.
#[derive(Debug, Clone)]
pub struct QuietestPeriod {
    window: NonZeroUsize,
    current: VecDeque<Record>,
    current_total: u128,
    quietest: Option<(Vec<Record>, u128)>,
}

/// Result of [`QuietestPeriod::report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuietestReport {
    /// The quietest run, in arrival order, and its total count.
    Period { records: Vec<Record>, total: u128 },
    /// Fewer than `window` records were processed.
    TooFewRecords { window: usize },
}

impl fmt::Display for QuietestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuietestReport::Period { records, .. } => {
                let lines: Vec<String> = records.iter().map(Record::to_string).collect();
                write!(f, "{}", lines.join("\n"))
            }
            QuietestReport::TooFewRecords { window } => {
                write!(f, "There are less than {window} records in the input file.")
            }
        }
    }
}

impl QuietestPeriod {
    pub fn new(window: NonZeroUsize) -> Self {
        Self {
            window,
            current: VecDeque::with_capacity(window.get() + 1),
            current_total: 0,
            quietest: None,
        }
    }

    pub fn report(&self) -> QuietestReport {
        match &self.quietest {
            Some((records, total)) => QuietestReport::Period {
                records: records.clone(),
                total: *total,
            },
            None => QuietestReport::TooFewRecords {
                window: self.window.get(),
            },
        }
    }

    /// Length of the current run, at most `window`.
    pub fn size(&self) -> usize {
        self.current.len()
    }

    pub fn window(&self) -> usize {
        self.window.get()
    }

    fn remember_current(&mut self) {
        self.quietest = Some((self.current.iter().copied().collect(), self.current_total));
    }
}

impl Default for QuietestPeriod {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Aggregator for QuietestPeriod {
    fn process(&mut self, record: Record) {
        self.current.push_back(record);
        self.current_total += u128::from(record.count);

        if self.current.len() > self.window.get() {
            if let Some(oldest) = self.current.pop_front() {
                self.current_total -= u128::from(oldest.count);
            }
        }

        if self.current.len() < self.window.get() {
            return;
        }

        let quieter = self
            .quietest
            .as_ref()
            .is_none_or(|(_, best)| self.current_total < *best);
        if quieter {
            self.remember_current();
        }
    }
}
