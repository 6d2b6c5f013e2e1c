//! Ingestion: folds a line stream into the three aggregators.

use serde::Serialize;
use std::io::{self, BufRead};
use tracing::{debug, info, warn};

use crate::aggregators::{Aggregator, DailyCounts, LargestCounts, QuietestPeriod};
use crate::config::Config;
use crate::parser::{ParseError, parse_line};
use crate::record::Record;

/// All aggregator state for one run.
#[derive(Debug, Clone)]
pub struct CarCounter {
    pub daily: DailyCounts,
    pub quietest: QuietestPeriod,
    pub largest: LargestCounts,
}

impl CarCounter {
    pub fn new(config: &Config) -> Self {
        Self {
            daily: DailyCounts::new(),
            quietest: QuietestPeriod::new(config.window),
            largest: LargestCounts::new(config.top_n),
        }
    }
}

impl Default for CarCounter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Aggregator for CarCounter {
    fn process(&mut self, record: Record) {
        self.daily.process(record);
        self.quietest.process(record);
        self.largest.process(record);
    }
}

/// A line that could not be parsed and was left out of every aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: ParseError,
}

impl SkippedLine {
    /// Diagnostic printed alongside the text report.
    pub fn diagnostic(&self) -> String {
        format!(
            "Line {} of input could not be parsed. Skipping.",
            self.line_number
        )
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub counter: CarCounter,
    pub skipped: Vec<SkippedLine>,
    pub lines: usize,
}

impl Ingested {
    /// Number of lines that made it into the aggregates.
    pub fn records(&self) -> usize {
        self.lines - self.skipped.len()
    }
}

/// Reads `reader` to the end, feeding every well-formed line to `counter`.
///
/// Malformed lines are logged and collected in [`Ingested::skipped`]; they
/// never reach the aggregators.
///
/// # Errors
///
/// Only I/O errors from `reader` (including invalid UTF-8) abort the run.
#[tracing::instrument(skip_all)]
pub fn ingest<R: BufRead>(reader: R, mut counter: CarCounter) -> io::Result<Ingested> {
    let mut skipped = Vec::new();
    let mut lines = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        lines = line_number;

        match parse_line(&line) {
            Ok(record) => counter.process(record),
            Err(error) => {
                warn!(line_number, error = %error, "Skipping unparseable line");
                skipped.push(SkippedLine { line_number, error });
            }
        }
    }

    let ingested = Ingested {
        counter,
        skipped,
        lines,
    };

    info!(
        lines,
        records = ingested.records(),
        skipped = ingested.skipped.len(),
        days = ingested.counter.daily.len(),
        "Input consumed"
    );
    debug!(total = ingested.counter.daily.total(), "Total car count");

    Ok(ingested)
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
