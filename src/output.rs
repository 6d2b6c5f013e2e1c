//! Report rendering.
//!
//! Supports the plain-text report, pretty JSON, and a flat CSV table.

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::aggregators::QuietestReport;
use crate::config::OutputFormat;
use crate::counter::{Ingested, SkippedLine};
use crate::record::{Record, TIMESTAMP_FORMAT};

#[derive(Debug, Serialize)]
struct DailyEntry {
    date: NaiveDate,
    count: u128,
}

/// Serializable view of a finished run.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    total: u128,
    daily: Vec<DailyEntry>,
    quietest: QuietestReport,
    largest: Vec<Record>,
    skipped_lines: &'a [SkippedLine],
}

impl<'a> Summary<'a> {
    pub fn from_ingested(ingested: &'a Ingested) -> Self {
        let counter = &ingested.counter;
        Summary {
            total: counter.daily.total(),
            daily: counter
                .daily
                .report()
                .into_iter()
                .map(|(date, count)| DailyEntry { date, count })
                .collect(),
            quietest: counter.quietest.report(),
            largest: counter.largest.report(),
            skipped_lines: &ingested.skipped,
        }
    }
}

/// One row of the CSV report.
#[derive(Debug, Serialize)]
struct ReportRow {
    section: &'static str,
    period: String,
    count: u128,
}

/// Writes the report for `ingested` to `out` in the requested format.
pub fn write_report<W: Write>(out: &mut W, ingested: &Ingested, format: OutputFormat) -> Result<()> {
    debug!(?format, "Writing report");
    let summary = Summary::from_ingested(ingested);
    match format {
        OutputFormat::Text => write_text(out, &summary),
        OutputFormat::Json => write_json(out, &summary),
        OutputFormat::Csv => write_csv(out, &summary),
    }
}

/// The human-readable report, preceded by one diagnostic per skipped line.
pub fn write_text<W: Write>(out: &mut W, summary: &Summary<'_>) -> Result<()> {
    for skipped in summary.skipped_lines {
        writeln!(out, "{}", skipped.diagnostic())?;
    }

    let daily: Vec<String> = summary
        .daily
        .iter()
        .map(|d| format!("{} {}", d.date.format("%Y-%m-%d"), d.count))
        .collect();
    let largest: Vec<String> = summary.largest.iter().map(Record::to_string).collect();

    let window = match &summary.quietest {
        QuietestReport::Period { records, .. } => records.len(),
        QuietestReport::TooFewRecords { window } => *window,
    };

    write!(out, "\nTotal car count: {}\n\n", summary.total)?;
    write!(out, "Daily counts:\n{}\n\n", daily.join("\n"))?;
    write!(
        out,
        "Consecutive {} half-hourly measurements with lowest cumulative count:\n{}\n\n",
        number_word(window),
        summary.quietest
    )?;
    write!(
        out,
        "Largest half-hourly counts in the file:\n{}\n\n",
        largest.join("\n")
    )?;

    Ok(())
}

/// Pretty-printed JSON of the whole [`Summary`].
pub fn write_json<W: Write>(out: &mut W, summary: &Summary<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}

/// Flat `section,period,count` table. Skipped lines are not included.
pub fn write_csv<W: Write>(out: &mut W, summary: &Summary<'_>) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);

    writer.serialize(ReportRow {
        section: "total",
        period: String::new(),
        count: summary.total,
    })?;

    for d in &summary.daily {
        writer.serialize(ReportRow {
            section: "daily",
            period: d.date.format("%Y-%m-%d").to_string(),
            count: d.count,
        })?;
    }

    if let QuietestReport::Period { records, .. } = &summary.quietest {
        for r in records {
            writer.serialize(record_row("quietest", r))?;
        }
    }

    for r in &summary.largest {
        writer.serialize(record_row("largest", r))?;
    }

    writer.flush()?;
    Ok(())
}

fn record_row(section: &'static str, record: &Record) -> ReportRow {
    ReportRow {
        section,
        period: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        count: u128::from(record.count),
    }
}

fn number_word(n: usize) -> String {
    const WORDS: [&str; 11] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS
        .get(n)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string())
}
