//! CLI entry point for the car counter.
//!
//! Reads `<timestamp> <count>` lines from a file or stdin and writes the
//! total, daily, quietest-period and largest-count reports to a file or
//! stdout.

use anyhow::{Context, Result};
use car_counter::config::Config;
use car_counter::counter::{CarCounter, ingest};
use car_counter::output::write_report;
use clap::Parser;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const ABOUT: &str = "Process car counter data and report:
 - Total car count: cumulative total across the entire input.
 - Daily counts: cumulative totals grouped by date.
 - Lowest count period: the consecutive half-hour observations with the lowest cumulative count.
 - Largest observations: the top observations in the input.

Each input line is `<YYYY-MM-DDTHH:MM:SS> <count>`. Lines that cannot be parsed are skipped.

Environment:
  CAR_COUNTER_TOP_N   number of largest observations to list (default 3)
  CAR_COUNTER_WINDOW  length of the lowest count period (default 3)
  CAR_COUNTER_FORMAT  text, json or csv (default text)
  LOG_FILE_PATH       also write JSON logs to this daily-rolling file";

#[derive(Parser)]
#[command(name = "car_counter", version)]
#[command(about = "Summarise half-hourly car counts", long_about = ABOUT)]
struct Cli {
    /// Path to file to process. If not specified stdin is used.
    #[arg(long, value_name = "PATH")]
    path_in: Option<PathBuf>,

    /// Results output to this path. If not specified stdout is used.
    #[arg(long, value_name = "PATH")]
    path_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!(?config, "Configuration loaded");

    let input: Box<dyn BufRead> = match &cli.path_in {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let ingested = ingest(input, CarCounter::new(&config)).context("Failed to read input")?;

    let mut output: Box<dyn Write> = match &cli.path_out {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    write_report(&mut output, &ingested, config.format).context("Failed to write report")?;
    output.flush().context("Failed to flush report")?;

    match &cli.path_out {
        Some(path) => info!(path = %path.display(), "Report written"),
        None => info!("Report written to stdout"),
    }

    Ok(())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set.
fn init_tracing() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let path = Path::new(&log_file_path);
            let log_dir = path.parent().unwrap_or(Path::new("logs"));
            let log_file_name = path.file_name().unwrap_or(OsStr::new("car_counter.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
