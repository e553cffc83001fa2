mod models;
mod pipeline;

use std::io::{stdout, BufWriter};
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::Writer;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::models::{timestamp, HourlySummary};
use crate::pipeline::{Pipeline, PipelineConfig, RunOutcome, TimeWindow};

fn main() -> Result<()> {
    //NOTE: Three positional arguments do not warrant pulling in clap; revisit if the
    //      CLI surface ever grows beyond this.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: coffee-sales-pipeline [data_dir] [start] [end] [log_level:optional] > [summary].csv");
        eprintln!("Datetimes use the format YYYY-MM-DD HH:MM:SS");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let data_dir = Path::new(&args[1]);
    let start = parse_datetime(&args[2])?;
    let end = parse_datetime(&args[3])?;
    let log_level = args.get(4)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let pipeline = Pipeline::new(PipelineConfig::from_data_dir(data_dir));

    let timer = Instant::now();
    let outcome = pipeline.run(&TimeWindow::new(start, end))?;
    let duration = timer.elapsed();

    info!("Pipeline finished in: {duration:?}");

    match outcome {
        RunOutcome::Loaded(summary) => write_summary_to_stdout(&summary)?,
        RunOutcome::NoData => info!("No data produced for the requested window")
    }

    Ok(())
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, timestamp::TIMESTAMP_FORMAT)
        .with_context(|| format!("Invalid datetime [{value}], expected YYYY-MM-DD HH:MM:SS"))
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The summary CSV goes to stdout for redirection, so all logging must stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(summary: &[HourlySummary]) -> Result<()> {
    let mut writer = Writer::from_writer(BufWriter::new(stdout().lock()));

    for row in summary {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}
