use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim, Writer};
use tracing::info;

use crate::models::SaleRecord;
use crate::pipeline::errors::PipelineError;

const FILTERED_HEADERS: [&str; 7] = [
    "Date",
    "Time",
    "cash_type",
    "money",
    "coffee_name",
    "hour_of_day",
    "event_timestamp"
];

/// Inclusive datetime range used to restrict extraction to a subset of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Both bounds are inclusive. A missing timestamp never falls inside the
    /// window.
    pub fn contains(&self, timestamp: Option<NaiveDateTime>) -> bool {
        match timestamp {
            Some(timestamp) => self.start <= timestamp && timestamp <= self.end,
            None => false
        }
    }
}

/// Reads the raw sales dataset into memory.
///
/// Derives `event_timestamp` per row (unparsable pairs become `None`, never an
/// error), keeps only rows inside `window` when one is given, and writes the
/// filtered subset to `output` when a path is supplied, creating parent
/// directories as needed.
///
/// # Errors
/// Returns `PipelineError::Io` when the source is missing or unreadable and
/// `PipelineError::Csv` when a row is structurally malformed. Value-level
/// problems are left for the validation stage.
pub fn extract(
    source: &Path,
    window: Option<&TimeWindow>,
    output: Option<&Path>,
) -> Result<Vec<SaleRecord>, PipelineError> {
    info!("Extracting data from [{}]", source.display());

    let file = File::open(source).map_err(|error| PipelineError::io(source, error))?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();

    for result in reader.deserialize::<SaleRecord>() {
        let mut record = result?;
        record.event_timestamp = record.derive_timestamp();
        records.push(record);
    }

    info!("{} records loaded", records.len());

    if let Some(window) = window {
        records.retain(|record| window.contains(record.event_timestamp));
        info!("{} records found between [{}] and [{}]", records.len(), window.start, window.end);
    }

    if let Some(output) = output {
        write_filtered(&records, output)?;
        info!("Filtered subset saved to [{}]", output.display());
    }

    Ok(records)
}

fn write_filtered(records: &[SaleRecord], output: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|error| PipelineError::io(parent, error))?;
    }

    let file = File::create(output).map_err(|error| PipelineError::io(output, error))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    //NOTE: Serialization only emits headers alongside the first record, so an
    //      empty subset needs them written by hand to stay a readable table.
    if records.is_empty() {
        writer.write_record(FILTERED_HEADERS)?;
    }

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush().map_err(|error| PipelineError::io(output, error))?;

    Ok(())
}
