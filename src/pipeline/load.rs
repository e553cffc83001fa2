use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::{Reader, Writer};
use tracing::info;

use crate::models::HourlySummary;
use crate::pipeline::errors::PipelineError;

/// Persists the aggregated summary, replacing any previous content at the
/// target path.
///
/// Returns `false` without touching the filesystem when there is nothing to
/// persist, `true` after a successful write.
pub fn load(summary: &[HourlySummary], output: &Path) -> Result<bool, PipelineError> {
    if summary.is_empty() {
        info!("Empty summary received, nothing to persist");
        return Ok(false);
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|error| PipelineError::io(parent, error))?;
    }

    let file = File::create(output).map_err(|error| PipelineError::io(output, error))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    for row in summary {
        writer.serialize(row)?;
    }

    writer.flush().map_err(|error| PipelineError::io(output, error))?;

    info!("Summary with {} row(s) saved to [{}]", summary.len(), output.display());

    Ok(true)
}

/// Reads a persisted summary back into its structured form, reparsing the
/// JSON-encoded `vendas_por_tipo` column. This is the reader half of the
/// loader boundary the dashboard side consumes.
pub fn read_summary(path: &Path) -> Result<Vec<HourlySummary>, PipelineError> {
    let file = File::open(path).map_err(|error| PipelineError::io(path, error))?;
    let mut reader = Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();

    for result in reader.deserialize::<HourlySummary>() {
        rows.push(result?);
    }

    Ok(rows)
}
