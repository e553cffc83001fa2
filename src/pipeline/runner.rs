use std::path::{Path, PathBuf};

use tracing::info;

use crate::models::HourlySummary;
use crate::pipeline::errors::PipelineError;
use crate::pipeline::extract::{extract, TimeWindow};
use crate::pipeline::load::load;
use crate::pipeline::transform::aggregate;
use crate::pipeline::validate::validate;

/// Every path the pipeline touches, passed in explicitly so a run never
/// depends on the process working directory.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw point-of-sale dataset.
    pub raw_path: PathBuf,
    /// Intermediate file holding the window-filtered subset.
    pub filtered_path: PathBuf,
    /// Final hourly summary consumed by the dashboard.
    pub summary_path: PathBuf
}

impl PipelineConfig {
    /// Conventional layout under a single data directory.
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self {
            raw_path: data_dir.join("raw").join("coffee_sales_data.csv"),
            filtered_path: data_dir.join("staging").join("coffee_sales_filtered.csv"),
            summary_path: data_dir.join("processed").join("coffee_sales_summary.csv")
        }
    }
}

/// Result of a pipeline run that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The summary was aggregated and written to the configured sink.
    Loaded(Vec<HourlySummary>),
    /// The window produced no aggregatable rows; nothing was written.
    NoData
}

/// Sequences the batch stages over a fixed set of paths.
pub struct Pipeline {
    config: PipelineConfig
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs extract, validate, transform and load for the given window.
    ///
    /// Any stage failure aborts the whole run; there are no retries and no
    /// partial recovery. A window that matches nothing is not a failure and
    /// reports `RunOutcome::NoData` instead.
    pub fn run(&self, window: &TimeWindow) -> Result<RunOutcome, PipelineError> {
        let records = extract(
            &self.config.raw_path,
            Some(window),
            Some(&self.config.filtered_path),
        )?;

        if records.is_empty() {
            info!("No records in window, skipping the remaining stages");
            return Ok(RunOutcome::NoData);
        }

        validate(&records)?;

        let summary = aggregate(&records);
        let written = load(&summary, &self.config.summary_path)?;

        if written {
            Ok(RunOutcome::Loaded(summary))
        } else {
            Ok(RunOutcome::NoData)
        }
    }
}
