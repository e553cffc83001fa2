use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error for [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError)
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// A single failed expectation, named after the rule that rejected the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub expectation: &'static str,
    pub detail: String
}

/// Raised when one or more data-quality expectations fail. The whole suite
/// runs before this is built, so every violated rule is reported at once.
#[derive(Debug, Error)]
#[error("Validation failed: {}", format_violations(violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>
}

fn format_violations(violations: &[Violation]) -> String {
    violations.iter()
        .map(|violation| format!("[{}] {}", violation.expectation, violation.detail))
        .collect::<Vec<_>>()
        .join("; ")
}
