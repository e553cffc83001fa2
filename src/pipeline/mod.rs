mod errors;
mod extract;
mod load;
mod runner;
mod transform;
mod validate;

pub use errors::{PipelineError, ValidationError, Violation};
pub use extract::{extract, TimeWindow};
pub use load::{load, read_summary};
pub use runner::{Pipeline, PipelineConfig, RunOutcome};
pub use transform::aggregate;
pub use validate::{expectations, validate, Expectation};
