pub mod batch;
pub mod config;
pub mod error;
pub mod measure;

pub use batch::{Batch, SENTINEL_LABEL};
pub use config::{EvalConfig, Method};
pub use error::{ListEvalError, Result};
pub use measure::ListwiseEvaluator;
