//! Error types for sinetab
//!
//! Quantizer and loss errors are deterministic: the same inputs always fail the
//! same way, so callers surface them immediately instead of retrying.

use thiserror::Error;

use crate::sweep::CurveFitError;

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid bit width, sample count, bounds, loss weights or config values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// More initial design points were requested than the total call budget
    #[error("Search budget error: {initial_points} initial points exceed {total_calls} total calls")]
    SearchBudget {
        initial_points: usize,
        total_calls: usize,
    },

    /// Some bit widths of a sweep failed while others succeeded
    #[error("Partial sweep failure: bit widths {failed:?} failed ({succeeded} succeeded)")]
    PartialSweepFailure { failed: Vec<u32>, succeeded: usize },

    /// The surrogate model could not be fitted
    #[error("Surrogate error: {0}")]
    Surrogate(String),

    #[error("Curve fit failed: {0}")]
    CurveFit(#[from] CurveFitError),

    #[error("Declaration patch failed: {0}")]
    Patch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for sinetab operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a configuration error
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
