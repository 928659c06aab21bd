//! Concurrent multi-bit-width sweep and trend fitting
//!
//! Runs one independent sample-count search per bit width on a bounded
//! thread pool, keys every outcome by bit width, and fits
//! `y = a·e^(b·x) + c` to the successful optima.

mod cancel;
mod curve;
mod orchestrator;

#[cfg(test)]
mod tests;

pub use cancel::CancellationToken;
pub use curve::{fit_exponential, CurveFit, CurveFitError};
pub use orchestrator::{Sweep, SweepReport, SweepTaskError, TaskOutcome, DEFAULT_BIT_WIDTHS};
