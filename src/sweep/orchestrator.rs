//! Bounded-pool sweep over bit widths

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::optim::{OptimizationResult, SampleCountOptimizer};

use super::cancel::CancellationToken;
use super::curve::{fit_exponential, CurveFit, CurveFitError};

/// Bit widths swept when none are given
pub const DEFAULT_BIT_WIDTHS: std::ops::RangeInclusive<u32> = 2..=16;

/// Why a single bit width produced no result
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SweepTaskError {
    #[error("optimization failed: {0}")]
    Failed(String),

    #[error("optimization panicked: {0}")]
    Panicked(String),

    #[error("cancelled before start")]
    Cancelled,
}

/// Outcome of one bit width
pub type TaskOutcome = std::result::Result<OptimizationResult, SweepTaskError>;

/// Per-bit-width outcomes plus the trend fit over the successes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Keyed by bit width, independent of completion order
    pub outcomes: BTreeMap<u32, TaskOutcome>,
    /// `y = a·e^(b·x) + c` over successful `(bit width, best sample count)` points
    pub fit: std::result::Result<CurveFit, CurveFitError>,
}

impl SweepReport {
    fn from_outcomes(outcomes: BTreeMap<u32, TaskOutcome>) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = outcomes
            .iter()
            .filter_map(|(&bits, outcome)| {
                outcome
                    .as_ref()
                    .ok()
                    .map(|r| (f64::from(bits), r.best_sample_count as f64))
            })
            .unzip();
        let fit = fit_exponential(&xs, &ys);
        Self { outcomes, fit }
    }

    /// Best sample count of every successful bit width
    pub fn optima(&self) -> BTreeMap<u32, u64> {
        self.outcomes
            .iter()
            .filter_map(|(&bits, outcome)| {
                outcome.as_ref().ok().map(|r| (bits, r.best_sample_count))
            })
            .collect()
    }

    /// Failed bit widths and their errors
    pub fn failures(&self) -> BTreeMap<u32, &SweepTaskError> {
        self.outcomes
            .iter()
            .filter_map(|(&bits, outcome)| outcome.as_ref().err().map(|e| (bits, e)))
            .collect()
    }

    pub fn get(&self, bit_width: u32) -> Option<&TaskOutcome> {
        self.outcomes.get(&bit_width)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether every bit width succeeded
    pub fn is_complete(&self) -> bool {
        self.outcomes.values().all(|o| o.is_ok())
    }

    /// Optima and fit, or an error if any bit width failed or the fit failed
    pub fn into_result(self) -> Result<(BTreeMap<u32, u64>, CurveFit)> {
        let failed: Vec<u32> = self.failures().into_keys().collect();
        if !failed.is_empty() {
            return Err(Error::PartialSweepFailure {
                succeeded: self.outcomes.len() - failed.len(),
                failed,
            });
        }
        let fit = self.fit.clone()?;
        Ok((self.optima(), fit))
    }
}

/// Runs one [`SampleCountOptimizer`] per bit width on a bounded thread pool
///
/// Every task uses the same optimizer settings and seed, so the result for a
/// bit width does not depend on which other bit widths are swept.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    optimizer: SampleCountOptimizer,
    workers: usize,
    cancel: CancellationToken,
}

impl Sweep {
    pub fn new(optimizer: SampleCountOptimizer) -> Self {
        Self {
            optimizer,
            workers: 0,
            cancel: CancellationToken::new(),
        }
    }

    /// Pool size; `0` uses the available parallelism
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops tasks which have not started yet
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn optimizer(&self) -> &SampleCountOptimizer {
        &self.optimizer
    }

    /// Optimize every distinct bit width and fit the trend curve
    ///
    /// # Errors
    ///
    /// Only when the thread pool cannot be built. Per-bit-width failures are
    /// reported inside the [`SweepReport`].
    pub fn run(&self, bit_widths: &[u32]) -> Result<SweepReport> {
        let keys: Vec<u32> = bit_widths
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("sinetab-sweep-{i}"))
            .build()
            .map_err(|e| Error::config(format!("failed to build sweep pool: {e}")))?;

        info!(bit_widths = ?keys, workers = pool.current_num_threads(), "sweep started");

        let outcomes: BTreeMap<u32, TaskOutcome> = pool.install(|| {
            keys.par_iter()
                .map(|&bits| (bits, self.run_task(bits)))
                .collect()
        });

        let report = SweepReport::from_outcomes(outcomes);
        match &report.fit {
            Ok(fit) => info!(a = fit.a, b = fit.b, c = fit.c, "sweep trend fitted"),
            Err(e) => warn!(error = %e, "sweep trend fit unavailable"),
        }
        Ok(report)
    }

    fn run_task(&self, bit_width: u32) -> TaskOutcome {
        if self.cancel.is_cancelled() {
            return Err(SweepTaskError::Cancelled);
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| self.optimizer.optimize(bit_width)));
        let outcome = match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(SweepTaskError::Failed(e.to_string())),
            Err(payload) => Err(SweepTaskError::Panicked(panic_message(payload.as_ref()))),
        };

        match &outcome {
            Ok(r) => info!(bit_width, best_sample_count = r.best_sample_count, "bit width done"),
            Err(e) => warn!(bit_width, error = %e, "bit width failed"),
        }
        outcome
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
