//! Bayesian optimizer over a bounded integer sample count

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::loss::LossModel;
use crate::optim::design::latin_hypercube;
use crate::optim::gp::GaussianProcess;
use crate::optim::types::{
    AcquisitionFunction, Evaluation, EvaluationPhase, OptimizationResult, SearchBounds,
    SearchBudget,
};

use super::candidates::{candidate_pool, DEFAULT_POOL_SIZE};

/// Default seed for reproducible searches
pub const DEFAULT_SEED: u64 = 42;

/// Gaussian-process optimizer for the sample count of one bit width
///
/// Each call to [`optimize`](Self::optimize) owns its RNG, trace and surrogate,
/// so one optimizer can be shared across threads.
#[derive(Debug, Clone)]
pub struct SampleCountOptimizer {
    loss: LossModel,
    bounds: Option<SearchBounds>,
    budget: SearchBudget,
    seed: u64,
    acquisition: AcquisitionFunction,
    pool_size: usize,
}

impl Default for SampleCountOptimizer {
    fn default() -> Self {
        Self::new(LossModel::default())
    }
}

impl SampleCountOptimizer {
    /// Create an optimizer for `loss` with default budget, seed and acquisition
    pub fn new(loss: LossModel) -> Self {
        Self {
            loss,
            bounds: None,
            budget: SearchBudget::default(),
            seed: DEFAULT_SEED,
            acquisition: AcquisitionFunction::default(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Fix the search range instead of deriving it from the bit width
    pub fn with_bounds(mut self, bounds: SearchBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_acquisition(mut self, acquisition: AcquisitionFunction) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Set how many candidates are scored per guided step
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    pub fn loss(&self) -> &LossModel {
        &self.loss
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Search range used for `bit_width`
    pub fn bounds_for(&self, bit_width: u32) -> Result<SearchBounds> {
        match self.bounds {
            Some(bounds) => {
                bounds.validate()?;
                Ok(bounds)
            }
            None => SearchBounds::for_bit_width(bit_width),
        }
    }

    /// Find the sample count with the lowest loss for `bit_width`
    ///
    /// Never evaluates a sample count twice. Stops early once every integer in
    /// the range has been evaluated, so the trace may be shorter than
    /// `total_calls` for narrow ranges.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for invalid bounds, budget or loss weights
    /// - [`Error::SearchBudget`] when `initial_points > total_calls`
    /// - any quantizer or surrogate error raised during evaluation
    pub fn optimize(&self, bit_width: u32) -> Result<OptimizationResult> {
        let bounds = self.bounds_for(bit_width)?;
        self.budget.validate()?;
        self.loss.validate()?;

        let mut search = Search::new(self.loss, bit_width);
        let mut rng = StdRng::seed_from_u64(self.seed);

        for sample_count in latin_hypercube(&bounds, self.budget.initial_points, &mut rng) {
            if search.trace.len() >= self.budget.total_calls {
                break;
            }
            if !search.evaluated.contains(&sample_count) {
                search.evaluate(sample_count, EvaluationPhase::Initial)?;
            }
        }

        while search.trace.len() < self.budget.total_calls {
            let Some(next) = self.next_candidate(&search, &bounds, &mut rng)? else {
                debug!(bit_width, "search range exhausted");
                break;
            };
            search.evaluate(next, EvaluationPhase::Guided)?;
        }

        let result = search.finish()?;
        info!(
            bit_width,
            best_sample_count = result.best_sample_count,
            best_loss = result.best_loss,
            evaluations = result.n_evaluations(),
            "sample count search complete"
        );
        Ok(result)
    }

    /// Unevaluated candidate with the highest acquisition value
    fn next_candidate(
        &self,
        search: &Search,
        bounds: &SearchBounds,
        rng: &mut StdRng,
    ) -> Result<Option<u64>> {
        let Some(incumbent) = search.best() else {
            return Ok(None);
        };
        let pool = candidate_pool(
            bounds,
            &search.evaluated,
            incumbent.sample_count,
            self.pool_size,
            rng,
        );
        if pool.is_empty() {
            return Ok(None);
        }

        let xs: Vec<f64> = search
            .trace
            .iter()
            .map(|e| bounds.normalize(e.sample_count))
            .collect();
        let ys: Vec<f64> = search.trace.iter().map(|e| e.loss).collect();
        let gp = GaussianProcess::fit(&xs, &ys)?;

        let mut best: Option<(u64, f64)> = None;
        for candidate in pool {
            let (mean, std) = gp.predict(bounds.normalize(candidate));
            let score = self.acquisition.evaluate(mean, std, incumbent.loss);
            // strict comparison keeps the smallest sample count on ties
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        Ok(best.map(|(candidate, _)| candidate))
    }
}

/// Mutable state of one `optimize` call
struct Search {
    loss: LossModel,
    bit_width: u32,
    evaluated: HashSet<u64>,
    trace: Vec<Evaluation>,
}

impl Search {
    fn new(loss: LossModel, bit_width: u32) -> Self {
        Self {
            loss,
            bit_width,
            evaluated: HashSet::new(),
            trace: Vec::new(),
        }
    }

    fn evaluate(&mut self, sample_count: u64, phase: EvaluationPhase) -> Result<()> {
        let loss = self.loss.score(self.bit_width, sample_count)?;
        debug!(bit_width = self.bit_width, sample_count, loss, ?phase, "evaluated");
        self.evaluated.insert(sample_count);
        self.trace.push(Evaluation {
            sample_count,
            loss,
            phase,
        });
        Ok(())
    }

    /// Lowest loss so far; the earliest evaluation wins ties
    fn best(&self) -> Option<&Evaluation> {
        self.trace.iter().fold(None, |best, e| match best {
            Some(b) if b.loss <= e.loss => Some(b),
            _ => Some(e),
        })
    }

    fn finish(self) -> Result<OptimizationResult> {
        let best = *self
            .best()
            .ok_or_else(|| Error::config("search made no evaluations"))?;
        Ok(OptimizationResult {
            bit_width: self.bit_width,
            best_sample_count: best.sample_count,
            best_loss: best.loss,
            trace: self.trace,
        })
    }
}

/// Optimize the sample count for `bit_width` with the default loss model
pub fn optimize(
    bit_width: u32,
    bounds: SearchBounds,
    budget: SearchBudget,
    seed: u64,
) -> Result<OptimizationResult> {
    SampleCountOptimizer::default()
        .with_bounds(bounds)
        .with_budget(budget)
        .with_seed(seed)
        .optimize(bit_width)
}
