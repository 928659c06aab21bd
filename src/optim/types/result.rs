//! Evaluation trace and search result

use serde::{Deserialize, Serialize};

/// Which phase of the search produced an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationPhase {
    /// Space-filling design
    Initial,
    /// Acquisition-maximizing candidate
    Guided,
}

/// One loss evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub sample_count: u64,
    pub loss: f64,
    pub phase: EvaluationPhase,
}

/// Outcome of one sample-count search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub bit_width: u32,
    pub best_sample_count: u64,
    pub best_loss: f64,
    /// Every evaluation in the order it was made
    pub trace: Vec<Evaluation>,
}

impl OptimizationResult {
    pub fn n_evaluations(&self) -> usize {
        self.trace.len()
    }

    /// Evaluations made by the given phase
    pub fn phase_count(&self, phase: EvaluationPhase) -> usize {
        self.trace.iter().filter(|e| e.phase == phase).count()
    }

    /// Running minimum of the loss after each evaluation
    pub fn convergence(&self) -> Vec<f64> {
        self.trace
            .iter()
            .scan(f64::INFINITY, |best, e| {
                *best = best.min(e.loss);
                Some(*best)
            })
            .collect()
    }
}
