//! Acquisition strategies

use serde::{Deserialize, Serialize};

use crate::optim::acquisition::{normal_cdf, normal_pdf};

/// Acquisition function maximized to choose the next candidate
///
/// All variants treat the objective as minimized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcquisitionFunction {
    /// Expected Improvement with exploration margin `xi`
    ExpectedImprovement { xi: f64 },
    /// Probability of Improvement with exploration margin `xi`
    ProbabilityOfImprovement { xi: f64 },
    /// Negated lower confidence bound `-(mean - kappa * std)`
    LowerConfidenceBound { kappa: f64 },
}

impl Default for AcquisitionFunction {
    fn default() -> Self {
        AcquisitionFunction::ExpectedImprovement { xi: 0.01 }
    }
}

impl AcquisitionFunction {
    /// Acquisition value for a posterior `(mean, std)` given the incumbent `best`
    pub fn evaluate(&self, mean: f64, std: f64, best: f64) -> f64 {
        match *self {
            AcquisitionFunction::ExpectedImprovement { xi } => {
                let improvement = best - mean - xi;
                if std <= f64::EPSILON {
                    return improvement.max(0.0);
                }
                let z = improvement / std;
                improvement * normal_cdf(z) + std * normal_pdf(z)
            }
            AcquisitionFunction::ProbabilityOfImprovement { xi } => {
                let improvement = best - mean - xi;
                if std <= f64::EPSILON {
                    return if improvement > 0.0 { 1.0 } else { 0.0 };
                }
                normal_cdf(improvement / std)
            }
            AcquisitionFunction::LowerConfidenceBound { kappa } => -(mean - kappa * std),
        }
    }
}
