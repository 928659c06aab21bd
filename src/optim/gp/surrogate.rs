//! Exact GP regression on a single input dimension

use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use tracing::trace;

use crate::error::{Error, Result};

use super::kernel::MaternKernel;

/// Length scales tried when fitting, in normalized input units
const LENGTH_SCALES: [f64; 7] = [0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0];

/// Diagonal jitter added to the kernel matrix, escalated if factorization fails
const NUGGETS: [f64; 4] = [1e-6, 1e-4, 1e-2, 1e-1];

/// Gaussian process fitted to standardized targets
///
/// Inputs are expected in `[0, 1]`. Targets are centred and scaled before
/// fitting and predictions are mapped back to the original units.
#[derive(Debug, Clone)]
pub struct GaussianProcess {
    kernel: MaternKernel,
    nugget: f64,
    xs: Vec<f64>,
    chol: Cholesky<f64, Dyn>,
    alpha: DVector<f64>,
    y_mean: f64,
    y_std: f64,
    log_likelihood: f64,
}

impl GaussianProcess {
    /// Fit a GP, choosing the length scale with the highest log marginal likelihood
    ///
    /// # Errors
    ///
    /// [`Error::Surrogate`] when the inputs are empty, mismatched, non-finite, or
    /// no kernel matrix could be factorized.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.is_empty() || xs.len() != ys.len() {
            return Err(Error::Surrogate(format!(
                "need matching non-empty inputs, got {} x and {} y",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(Error::Surrogate("non-finite training data".to_string()));
        }

        let n = ys.len() as f64;
        let y_mean = ys.iter().sum::<f64>() / n;
        let variance = ys.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / n;
        let y_std = if variance > 1e-24 { variance.sqrt() } else { 1.0 };
        let targets = DVector::from_iterator(ys.len(), ys.iter().map(|y| (y - y_mean) / y_std));

        let mut best: Option<Self> = None;
        for &nugget in &NUGGETS {
            for &length_scale in &LENGTH_SCALES {
                let kernel = MaternKernel::new(length_scale);
                let Some(candidate) = Self::fit_with(kernel, nugget, xs, &targets, y_mean, y_std)
                else {
                    continue;
                };
                trace!(length_scale, nugget, lml = candidate.log_likelihood, "gp candidate");
                if best
                    .as_ref()
                    .is_none_or(|b| candidate.log_likelihood > b.log_likelihood)
                {
                    best = Some(candidate);
                }
            }
            if best.is_some() {
                break;
            }
        }

        best.ok_or_else(|| Error::Surrogate("kernel matrix is not positive definite".to_string()))
    }

    fn fit_with(
        kernel: MaternKernel,
        nugget: f64,
        xs: &[f64],
        targets: &DVector<f64>,
        y_mean: f64,
        y_std: f64,
    ) -> Option<Self> {
        let n = xs.len();
        let k = DMatrix::from_fn(n, n, |i, j| {
            kernel.covariance(xs[i], xs[j]) + if i == j { nugget } else { 0.0 }
        });
        let chol = k.cholesky()?;
        let alpha = chol.solve(targets);

        let log_det: f64 = chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>() * 2.0;
        let log_likelihood = -0.5 * targets.dot(&alpha)
            - 0.5 * log_det
            - 0.5 * n as f64 * (2.0 * std::f64::consts::PI).ln();
        if !log_likelihood.is_finite() {
            return None;
        }

        Some(Self {
            kernel,
            nugget,
            xs: xs.to_vec(),
            chol,
            alpha,
            y_mean,
            y_std,
            log_likelihood,
        })
    }

    /// Posterior `(mean, std)` at `x`, in the original target units
    pub fn predict(&self, x: f64) -> (f64, f64) {
        let k_star = DVector::from_iterator(
            self.xs.len(),
            self.xs.iter().map(|&xi| self.kernel.covariance(x, xi)),
        );
        let mean = k_star.dot(&self.alpha);
        let v = self.chol.solve(&k_star);
        let variance = (1.0 - k_star.dot(&v)).max(0.0);

        (
            self.y_mean + mean * self.y_std,
            variance.sqrt() * self.y_std,
        )
    }

    /// Chosen kernel
    pub fn kernel(&self) -> MaternKernel {
        self.kernel
    }

    /// Diagonal jitter used for the chosen fit
    pub fn nugget(&self) -> f64 {
        self.nugget
    }

    /// Log marginal likelihood of the standardized targets
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    pub fn n_points(&self) -> usize {
        self.xs.len()
    }
}
