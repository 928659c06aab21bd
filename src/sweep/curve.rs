//! Exponential trend fitting (Levenberg–Marquardt)

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_ITERATIONS: usize = 200;
const RELATIVE_TOLERANCE: f64 = 1e-12;
const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MAX: f64 = 1e12;

/// Offsets below `min(y)`, as fractions of the y span, tried for the initial `c`
const OFFSET_FRACTIONS: [f64; 7] = [1e-4, 1e-3, 1e-2, 0.1, 0.5, 1.0, 2.0];

/// Curve fitting errors
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CurveFitError {
    #[error("need at least 3 points, got {0}")]
    InsufficientPoints(usize),

    #[error("x has {xs} values but y has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("non-finite input value")]
    NonFinite,

    #[error("x values have no spread")]
    Degenerate,

    #[error("parameters diverged")]
    Diverged,
}

/// Fitted parameters of `y = a·e^(b·x) + c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Residual sum of squares at the solution
    pub residual: f64,
    pub iterations: usize,
    pub n_points: usize,
}

impl CurveFit {
    pub fn predict(&self, x: f64) -> f64 {
        model(&Vector3::new(self.a, self.b, self.c), x)
    }

    /// Root-mean-square residual
    pub fn rmse(&self) -> f64 {
        (self.residual / self.n_points as f64).sqrt()
    }
}

fn model(p: &Vector3<f64>, x: f64) -> f64 {
    p[0] * (p[1] * x).exp() + p[2]
}

fn sum_squares(p: &Vector3<f64>, xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| (y - model(p, x)).powi(2))
        .sum()
}

/// Fit `y = a·e^(b·x) + c` by nonlinear least squares
///
/// Starts from the best of several log-linear guesses and refines with
/// Marquardt-scaled damping until the relative change of the residual drops
/// below `1e-12` or no damped step improves it.
pub fn fit_exponential(xs: &[f64], ys: &[f64]) -> Result<CurveFit, CurveFitError> {
    if xs.len() != ys.len() {
        return Err(CurveFitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < 3 {
        return Err(CurveFitError::InsufficientPoints(xs.len()));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(CurveFitError::NonFinite);
    }

    let mut p = initial_guess(xs, ys)?;
    let mut sse = sum_squares(&p, xs, ys);
    let mut lambda = LAMBDA_INIT;
    let mut iterations = 0;

    'outer: while iterations < MAX_ITERATIONS {
        iterations += 1;

        let mut jtj = Matrix3::zeros();
        let mut jtr = Vector3::zeros();
        for (&x, &y) in xs.iter().zip(ys) {
            let e = (p[1] * x).exp();
            let j = Vector3::new(e, p[0] * x * e, 1.0);
            jtj += j * j.transpose();
            jtr += j * (y - model(&p, x));
        }

        loop {
            let mut damped = jtj;
            for i in 0..3 {
                damped[(i, i)] += lambda * jtj[(i, i)].max(1e-12);
            }
            let step = damped.cholesky().map(|chol| chol.solve(&jtr));
            let candidate = step.map(|s| p + s);

            if let Some(next) = candidate.filter(|c| c.iter().all(|v| v.is_finite())) {
                let next_sse = sum_squares(&next, xs, ys);
                if next_sse.is_finite() && next_sse < sse {
                    let improvement = sse - next_sse;
                    p = next;
                    sse = next_sse;
                    lambda = (lambda / 10.0).max(1e-15);
                    if improvement <= RELATIVE_TOLERANCE * sse.max(f64::MIN_POSITIVE) {
                        break 'outer;
                    }
                    continue 'outer;
                }
            }

            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                // no damped step improves the residual: local minimum
                break 'outer;
            }
        }
    }

    if p.iter().any(|v| !v.is_finite()) || !sse.is_finite() {
        return Err(CurveFitError::Diverged);
    }

    Ok(CurveFit {
        a: p[0],
        b: p[1],
        c: p[2],
        residual: sse,
        iterations,
        n_points: xs.len(),
    })
}

/// Lowest-residual log-linear start over a few offsets for `c`
fn initial_guess(xs: &[f64], ys: &[f64]) -> Result<Vector3<f64>, CurveFitError> {
    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    if sxx <= f64::EPSILON {
        return Err(CurveFitError::Degenerate);
    }

    let y_min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (y_max - y_min).max(1e-9);

    let mut best: Option<(Vector3<f64>, f64)> = None;
    for fraction in OFFSET_FRACTIONS {
        let c0 = y_min - fraction * span;
        let zs: Vec<f64> = ys.iter().map(|y| (y - c0).ln()).collect();
        let z_mean = zs.iter().sum::<f64>() / n;
        let sxz: f64 = xs
            .iter()
            .zip(&zs)
            .map(|(x, z)| (x - x_mean) * (z - z_mean))
            .sum();
        let b0 = sxz / sxx;
        let a0 = (z_mean - b0 * x_mean).exp();
        let p = Vector3::new(a0, b0, c0);
        let sse = sum_squares(&p, xs, ys);
        if sse.is_finite() && best.is_none_or(|(_, s)| sse < s) {
            best = Some((p, sse));
        }
    }

    best.map(|(p, _)| p).ok_or(CurveFitError::Diverged)
}
