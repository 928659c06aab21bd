//! Matérn-5/2 covariance

use serde::{Deserialize, Serialize};

/// Matérn covariance with ν = 5/2 and unit signal variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaternKernel {
    pub length_scale: f64,
}

impl MaternKernel {
    pub fn new(length_scale: f64) -> Self {
        Self { length_scale }
    }

    /// `k(a, b) = (1 + √5·r + 5r²/3)·exp(-√5·r)` with `r = |a - b| / ℓ`
    pub fn covariance(&self, a: f64, b: f64) -> f64 {
        let r = (a - b).abs() / self.length_scale;
        let s = 5f64.sqrt() * r;
        (1.0 + s + s * s / 3.0) * (-s).exp()
    }
}
