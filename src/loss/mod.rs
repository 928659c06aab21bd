//! Sample-count objective
//!
//! Scores a `(bit_width, sample_count)` pair as
//! `redundancy - alpha * sample_count + penalty`, where redundancy counts the
//! duplicate codes the table wastes and the penalty fires when the table never
//! reaches full scale. The `-alpha * sample_count` term favours larger sample
//! counts whenever redundancy and the penalty are flat.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quant::{generate, max_code, WaveformTable};

/// Default weight of the sample-count bias term
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default dynamic-range penalty
pub const DEFAULT_PENALTY: f64 = 1000.0;

/// Individual loss terms for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    /// `sample_count - unique_count`
    pub redundancy: f64,
    /// `-alpha * sample_count`
    pub bias: f64,
    /// `penalty` when the maximum code is missed, otherwise `0`
    pub penalty: f64,
    /// Sum of the three terms
    pub total: f64,
}

/// Loss model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossModel {
    pub alpha: f64,
    pub penalty: f64,
}

impl Default for LossModel {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl LossModel {
    /// Create a loss model, rejecting negative or non-finite weights
    pub fn new(alpha: f64, penalty: f64) -> Result<Self> {
        let model = Self { alpha, penalty };
        model.validate()?;
        Ok(model)
    }

    /// Set the bias weight
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the dynamic-range penalty
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(Error::config(format!(
                "alpha {} must be finite and >= 0",
                self.alpha
            )));
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(Error::config(format!(
                "penalty {} must be finite and >= 0",
                self.penalty
            )));
        }
        Ok(())
    }

    /// Loss for `(bit_width, sample_count)`
    pub fn score(&self, bit_width: u32, sample_count: u64) -> Result<f64> {
        Ok(self.breakdown(bit_width, sample_count)?.total)
    }

    /// Loss terms for `(bit_width, sample_count)`
    pub fn breakdown(&self, bit_width: u32, sample_count: u64) -> Result<LossBreakdown> {
        self.validate()?;
        let table = generate(bit_width, sample_count)?;
        Ok(self.breakdown_table(&table))
    }

    /// Loss terms for an already generated table
    pub fn breakdown_table(&self, table: &WaveformTable) -> LossBreakdown {
        let sample_count = table.sample_count() as f64;
        // signed: a short window can hold fewer distinct codes than samples
        let redundancy = sample_count - table.unique_count() as f64;
        let bias = -self.alpha * sample_count;
        let penalty = match table.max() {
            Some(max) if max >= max_code(table.bit_width()) => 0.0,
            _ => self.penalty,
        };

        LossBreakdown {
            redundancy,
            bias,
            penalty,
            total: redundancy + bias + penalty,
        }
    }
}

/// Score with the default model
pub fn score(bit_width: u32, sample_count: u64) -> Result<f64> {
    LossModel::default().score(bit_width, sample_count)
}
