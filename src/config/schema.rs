//! YAML schema for pipeline configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loss::{LossModel, DEFAULT_ALPHA, DEFAULT_PENALTY};
use crate::optim::{AcquisitionFunction, SampleCountOptimizer, SearchBounds, SearchBudget};
use crate::sweep::{Sweep, DEFAULT_BIT_WIDTHS};

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub table: TableSpec,

    #[serde(default)]
    pub loss: LossSpec,

    #[serde(default)]
    pub search: SearchSpec,

    #[serde(default)]
    pub sweep: SweepSpec,

    #[serde(default)]
    pub output: OutputSpec,
}

/// Table to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default = "default_bit_width")]
    pub bit_width: u32,

    /// Fixed sample count; the optimizer chooses one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u64>,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            bit_width: default_bit_width(),
            sample_count: None,
        }
    }
}

fn default_bit_width() -> u32 {
    8
}

/// Loss weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossSpec {
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    #[serde(default = "default_penalty")]
    pub penalty: f64,
}

impl Default for LossSpec {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            penalty: DEFAULT_PENALTY,
        }
    }
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_penalty() -> f64 {
    DEFAULT_PENALTY
}

/// Sample-count search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Lower bound; derived from the bit width when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,

    /// Upper bound; derived from the bit width when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,

    #[serde(default = "default_total_calls")]
    pub total_calls: usize,

    #[serde(default = "default_initial_points")]
    pub initial_points: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub acquisition: AcquisitionFunction,
}

impl Default for SearchSpec {
    fn default() -> Self {
        let budget = SearchBudget::default();
        Self {
            min: None,
            max: None,
            total_calls: budget.total_calls,
            initial_points: budget.initial_points,
            seed: default_seed(),
            acquisition: AcquisitionFunction::default(),
        }
    }
}

fn default_total_calls() -> usize {
    SearchBudget::default().total_calls
}

fn default_initial_points() -> usize {
    SearchBudget::default().initial_points
}

fn default_seed() -> u64 {
    crate::optim::DEFAULT_SEED
}

/// Multi-bit-width sweep settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    #[serde(default = "default_bit_widths")]
    pub bit_widths: Vec<u32>,

    /// Worker threads; `0` uses the available parallelism
    #[serde(default)]
    pub workers: usize,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            bit_widths: default_bit_widths(),
            workers: 0,
        }
    }
}

fn default_bit_widths() -> Vec<u32> {
    DEFAULT_BIT_WIDTHS.collect()
}

/// Emission targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Where to write the generated table module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_module: Option<PathBuf>,

    /// Existing files whose size declarations are updated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patch: Vec<PathBuf>,

    /// Where to export the table as CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
}

impl PipelineConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn loss_model(&self) -> LossModel {
        LossModel {
            alpha: self.loss.alpha,
            penalty: self.loss.penalty,
        }
    }

    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.search.total_calls, self.search.initial_points)
    }

    /// Explicit bounds, filling a missing side from the bit-width default
    ///
    /// Returns `None` when neither side is configured.
    pub fn explicit_bounds(&self, bit_width: u32) -> Result<Option<SearchBounds>> {
        match (self.search.min, self.search.max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) => SearchBounds::new(min, max).map(Some),
            (min, max) => {
                let default = SearchBounds::for_bit_width(bit_width)?;
                SearchBounds::new(min.unwrap_or(default.min()), max.unwrap_or(default.max()))
                    .map(Some)
            }
        }
    }

    /// Optimizer for `bit_width` with this configuration's loss, budget and seed
    pub fn optimizer(&self, bit_width: u32) -> Result<SampleCountOptimizer> {
        let optimizer = SampleCountOptimizer::new(self.loss_model())
            .with_budget(self.budget())
            .with_seed(self.search.seed)
            .with_acquisition(self.search.acquisition);
        Ok(match self.explicit_bounds(bit_width)? {
            Some(bounds) => optimizer.with_bounds(bounds),
            None => optimizer,
        })
    }

    /// Sweep over the configured bit widths
    ///
    /// Each bit width searches its own default range, so explicit
    /// `search.min`/`search.max` are rejected rather than dropped.
    pub fn sweep(&self) -> Result<Sweep> {
        if self.search.min.is_some() || self.search.max.is_some() {
            return Err(Error::config(
                "search.min/search.max apply to a single bit width; remove them to sweep",
            ));
        }
        let optimizer = SampleCountOptimizer::new(self.loss_model())
            .with_budget(self.budget())
            .with_seed(self.search.seed)
            .with_acquisition(self.search.acquisition);
        Ok(Sweep::new(optimizer).with_workers(self.sweep.workers))
    }
}
