//! Configuration-driven generation pipeline
//!
//! The chosen sample count flows explicitly from the optimizer into table
//! generation, sizing and emission; nothing is stashed in shared state
//! between the steps.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::config::{validate_config, PipelineConfig};
use crate::emit::{patch_file, write_csv_file, write_table_module, TableSizing};
use crate::error::Result;
use crate::optim::OptimizationResult;
use crate::quant::{generate, WaveformTable};

/// Everything computed by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub bit_width: u32,
    pub sample_count: u64,
    /// Present when the sample count was searched rather than fixed
    pub optimization: Option<OptimizationResult>,
    pub table: WaveformTable,
    pub sizing: TableSizing,
}

/// A patched file and the number of declarations it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchedFile {
    pub path: PathBuf,
    pub replaced: usize,
}

/// Files written by [`Pipeline::emit`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionReport {
    pub table_module: Option<PathBuf>,
    pub patched: Vec<PatchedFile>,
    pub csv: Option<PathBuf>,
}

impl EmissionReport {
    /// Number of files touched
    pub fn files_written(&self) -> usize {
        usize::from(self.table_module.is_some()) + self.patched.len() + usize::from(self.csv.is_some())
    }
}

/// Config → optimize → generate → size → emit
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Choose the sample count and build the table
    ///
    /// A fixed `table.sample_count` skips the search entirely.
    pub fn run(&self) -> Result<PipelineOutput> {
        validate_config(&self.config)?;
        let bit_width = self.config.table.bit_width;

        let (sample_count, optimization) = match self.config.table.sample_count {
            Some(fixed) => (fixed, None),
            None => {
                let result = self.config.optimizer(bit_width)?.optimize(bit_width)?;
                (result.best_sample_count, Some(result))
            }
        };

        let table = generate(bit_width, sample_count)?;
        let sizing = TableSizing::from_table(&table);
        info!(
            bit_width,
            sample_count,
            entries = table.len(),
            searched = optimization.is_some(),
            "pipeline produced table"
        );

        Ok(PipelineOutput {
            bit_width,
            sample_count,
            optimization,
            table,
            sizing,
        })
    }

    /// Write the configured outputs for `output`
    ///
    /// Patch targets must already exist; a missing file fails the emission.
    pub fn emit(&self, output: &PipelineOutput) -> Result<EmissionReport> {
        let targets = &self.config.output;
        let mut report = EmissionReport::default();

        if let Some(path) = &targets.table_module {
            write_table_module(path, &output.table)?;
            report.table_module = Some(path.clone());
        }

        let declarations = output.sizing.declarations();
        for path in &targets.patch {
            let replaced = patch_file(path, &declarations)?;
            report.patched.push(PatchedFile {
                path: path.clone(),
                replaced,
            });
        }

        if let Some(path) = &targets.csv {
            write_csv_file(path, output.table.values())?;
            report.csv = Some(path.clone());
        }

        info!(files = report.files_written(), "pipeline emission complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn fast_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.table.bit_width = 6;
        config.search.total_calls = 15;
        config.search.initial_points = 5;
        config
    }

    #[test]
    fn test_fixed_sample_count_skips_search() {
        let mut config = fast_config();
        config.table.sample_count = Some(256);
        let output = Pipeline::new(config).run().unwrap();
        assert!(output.optimization.is_none());
        assert_eq!(output.sample_count, 256);
        assert_eq!(output.table.len(), 128);
        assert_eq!(output.sizing.table_size, 128);
        assert_eq!(output.sizing.table_reg_size, 8);
        assert_eq!(output.sizing.sine_size, 6);
    }

    #[test]
    fn test_searched_sample_count_feeds_table() {
        let output = Pipeline::new(fast_config()).run().unwrap();
        let optimization = output.optimization.as_ref().unwrap();
        assert_eq!(output.sample_count, optimization.best_sample_count);
        assert_eq!(output.table.sample_count(), output.sample_count);
        // default bounds for 6 bits are [72, 256]
        assert!((72..=256).contains(&output.sample_count));
    }

    #[test]
    fn test_run_is_deterministic() {
        let a = Pipeline::new(fast_config()).run().unwrap();
        let b = Pipeline::new(fast_config()).run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = fast_config();
        config.table.bit_width = 0;
        assert!(matches!(
            Pipeline::new(config).run(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_emit_writes_all_targets() {
        let dir = TempDir::new().unwrap();
        let module = dir.path().join("half_sine_table.v");
        let consumer = dir.path().join("sine_wave.v");
        let csv = dir.path().join("table.csv");
        fs::write(
            &consumer,
            "`define SINE_SIZE 8\n`define TABLE_SIZE 1\n`define TABLE_REG_SIZE 1\n",
        )
        .unwrap();

        let mut config = fast_config();
        config.table.sample_count = Some(100);
        config.output.table_module = Some(module.clone());
        config.output.patch = vec![consumer.clone()];
        config.output.csv = Some(csv.clone());

        let pipeline = Pipeline::new(config);
        let output = pipeline.run().unwrap();
        let report = pipeline.emit(&output).unwrap();

        assert_eq!(report.files_written(), 3);
        assert_eq!(report.patched[0].replaced, 3);
        assert!(fs::read_to_string(&module)
            .unwrap()
            .contains("`define TABLE_SIZE 50"));
        assert_eq!(
            fs::read_to_string(&consumer).unwrap(),
            "`define SINE_SIZE 6\n`define TABLE_SIZE 50\n`define TABLE_REG_SIZE 6\n"
        );
        let csv_text = fs::read_to_string(&csv).unwrap();
        assert_eq!(csv_text.lines().count(), 51);
    }

    #[test]
    fn test_emit_without_targets() {
        let mut config = fast_config();
        config.table.sample_count = Some(64);
        let pipeline = Pipeline::new(config);
        let output = pipeline.run().unwrap();
        assert_eq!(pipeline.emit(&output).unwrap(), EmissionReport::default());
    }

    #[test]
    fn test_emit_missing_patch_target() {
        let dir = TempDir::new().unwrap();
        let mut config = fast_config();
        config.table.sample_count = Some(64);
        config.output.patch = vec![dir.path().join("missing.v")];
        let pipeline = Pipeline::new(config);
        let output = pipeline.run().unwrap();
        assert!(matches!(pipeline.emit(&output), Err(Error::Patch(_))));
    }
}
