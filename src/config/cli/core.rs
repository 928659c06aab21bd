//! Core CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::adc::{DEFAULT_BUFFER_SIZE, DEFAULT_DATA_WIDTH};
use crate::config::PipelineConfig;

/// Sinetab: quantized half-sine lookup table generator
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "sinetab")]
#[command(version)]
#[command(
    about = "Generate quantized half-sine lookup tables and search for the best sample count"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate a table for a fixed bit width and sample count
    Generate(GenerateArgs),

    /// Search for the best sample count at one bit width
    Optimize(OptimizeArgs),

    /// Optimize several bit widths concurrently and fit the growth curve
    Sweep(SweepArgs),

    /// Update ADC readout declarations or simulate ADC codes
    Adc(AdcArgs),

    /// Run the full pipeline from a YAML configuration
    Run(RunArgs),

    /// Validate a configuration file without running it
    Validate(ValidateArgs),
}

/// Budget overrides shared by optimize, sweep and run
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct BudgetArgs {
    /// Total loss evaluations
    #[arg(long)]
    pub calls: Option<usize>,

    /// Evaluations spent on the initial design
    #[arg(long)]
    pub initial_points: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl BudgetArgs {
    /// Copy every given override into `config`
    pub fn apply_to(&self, config: &mut PipelineConfig) {
        if let Some(calls) = self.calls {
            config.search.total_calls = calls;
        }
        if let Some(initial_points) = self.initial_points {
            config.search.initial_points = initial_points;
        }
        if let Some(seed) = self.seed {
            config.search.seed = seed;
        }
    }
}

/// Single-width search overrides for optimize and run
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SearchArgs {
    #[command(flatten)]
    pub budget: BudgetArgs,

    /// Lower bound of the sample-count search
    #[arg(long)]
    pub min: Option<u64>,

    /// Upper bound of the sample-count search
    #[arg(long)]
    pub max: Option<u64>,
}

impl SearchArgs {
    /// Copy every given override into `config`
    pub fn apply_to(&self, config: &mut PipelineConfig) {
        self.budget.apply_to(config);
        if let Some(min) = self.min {
            config.search.min = Some(min);
        }
        if let Some(max) = self.max {
            config.search.max = Some(max);
        }
    }
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Output bit width
    #[arg(short, long, default_value_t = 8)]
    pub bits: u32,

    /// Samples per full sine period
    #[arg(short = 'n', long)]
    pub samples: u64,

    /// Write the table module to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Update size declarations in these files
    #[arg(long)]
    pub patch: Vec<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the optimize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct OptimizeArgs {
    /// Output bit width (defaults to the configured table bit width)
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Base YAML configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Print every evaluation
    #[arg(long)]
    pub trace: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the sweep command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SweepArgs {
    /// Bit widths to optimize (defaults to 2..=16)
    #[arg(short, long, value_delimiter = ',')]
    pub bits: Vec<u32>,

    /// Worker threads (0 = available parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Base YAML configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    // no --min/--max: every width searches its own default range
    #[command(flatten)]
    pub budget: BudgetArgs,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the adc command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AdcArgs {
    /// ADC data width in bits
    #[arg(short, long, default_value_t = DEFAULT_DATA_WIDTH)]
    pub data_width: u32,

    /// Capture buffer depth in samples
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: u64,

    /// Readout files to receive DATA_WIDTH
    #[arg(long)]
    pub readout: Vec<PathBuf>,

    /// Buffer files to receive DATA_WIDTH, BUFFER_SIZE and ADDR_WIDTH
    #[arg(long)]
    pub buffer: Vec<PathBuf>,

    /// Write simulated ADC codes to this CSV file
    #[arg(long)]
    pub simulate: Option<PathBuf>,

    /// Number of simulated samples
    #[arg(long, default_value_t = 1024)]
    pub samples: usize,
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override the table bit width
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Override the sample count and skip the search
    #[arg(short = 'n', long)]
    pub samples: Option<u64>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Compute the table without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a pipeline configuration
pub fn apply_overrides(config: &mut PipelineConfig, args: &RunArgs) {
    if let Some(bits) = args.bits {
        config.table.bit_width = bits;
    }
    if let Some(samples) = args.samples {
        config.table.sample_count = Some(samples);
    }
    args.search.apply_to(config);
}
