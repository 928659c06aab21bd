//! Command-line argument parsing
//!
//! # Usage
//!
//! ```bash
//! sinetab generate --bits 8 --samples 300 --output half_sine_table.v
//! sinetab optimize --bits 10 --calls 60 --seed 7
//! sinetab sweep --bits 2,4,8,12,16 --workers 4 --format json
//! sinetab adc --data-width 12 --buffer-size 4096 --readout adc_readout.v
//! sinetab run pipeline.yaml
//! sinetab validate pipeline.yaml
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, AdcArgs, BudgetArgs, Cli, Command, GenerateArgs, OptimizeArgs,
    RunArgs, SearchArgs, SweepArgs, ValidateArgs,
};
pub use types::OutputFormat;

#[cfg(test)]
mod tests;
