//! Pipeline configuration
//!
//! A YAML file describes the table, the loss weights, the search budget, the
//! sweep, and where to emit results. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```yaml
//! table:
//!   bit_width: 10
//! search:
//!   total_calls: 60
//!   initial_points: 12
//! output:
//!   table_module: rtl/half_sine_table.v
//!   patch: [rtl/sine_wave.v]
//! ```

mod cli;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, AdcArgs, BudgetArgs, Cli, Command, GenerateArgs, OptimizeArgs,
    OutputFormat, RunArgs, SearchArgs, SweepArgs, ValidateArgs,
};
pub use schema::{LossSpec, OutputSpec, PipelineConfig, SearchSpec, SweepSpec, TableSpec};
pub use validate::validate_config;
