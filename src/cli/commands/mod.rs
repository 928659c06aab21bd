//! CLI command implementations

mod adc;
mod generate;
mod optimize;
mod run;
mod sweep;
mod validate;


use std::path::Path;

use crate::cli::LogLevel;
use crate::config::{Cli, Command, PipelineConfig};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Generate(args) => generate::run_generate(args, log_level),
        Command::Optimize(args) => optimize::run_optimize(args, log_level),
        Command::Sweep(args) => sweep::run_sweep(args, log_level),
        Command::Adc(args) => adc::run_adc(args, log_level),
        Command::Run(args) => run::run_pipeline(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}

/// Load `path` when given, otherwise start from defaults
fn load_base_config(path: Option<&Path>) -> Result<PipelineConfig, String> {
    match path {
        Some(path) => {
            PipelineConfig::from_file(path).map_err(|e| format!("Config error: {e}"))
        }
        None => Ok(PipelineConfig::default()),
    }
}
