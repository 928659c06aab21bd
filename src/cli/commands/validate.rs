//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{validate_config, PipelineConfig, ValidateArgs};

/// Format table settings as a string
pub fn format_table_info(config: &PipelineConfig) -> String {
    let samples = match config.table.sample_count {
        Some(n) => n.to_string(),
        None => "optimized".to_string(),
    };
    format!(
        "  Bit width: {}\n  Sample count: {samples}",
        config.table.bit_width
    )
}

/// Format search settings as a string
pub fn format_search_info(config: &PipelineConfig) -> String {
    let bound = |b: Option<u64>| b.map_or_else(|| "default".to_string(), |v| v.to_string());
    format!(
        "  Bounds: [{}, {}]\n  Calls: {} ({} initial)\n  Seed: {}\n  Loss: alpha {}, penalty {}",
        bound(config.search.min),
        bound(config.search.max),
        config.search.total_calls,
        config.search.initial_points,
        config.search.seed,
        config.loss.alpha,
        config.loss.penalty
    )
}

/// Format output targets as a string, if any are configured
pub fn format_output_info(config: &PipelineConfig) -> Option<String> {
    let output = &config.output;
    let mut lines = Vec::new();
    if let Some(path) = &output.table_module {
        lines.push(format!("  Table module: {}", path.display()));
    }
    for path in &output.patch {
        lines.push(format!("  Patch: {}", path.display()));
    }
    if let Some(path) = &output.csv {
        lines.push(format!("  CSV: {}", path.display()));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &PipelineConfig) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_table_info(config));
    println!();
    println!("{}", format_search_info(config));
    println!();
    println!("  Sweep bit widths: {:?}", config.sweep.bit_widths);

    if let Some(output_info) = format_output_info(config) {
        println!();
        println!("{output_info}");
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config =
        PipelineConfig::from_file(&args.config).map_err(|e| format!("Config error: {e}"))?;

    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&config);
    }

    Ok(())
}
