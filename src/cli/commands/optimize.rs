//! Optimize command implementation

use crate::cli::logging::{log, render_structured};
use crate::cli::LogLevel;
use crate::config::{validate_config, OptimizeArgs};
use crate::optim::OptimizationResult;

use super::load_base_config;

/// Text rendering of one optimization result
pub fn format_result(result: &OptimizationResult) -> String {
    format!(
        "Best sample count for {} bits: {} (loss {:.2}, {} evaluations)",
        result.bit_width,
        result.best_sample_count,
        result.best_loss,
        result.n_evaluations()
    )
}

/// One line per evaluation, in evaluation order
pub fn format_trace(result: &OptimizationResult) -> String {
    result
        .trace
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "  {:>3}  {:?}  n={:<8} loss={:.2}",
                i + 1,
                e.phase,
                e.sample_count,
                e.loss
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_optimize(args: OptimizeArgs, level: LogLevel) -> Result<(), String> {
    let mut config = load_base_config(args.config.as_deref())?;
    args.search.apply_to(&mut config);
    if let Some(bits) = args.bits {
        config.table.bit_width = bits;
    }
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    let bit_width = config.table.bit_width;
    let optimizer = config
        .optimizer(bit_width)
        .map_err(|e| format!("Invalid search settings: {e}"))?;
    let bounds = optimizer
        .bounds_for(bit_width)
        .map_err(|e| format!("Invalid search bounds: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Searching [{}, {}] with {} calls ({} initial), seed {}",
            bounds.min(),
            bounds.max(),
            config.search.total_calls,
            config.search.initial_points,
            config.search.seed
        ),
    );

    let result = optimizer
        .optimize(bit_width)
        .map_err(|e| format!("Optimization failed: {e}"))?;

    if let Some(rendered) = render_structured(&result, args.format)? {
        println!("{rendered}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format_result(&result));
    if args.trace {
        log(level, LogLevel::Normal, &format_trace(&result));
    }
    Ok(())
}
