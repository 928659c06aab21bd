//! Sweep command implementation

use crate::cli::logging::{log, render_structured};
use crate::cli::LogLevel;
use crate::config::{validate_config, SweepArgs};
use crate::sweep::SweepReport;

use super::load_base_config;

/// One line per bit width plus the fitted curve
pub fn format_report(report: &SweepReport) -> String {
    let mut lines = vec![format!("{:>5}  {:>12}  {:>12}", "bits", "samples", "loss")];
    for (bits, outcome) in &report.outcomes {
        match outcome {
            Ok(result) => lines.push(format!(
                "{bits:>5}  {:>12}  {:>12.2}",
                result.best_sample_count, result.best_loss
            )),
            Err(e) => lines.push(format!("{bits:>5}  {e}")),
        }
    }
    match &report.fit {
        Ok(fit) => lines.push(format!(
            "Fit: n(b) = {:.4}·exp({:.4}·b) + {:.4}  (rmse {:.2})",
            fit.a,
            fit.b,
            fit.c,
            fit.rmse()
        )),
        Err(e) => lines.push(format!("Fit: unavailable ({e})")),
    }
    lines.join("\n")
}

pub fn run_sweep(args: SweepArgs, level: LogLevel) -> Result<(), String> {
    let mut config = load_base_config(args.config.as_deref())?;
    args.budget.apply_to(&mut config);
    if !args.bits.is_empty() {
        config.sweep.bit_widths = args.bits.clone();
    }
    if let Some(workers) = args.workers {
        config.sweep.workers = workers;
    }
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Sweeping bit widths {:?} on {} workers",
            config.sweep.bit_widths,
            if config.sweep.workers == 0 {
                "all available".to_string()
            } else {
                config.sweep.workers.to_string()
            }
        ),
    );

    let report = config
        .sweep()
        .map_err(|e| format!("Validation failed: {e}"))?
        .run(&config.sweep.bit_widths)
        .map_err(|e| format!("Sweep failed: {e}"))?;

    match render_structured(&report, args.format)? {
        Some(rendered) => println!("{rendered}"),
        None => log(level, LogLevel::Normal, &format_report(&report)),
    }

    let failed: Vec<u32> = report.failures().into_keys().collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("Sweep incomplete: bit widths {failed:?} failed"))
    }
}
