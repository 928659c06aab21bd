//! Run command implementation

use crate::cli::logging::{log, render_structured};
use crate::cli::LogLevel;
use crate::config::{apply_overrides, PipelineConfig, RunArgs};
use crate::pipeline::Pipeline;

use super::generate::format_table_summary;
use super::optimize::format_result;

pub fn run_pipeline(args: RunArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Loading config: {}", args.config.display()),
    );
    let mut config =
        PipelineConfig::from_file(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut config, &args);

    let pipeline = Pipeline::new(config);
    let output = pipeline.run().map_err(|e| format!("Pipeline failed: {e}"))?;

    if let Some(result) = &output.optimization {
        log(level, LogLevel::Normal, &format_result(result));
    } else {
        log(
            level,
            LogLevel::Verbose,
            &format!("Using fixed sample count {}", output.sample_count),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("Table: {}", format_table_summary(&output.table)),
    );

    if args.dry_run {
        log(level, LogLevel::Normal, "Dry run: no files written");
    } else {
        let report = pipeline
            .emit(&output)
            .map_err(|e| format!("Emission failed: {e}"))?;
        if let Some(path) = &report.table_module {
            log(
                level,
                LogLevel::Normal,
                &format!("Wrote table module: {}", path.display()),
            );
        }
        for patched in &report.patched {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Patched {} ({} declarations)",
                    patched.path.display(),
                    patched.replaced
                ),
            );
        }
        if let Some(path) = &report.csv {
            log(
                level,
                LogLevel::Normal,
                &format!("Wrote CSV: {}", path.display()),
            );
        }
    }

    if let Some(rendered) = render_structured(&output, args.format)? {
        println!("{rendered}");
    }
    Ok(())
}
