//! Generate command implementation

use serde::Serialize;

use crate::cli::logging::{log, render_structured};
use crate::cli::LogLevel;
use crate::config::GenerateArgs;
use crate::emit::{patch_file, write_csv_file, write_table_module, TableSizing};
use crate::loss::{LossBreakdown, LossModel};
use crate::quant::{generate, WaveformTable};

#[derive(Serialize)]
struct GenerateSummary<'a> {
    bit_width: u32,
    sample_count: u64,
    sizing: TableSizing,
    unique_values: usize,
    loss: LossBreakdown,
    values: &'a [u64],
}

/// One-line description of a table
pub fn format_table_summary(table: &WaveformTable) -> String {
    format!(
        "{} entries, {} bits, {} distinct values, max {}",
        table.len(),
        table.bit_width(),
        table.unique_count(),
        table.max().unwrap_or(0)
    )
}

pub fn run_generate(args: GenerateArgs, level: LogLevel) -> Result<(), String> {
    let table =
        generate(args.bits, args.samples).map_err(|e| format!("Generation failed: {e}"))?;
    let sizing = TableSizing::from_table(&table);

    if let Some(path) = &args.output {
        write_table_module(path, &table)
            .map_err(|e| format!("Failed to write table module: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Wrote table module: {}", path.display()),
        );
    }

    let declarations = sizing.declarations();
    for path in &args.patch {
        let replaced = patch_file(path, &declarations)
            .map_err(|e| format!("Failed to patch {}: {e}", path.display()))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Patched {} ({replaced} declarations)", path.display()),
        );
    }

    if let Some(path) = &args.csv {
        write_csv_file(path, table.values()).map_err(|e| format!("Failed to write CSV: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Wrote CSV: {}", path.display()),
        );
    }

    let loss = LossModel::default().breakdown_table(&table);
    let summary = GenerateSummary {
        bit_width: table.bit_width(),
        sample_count: table.sample_count(),
        sizing,
        unique_values: table.unique_count(),
        loss,
        values: table.values(),
    };
    if let Some(rendered) = render_structured(&summary, args.format)? {
        println!("{rendered}");
        return Ok(());
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Table: {}", format_table_summary(&table)),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Loss: {:.2} (redundancy {:.0}, bias {:.2}, penalty {:.0})",
            loss.total, loss.redundancy, loss.bias, loss.penalty
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  SINE_SIZE={} TABLE_SIZE={} TABLE_REG_SIZE={}",
            sizing.sine_size, sizing.table_size, sizing.table_reg_size
        ),
    );
    Ok(())
}
