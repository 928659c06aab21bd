//! Table module generation

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::quant::WaveformTable;

use super::sizing::TableSizing;

/// Name of the generated module
pub const TABLE_MODULE_NAME: &str = "half_sine_table";

/// Render `table` as a module assigning every entry in an `initial` block
///
/// The size macros are defined ahead of the module header so that the port
/// declarations can reference them.
pub fn render_table_module(table: &WaveformTable) -> String {
    let sizing = TableSizing::from_table(table);
    let mut out = String::with_capacity(256 + table.len() * 28);

    // writing to a String cannot fail
    let _ = writeln!(out, "`define SINE_SIZE {}", sizing.sine_size);
    let _ = writeln!(out, "`define TABLE_SIZE {}", sizing.table_size);
    let _ = writeln!(out, "`define TABLE_REG_SIZE {}", sizing.table_reg_size);
    out.push('\n');
    let _ = writeln!(out, "module {TABLE_MODULE_NAME}(");
    out.push_str("    output logic [`SINE_SIZE-1:0] sine_wave [0:`TABLE_SIZE-1],\n");
    out.push_str("    output logic [`TABLE_REG_SIZE-1:0] table_size\n");
    out.push_str(");\n");
    out.push_str("    initial begin\n");
    out.push_str("        table_size = `TABLE_SIZE-1;\n");
    for (i, value) in table.values().iter().enumerate() {
        let _ = writeln!(out, "        sine_wave[{i}] = {value};");
    }
    out.push_str("    end\n");
    out.push_str("endmodule\n");
    out
}

/// Write the rendered module to `path`, returning the sizes it declares
pub fn write_table_module(path: impl AsRef<Path>, table: &WaveformTable) -> Result<TableSizing> {
    let path = path.as_ref();
    fs::write(path, render_table_module(table))?;
    debug!(path = %path.display(), entries = table.len(), "wrote table module");
    Ok(TableSizing::from_table(table))
}
