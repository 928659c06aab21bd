//! Emission adapters for hardware description text and tabular export
//!
//! Thin layers over a finished [`WaveformTable`](crate::quant::WaveformTable):
//! a generated table module, syntax-level patching of size declarations in
//! existing files, and a two-column CSV dump.

mod csv;
mod patch;
mod sizing;
mod verilog;

pub use self::csv::{write_csv, write_csv_file, CSV_HEADER};
pub use patch::{patch_file, patch_text, Declaration, DeclarationPatch, PatchOutcome};
pub use sizing::{address_width, TableSizing};
pub use verilog::{render_table_module, write_table_module, TABLE_MODULE_NAME};
