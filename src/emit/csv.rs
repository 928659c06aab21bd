//! Two-column CSV export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Fixed header of the export
pub const CSV_HEADER: [&str; 2] = ["sample", "value"];

/// Write `values` as `sample,value` rows, one per element
pub fn write_csv<W: Write>(writer: W, values: &[u64]) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for (i, value) in values.iter().enumerate() {
        csv.write_record([i.to_string(), value.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `values` to a CSV file at `path`
pub fn write_csv_file(path: impl AsRef<Path>, values: &[u64]) -> Result<()> {
    write_csv(File::create(path)?, values)
}
