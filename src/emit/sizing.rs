//! Sizes derived from a generated table

use serde::{Deserialize, Serialize};

use crate::quant::WaveformTable;

use super::patch::{Declaration, DeclarationPatch};

/// Bits needed to hold any value in `0..=value`, i.e. `ceil(log2(value + 1))`
pub fn address_width(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Declaration values describing a table to the consuming logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSizing {
    /// Width of one table entry (the bit width)
    pub sine_size: u32,
    /// Number of entries
    pub table_size: u64,
    /// Width of a register holding `0..=table_size`
    pub table_reg_size: u32,
}

impl TableSizing {
    pub fn from_table(table: &WaveformTable) -> Self {
        let table_size = table.len() as u64;
        Self {
            sine_size: table.bit_width(),
            table_size,
            table_reg_size: address_width(table_size),
        }
    }

    /// `SINE_SIZE`, `TABLE_SIZE` and `TABLE_REG_SIZE` as a patch
    pub fn declarations(&self) -> DeclarationPatch {
        DeclarationPatch::new()
            .with(Declaration::SineSize, u64::from(self.sine_size))
            .with(Declaration::TableSize, self.table_size)
            .with(Declaration::TableRegSize, u64::from(self.table_reg_size))
    }
}
