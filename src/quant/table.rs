//! Quantized waveform table

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::sine::max_code;

/// Ordered quantized sine samples for one `(bit_width, sample_count)` pair
///
/// Built once by [`generate`](super::generate) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformTable {
    bit_width: u32,
    sample_count: u64,
    values: Vec<u64>,
}

impl WaveformTable {
    pub(crate) fn new(bit_width: u32, sample_count: u64, values: Vec<u64>) -> Self {
        Self {
            bit_width,
            sample_count,
            values,
        }
    }

    /// Amplitude resolution in bits
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Sample count the table was generated from
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Quantized samples in phase order
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of table entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest code in the table
    pub fn max(&self) -> Option<u64> {
        self.values.iter().copied().max()
    }

    /// Number of distinct codes
    pub fn unique_count(&self) -> usize {
        self.values.iter().collect::<HashSet<_>>().len()
    }

    /// Whether the table reaches `2^bit_width - 1`
    pub fn reaches_full_scale(&self) -> bool {
        self.max() == Some(max_code(self.bit_width))
    }

    pub fn into_values(self) -> Vec<u64> {
        self.values
    }
}
