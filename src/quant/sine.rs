//! Sine sampling and fixed-point scaling

use std::f64::consts::TAU;
use std::ops::Range;

use crate::error::{Error, Result};

use super::table::WaveformTable;

/// Widest supported amplitude resolution
pub const MAX_BIT_WIDTH: u32 = 32;

/// Smallest sample count with a non-empty phase window
pub const MIN_SAMPLE_COUNT: u64 = 4;

/// Largest sample count a table may be generated for (`2^24`)
///
/// Keeps one table at `2^23` entries; a failed allocation would abort the
/// process rather than return an error.
pub const MAX_SAMPLE_COUNT: u64 = 1 << 24;

/// Largest representable code for a bit width: `2^bit_width - 1`
pub fn max_code(bit_width: u32) -> u64 {
    (1u64 << bit_width) - 1
}

/// Half-open phase-index window `[-n/4, n/4)`
///
/// Both bounds truncate toward zero, so a sample count that is not a multiple
/// of four loses the fractional quarter on each side.
pub fn phase_range(sample_count: u64) -> Range<i64> {
    let quarter = (sample_count / 4) as i64;
    -quarter..quarter
}

/// Scale a raw sine value in `[-1, 1]` to an unsigned code in `[0, max]`
///
/// Rounds half to even.
pub fn quantize_sample(value: f64, bit_width: u32) -> u64 {
    let max = max_code(bit_width);
    let scaled = ((value + 1.0) * (max as f64 / 2.0)).round_ties_even();
    (scaled.max(0.0) as u64).min(max)
}

/// Generate the quantized half-sine table for `(bit_width, sample_count)`
///
/// Samples `sin(2π·i/n)` for every `i` in [`phase_range`] and quantizes each
/// value to `bit_width` bits.
///
/// # Errors
///
/// [`Error::Configuration`] when `bit_width` is zero or above
/// [`MAX_BIT_WIDTH`], or when `sample_count` is outside
/// `MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT`.
pub fn generate(bit_width: u32, sample_count: u64) -> Result<WaveformTable> {
    validate(bit_width, sample_count)?;

    let n = sample_count as f64;
    let values = phase_range(sample_count)
        .map(|i| quantize_sample((TAU * i as f64 / n).sin(), bit_width))
        .collect();

    Ok(WaveformTable::new(bit_width, sample_count, values))
}

fn validate(bit_width: u32, sample_count: u64) -> Result<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(Error::config(format!(
            "bit width {bit_width} out of range (must be 1..={MAX_BIT_WIDTH})"
        )));
    }
    if sample_count < MIN_SAMPLE_COUNT {
        return Err(Error::config(format!(
            "sample count {sample_count} too small (must be >= {MIN_SAMPLE_COUNT})"
        )));
    }
    if sample_count > MAX_SAMPLE_COUNT {
        return Err(Error::config(format!(
            "sample count {sample_count} too large (must be <= {MAX_SAMPLE_COUNT})"
        )));
    }
    Ok(())
}
