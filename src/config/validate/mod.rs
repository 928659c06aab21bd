//! Configuration validation
//!
//! Checks every numeric range before any table is generated, so a bad config
//! fails fast instead of partway through a search.

use crate::error::{Error, Result};
use crate::optim::SearchBounds;
use crate::quant::{MAX_BIT_WIDTH, MAX_SAMPLE_COUNT, MIN_SAMPLE_COUNT};

use super::schema::PipelineConfig;


/// Validate a pipeline configuration
///
/// Checks:
/// - bit widths are in `1..=32`
/// - a fixed sample count is in `4..=2^24`
/// - a searched table has a feasible range, either explicit or the
///   bit-width default
/// - loss weights are finite and non-negative
/// - the search budget and any explicit bounds are consistent
/// - the sweep has at least one bit width
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    check_bit_width(config.table.bit_width)?;

    if let Some(sample_count) = config.table.sample_count {
        if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&sample_count) {
            return Err(Error::config(format!(
                "table.sample_count {sample_count} out of range \
                 (must be {MIN_SAMPLE_COUNT}..={MAX_SAMPLE_COUNT})"
            )));
        }
    }

    config.loss_model().validate()?;
    config.budget().validate()?;
    let explicit = config.explicit_bounds(config.table.bit_width)?;
    if config.table.sample_count.is_none() && explicit.is_none() {
        SearchBounds::for_bit_width(config.table.bit_width)?;
    }

    if config.sweep.bit_widths.is_empty() {
        return Err(Error::config("sweep.bit_widths cannot be empty"));
    }
    for &bits in &config.sweep.bit_widths {
        check_bit_width(bits)?;
    }

    Ok(())
}

fn check_bit_width(bit_width: u32) -> Result<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(Error::config(format!(
            "bit width {bit_width} out of range (must be 1..={MAX_BIT_WIDTH})"
        )));
    }
    Ok(())
}
