//! Inclusive sample-count search range

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quant::{MAX_BIT_WIDTH, MAX_SAMPLE_COUNT, MIN_SAMPLE_COUNT};

/// Inclusive `[min, max]` range of candidate sample counts
///
/// Only constructed through [`SearchBounds::new`] or
/// [`SearchBounds::for_bit_width`], so `4 <= min < max <= MAX_SAMPLE_COUNT`
/// always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct SearchBounds {
    min: u64,
    max: u64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: u64,
    max: u64,
}

impl TryFrom<RawBounds> for SearchBounds {
    type Error = Error;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl SearchBounds {
    /// Create bounds, requiring `4 <= min < max <= MAX_SAMPLE_COUNT`
    pub fn new(min: u64, max: u64) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Default range for a bit width: `[max(2·b², 4), 4·2^b]`
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the bit width is out of range or its
    /// default upper bound exceeds [`MAX_SAMPLE_COUNT`]; such widths need
    /// explicit bounds.
    pub fn for_bit_width(bit_width: u32) -> Result<Self> {
        if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
            return Err(Error::config(format!(
                "bit width {bit_width} out of range (must be 1..={MAX_BIT_WIDTH})"
            )));
        }
        let b = u64::from(bit_width);
        let min = (2 * b * b).max(MIN_SAMPLE_COUNT);
        let max = 4 * (1u64 << bit_width);
        if max > MAX_SAMPLE_COUNT {
            return Err(Error::config(format!(
                "default search range for {bit_width} bits reaches {max} samples \
                 (limit {MAX_SAMPLE_COUNT}); give explicit bounds"
            )));
        }
        Self::new(min, max)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min < MIN_SAMPLE_COUNT {
            return Err(Error::config(format!(
                "lower bound {} below minimum sample count {MIN_SAMPLE_COUNT}",
                self.min
            )));
        }
        if self.min >= self.max {
            return Err(Error::config(format!(
                "lower bound {} must be below upper bound {}",
                self.min, self.max
            )));
        }
        if self.max > MAX_SAMPLE_COUNT {
            return Err(Error::config(format!(
                "upper bound {} above maximum sample count {MAX_SAMPLE_COUNT}",
                self.max
            )));
        }
        Ok(())
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn contains(&self, sample_count: u64) -> bool {
        (self.min..=self.max).contains(&sample_count)
    }

    /// Number of integers in the range
    pub fn size(&self) -> u64 {
        self.max - self.min + 1
    }

    /// Map a sample count to `[0, 1]`
    pub fn normalize(&self, sample_count: u64) -> f64 {
        (sample_count.saturating_sub(self.min)) as f64 / (self.max - self.min) as f64
    }

    /// Map `u ∈ [0, 1]` back to the nearest sample count inside the range
    pub fn denormalize(&self, u: f64) -> u64 {
        let span = (self.max - self.min) as f64;
        let offset = (u.clamp(0.0, 1.0) * span).round() as u64;
        (self.min + offset).min(self.max)
    }
}
