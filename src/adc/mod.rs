//! ADC readout adapter
//!
//! Sizes the readout and buffer declarations for a given ADC data width and
//! simulates the codes a sampled sine input would produce.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::emit::{address_width, Declaration, DeclarationPatch};
use crate::error::{Error, Result};
use crate::quant::{quantize_sample, MAX_BIT_WIDTH};

/// Default ADC data width in bits
pub const DEFAULT_DATA_WIDTH: u32 = 12;

/// Default sample buffer depth
pub const DEFAULT_BUFFER_SIZE: u64 = 4096;

/// ADC readout and buffer dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcConfig {
    pub data_width: u32,
    pub buffer_size: u64,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            data_width: DEFAULT_DATA_WIDTH,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl AdcConfig {
    pub fn new(data_width: u32, buffer_size: u64) -> Result<Self> {
        let config = Self {
            data_width,
            buffer_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_width == 0 || self.data_width > MAX_BIT_WIDTH {
            return Err(Error::config(format!(
                "ADC data width {} out of range (must be 1..={MAX_BIT_WIDTH})",
                self.data_width
            )));
        }
        if self.buffer_size < 2 {
            return Err(Error::config(format!(
                "ADC buffer size {} must be >= 2",
                self.buffer_size
            )));
        }
        Ok(())
    }

    /// Buffer address width, `ceil(log2(buffer_size))`
    pub fn addr_width(&self) -> u32 {
        address_width(self.buffer_size.saturating_sub(1))
    }

    /// `DATA_WIDTH` for the readout module
    pub fn readout_patch(&self) -> DeclarationPatch {
        DeclarationPatch::new().with(Declaration::DataWidth, u64::from(self.data_width))
    }

    /// `DATA_WIDTH`, `BUFFER_SIZE` and `ADDR_WIDTH` for the buffer module
    pub fn buffer_patch(&self) -> DeclarationPatch {
        self.readout_patch()
            .with(Declaration::BufferSize, self.buffer_size)
            .with(Declaration::AddrWidth, u64::from(self.addr_width()))
    }
}

/// Parameters of a simulated capture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcCapture {
    pub num_samples: usize,
    /// Input frequency in Hz
    pub frequency: f64,
    /// Samples per second
    pub sampling_rate: f64,
}

impl Default for AdcCapture {
    fn default() -> Self {
        Self {
            num_samples: 1024,
            frequency: 1.0,
            sampling_rate: 100.0,
        }
    }
}

/// Codes an ideal `data_width`-bit ADC reports for a unit sine input
///
/// Sample `k` is taken at `t = k / sampling_rate`.
pub fn simulate_adc_output(data_width: u32, capture: &AdcCapture) -> Result<Vec<u64>> {
    if data_width == 0 || data_width > MAX_BIT_WIDTH {
        return Err(Error::config(format!(
            "ADC data width {data_width} out of range (must be 1..={MAX_BIT_WIDTH})"
        )));
    }
    if !capture.frequency.is_finite() || !(capture.sampling_rate.is_finite() && capture.sampling_rate > 0.0)
    {
        return Err(Error::config(format!(
            "invalid capture: frequency {} Hz at {} samples/s",
            capture.frequency, capture.sampling_rate
        )));
    }

    let omega = TAU * capture.frequency;
    Ok((0..capture.num_samples)
        .map(|k| {
            let t = k as f64 / capture.sampling_rate;
            quantize_sample((omega * t).sin(), data_width)
        })
        .collect())
}
