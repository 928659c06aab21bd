//! # sinetab
//!
//! Quantized half-sine lookup tables for hardware waveform generators.
//!
//! - [`quant`]: sample and quantize one half period of a sine
//! - [`loss`]: score a (bit width, sample count) pair
//! - [`optim`]: surrogate-guided search for the best sample count
//! - [`sweep`]: concurrent search over many bit widths plus an exponential fit
//! - [`emit`]: table modules, declaration patching and CSV export
//! - [`pipeline`]: configuration-driven end-to-end run
//!
//! ```no_run
//! use sinetab::optim::{optimize, SearchBounds, SearchBudget};
//! use sinetab::quant::generate;
//!
//! let bounds = SearchBounds::for_bit_width(8)?;
//! let result = optimize(8, bounds, SearchBudget::default(), 42)?;
//! let table = generate(8, result.best_sample_count)?;
//! println!("{} entries", table.len());
//! # Ok::<(), sinetab::Error>(())
//! ```

pub mod adc;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod loss;
pub mod optim;
pub mod pipeline;
pub mod quant;
pub mod sweep;

pub use error::{Error, Result};
