//! Half-sine quantizer
//!
//! Maps an amplitude bit width and a sample count to the quantized table that
//! the hardware lookup consumes. Everything here is pure: the same inputs always
//! produce bit-identical tables.

mod sine;
mod table;


pub use sine::{
    generate, max_code, phase_range, quantize_sample, MAX_BIT_WIDTH, MAX_SAMPLE_COUNT,
    MIN_SAMPLE_COUNT,
};
pub use table::WaveformTable;
