//! Surrogate-guided sample-count optimizer

mod candidates;
mod optimizer;


pub use optimizer::{optimize, SampleCountOptimizer, DEFAULT_SEED};
