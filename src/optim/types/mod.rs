//! Core search types

mod bounds;
mod budget;
mod result;
mod strategy;

#[cfg(test)]
mod tests;

pub use bounds::SearchBounds;
pub use budget::SearchBudget;
pub use result::{Evaluation, EvaluationPhase, OptimizationResult};
pub use strategy::AcquisitionFunction;
