//! Sample-count search (surrogate-guided Bayesian optimization)
//!
//! Minimizes the [`LossModel`](crate::loss::LossModel) over a bounded integer
//! range of sample counts for one bit width:
//!
//! 1. evaluate a seeded Latin-hypercube design,
//! 2. fit a Gaussian-process surrogate to every evaluation so far,
//! 3. evaluate the candidate with the best acquisition value and refit,
//!    until the call budget is spent.
//!
//! # Example
//!
//! ```
//! use sinetab::optim::{optimize, SearchBounds, SearchBudget};
//!
//! let bounds = SearchBounds::new(16, 96).unwrap();
//! let budget = SearchBudget::new(20, 5);
//! let result = optimize(6, bounds, budget, 42).unwrap();
//! assert!(bounds.contains(result.best_sample_count));
//! ```
//!
//! # References
//!
//! \[1\] Jones et al. (1998) - Efficient Global Optimization of Expensive Black-Box Functions
//! \[2\] Rasmussen & Williams (2006) - Gaussian Processes for Machine Learning

mod acquisition;
mod bayes;
mod design;
mod gp;
mod types;

pub use acquisition::{normal_cdf, normal_pdf};
pub use bayes::{optimize, SampleCountOptimizer, DEFAULT_SEED};
pub use design::latin_hypercube;
pub use gp::{GaussianProcess, MaternKernel};
pub use types::{
    AcquisitionFunction, Evaluation, EvaluationPhase, OptimizationResult, SearchBounds,
    SearchBudget,
};
