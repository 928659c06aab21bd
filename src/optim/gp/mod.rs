//! Gaussian-process surrogate of the loss surface

mod kernel;
mod surrogate;


pub use kernel::MaternKernel;
pub use surrogate::GaussianProcess;
