//! Objective evaluation budget

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default total number of loss evaluations
pub const DEFAULT_TOTAL_CALLS: usize = 50;

/// Default number of space-filling design points
pub const DEFAULT_INITIAL_POINTS: usize = 10;

/// How many loss evaluations a search may spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Total evaluations, design points included
    pub total_calls: usize,
    /// Evaluations drawn from the initial design
    pub initial_points: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            total_calls: DEFAULT_TOTAL_CALLS,
            initial_points: DEFAULT_INITIAL_POINTS,
        }
    }
}

impl SearchBudget {
    pub fn new(total_calls: usize, initial_points: usize) -> Self {
        Self {
            total_calls,
            initial_points,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_calls == 0 {
            return Err(Error::config("total calls must be > 0"));
        }
        if self.initial_points == 0 {
            return Err(Error::config("initial points must be > 0"));
        }
        if self.initial_points > self.total_calls {
            return Err(Error::SearchBudget {
                initial_points: self.initial_points,
                total_calls: self.total_calls,
            });
        }
        Ok(())
    }

    /// Evaluations left for the surrogate-guided phase
    pub fn guided_calls(&self) -> usize {
        self.total_calls.saturating_sub(self.initial_points)
    }
}
