//! Candidate pools for acquisition maximization

use rand::Rng;
use std::collections::{BTreeSet, HashSet};

use crate::optim::types::SearchBounds;

/// Ranges with at most this many unevaluated integers are scanned exhaustively
pub(crate) const DEFAULT_POOL_SIZE: usize = 512;

/// Sorted, unevaluated sample counts to score with the acquisition function
///
/// Small ranges yield every unevaluated integer. Larger ranges yield
/// `pool_size` uniform draws plus the two neighbours on each side of the
/// incumbent. Returns an empty pool only when the whole range is evaluated.
pub(crate) fn candidate_pool<R: Rng>(
    bounds: &SearchBounds,
    evaluated: &HashSet<u64>,
    incumbent: u64,
    pool_size: usize,
    rng: &mut R,
) -> Vec<u64> {
    let remaining = bounds.size().saturating_sub(evaluated.len() as u64);
    if remaining == 0 {
        return Vec::new();
    }

    if remaining <= pool_size as u64 {
        return (bounds.min()..=bounds.max())
            .filter(|n| !evaluated.contains(n))
            .collect();
    }

    let mut pool = BTreeSet::new();
    for _ in 0..pool_size {
        pool.insert(rng.random_range(bounds.min()..=bounds.max()));
    }
    for delta in [1, 2] {
        pool.insert(incumbent.saturating_sub(delta).max(bounds.min()));
        pool.insert(incumbent.saturating_add(delta).min(bounds.max()));
    }
    pool.retain(|n| !evaluated.contains(n));

    if pool.is_empty() {
        // every draw hit an evaluated point; fewer than `remaining` are evaluated
        if let Some(n) = (bounds.min()..=bounds.max()).find(|n| !evaluated.contains(n)) {
            pool.insert(n);
        }
    }

    pool.into_iter().collect()
}
