//! Space-filling initial design

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::SearchBounds;

/// One-dimensional Latin-hypercube design over `bounds`
///
/// Splits `[0, 1]` into `n` equal strata, draws one uniform point per stratum,
/// maps it onto the integer range and shuffles the order. Points may repeat
/// when `n` exceeds the number of integers in the range.
pub fn latin_hypercube<R: Rng>(bounds: &SearchBounds, n: usize, rng: &mut R) -> Vec<u64> {
    let mut points: Vec<u64> = (0..n)
        .map(|k| {
            let u = (k as f64 + rng.random::<f64>()) / n as f64;
            bounds.denormalize(u)
        })
        .collect();
    points.shuffle(rng);
    points
}
