//! Seeded random number generation.
//!
//! Every phase receives an explicit generator; there is no hidden global
//! RNG. ChaCha8 output is stable across platforms and releases, so a
//! fixed seed reproduces a run exactly.

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator type used by the engine.
pub type EngineRng = ChaCha8Rng;

/// Creates a generator from a seed.
pub fn create_rng(seed: u64) -> EngineRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws an index from `weights` with probability proportional to weight.
///
/// Returns 0 when the weights are empty or sum to zero.
pub fn roulette_select<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return 0;
    }

    let mut roll = rng.random_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        roll -= w;
        if roll < 0.0 {
            return i;
        }
    }
    // Floating-point slack: fall back to the last positive weight.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}

/// `amount` distinct indices from `0..length`, in draw order.
///
/// # Panics
/// Panics if `amount > length`.
pub fn distinct_indices<R: Rng>(rng: &mut R, length: usize, amount: usize) -> Vec<usize> {
    index::sample(rng, length, amount).into_vec()
}
