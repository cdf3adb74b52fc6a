//! Explicit random-number sources.
//!
//! A run owns exactly one master generator seeded from the configuration.
//! Work that may execute on another thread receives its own generator whose
//! seed was drawn from the master in a fixed order, so the outcome depends
//! only on the seed and never on scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator type used throughout the crate.
pub type SearchRng = StdRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `n` child seeds from `rng`, one per independent task.
pub fn split_seeds<R: Rng>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.random()).collect()
}
