//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded RNG. Identical seeds give identical streams.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from fresh entropy when `None`.
///
/// Returns the seed actually used so a run can be replayed.
pub fn rng_from_option(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (create_rng(seed), seed)
}
