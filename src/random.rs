//! Random number generator construction.
//!
//! All stochastic decisions in a run draw from one generator created here,
//! so a fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a generator from `seed`, or from a fresh random seed when `None`.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
