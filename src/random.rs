//! Random number generator helpers.
//!
//! The engine never shares a generator between concurrent tasks. A master
//! generator is created once per run; every parallel unit of work gets its
//! own generator seeded from a base drawn from the master plus the unit's
//! slot index. Results therefore do not depend on how rayon schedules work.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws a base seed for one batch of per-slot generators.
pub fn base_seed<R: Rng>(rng: &mut R) -> u64 {
    rng.random()
}

/// Generator owned by slot `index` of a batch seeded with `base`.
pub fn slot_rng(base: u64, index: usize) -> StdRng {
    create_rng(base.wrapping_add(index as u64))
}
