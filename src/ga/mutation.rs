//! Probabilistic mutation of a whole population.

use super::types::GaProblem;
use crate::error::{GaError, Result};
use crate::random::{base_seed, slot_rng};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Replaces each individual with [`GaProblem::mutate`] of itself with
/// probability `probability`, leaving it unchanged otherwise.
///
/// Coin flips are independent per individual. Like breeding, each slot
/// draws from its own generator, so parallel and sequential runs agree.
pub fn mutate_population<P: GaProblem, R: Rng>(
    problem: &P,
    probability: f64,
    population: Vec<P::Individual>,
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<P::Individual>> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GaError::invalid(
            "mutation_probability",
            format!("must be in [0, 1], got {probability}"),
        ));
    }

    let base = base_seed(rng);
    let mutate_slot = |(slot, individual): (usize, P::Individual)| {
        let mut local_rng = slot_rng(base, slot);
        if local_rng.random_bool(probability) {
            problem.mutate(&individual, &mut local_rng)
        } else {
            individual
        }
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return Ok(population
            .into_par_iter()
            .enumerate()
            .map(&mutate_slot)
            .collect());
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    Ok(population.into_iter().enumerate().map(&mutate_slot).collect())
}
