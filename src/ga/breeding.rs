//! Crossbreeding: builds the next population from tournament winners.

use super::selection::Tournament;
use super::types::{GaProblem, ScoredIndividual};
use crate::error::{GaError, Result};
use crate::random::{base_seed, slot_rng};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Produces a population of `population.len()` offspring.
///
/// Every output slot independently runs two tournaments to pick its
/// parents and stores [`GaProblem::crossbreed`] of the pair. Each slot owns
/// a generator derived from one base seed drawn from `rng`, so the result
/// is the same whether slots are bred in parallel or sequentially.
/// Without the `parallel` feature slots are always bred sequentially.
///
/// Output order carries no meaning.
pub fn crossbreed<P: GaProblem, R: Rng>(
    problem: &P,
    tournament: &Tournament,
    population: &[ScoredIndividual<P::Individual, P::Score>],
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<P::Individual>> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    tournament.validate()?;

    let base = base_seed(rng);
    let breed_slot = |slot: usize| -> Result<P::Individual> {
        let mut local_rng = slot_rng(base, slot);
        let parent_a = tournament.select(population, &mut local_rng)?;
        let parent_b = tournament.select(population, &mut local_rng)?;
        Ok(problem.crossbreed(&parent_a.individual, &parent_b.individual, &mut local_rng))
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return (0..population.len()).into_par_iter().map(&breed_slot).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..population.len()).map(&breed_slot).collect()
}
