//! One generation step: crossbreed, then mutate.

use super::breeding::crossbreed;
use super::mutation::mutate_population;
use super::selection::Tournament;
use super::types::{GaProblem, ScoredIndividual};
use crate::error::Result;
use rand::Rng;

/// Builds the next population from a scored one.
///
/// Equivalent to [`mutate_population`] applied to the output of
/// [`crossbreed`]. The result has the same size as `population`.
pub fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    tournament: &Tournament,
    mutation_probability: f64,
    population: &[ScoredIndividual<P::Individual, P::Score>],
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<P::Individual>> {
    let offspring = crossbreed(problem, tournament, population, parallel, rng)?;
    mutate_population(problem, mutation_probability, offspring, parallel, rng)
}
