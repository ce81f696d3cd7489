//! Fitness evaluation.

use super::types::{GaProblem, Score, ScoredIndividual};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;

/// Pairs every individual with its fitness.
///
/// With `parallel` (and the `parallel` feature enabled) the evaluations fan
/// out over the rayon pool; the call returns only once every evaluation has
/// finished. Each individual is
/// paired with its own score and the result keeps the input order in both
/// modes. A panicking fitness operator unwinds out of this call.
pub fn score_population<P: GaProblem>(
    problem: &P,
    population: Vec<P::Individual>,
    parallel: bool,
) -> Vec<ScoredIndividual<P::Individual, P::Score>> {
    let score_one = |individual: P::Individual| {
        let score = problem.fitness(&individual);
        ScoredIndividual::new(score, individual)
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return population.into_par_iter().map(&score_one).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population.into_iter().map(&score_one).collect()
}

/// The first individual, in evaluation order, holding the maximum score.
///
/// Returns `None` for an empty slice.
pub fn best_of<T, S: Score>(scored: &[ScoredIndividual<T, S>]) -> Option<&ScoredIndividual<T, S>> {
    let mut iter = scored.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, candidate| {
        if candidate.score.compare(&best.score) == Ordering::Greater {
            candidate
        } else {
            best
        }
    }))
}
