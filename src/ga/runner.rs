//! Generational loop execution.
//!
//! [`GaRunner`] drives [`EvolutionState`] from the supplied first
//! generation until a generation is good enough or the iteration budget is
//! spent: score → check stop conditions → crossbreed → mutate → repeat.

use super::config::GaConfig;
use super::generation::next_generation;
use super::scoring::{best_of, score_population};
use super::types::{FnProblem, GaProblem, Score, ScoredIndividual};
use crate::error::{GaError, Result};
use crate::random::rng_from_seed;
use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A generation's best score reached `good_enough_fitness`.
    GoodEnough,
    /// `max_iterations` generations were scored.
    MaxIterations,
}

/// Result of an evolution run.
///
/// `best` is the best individual of the **final** generation. No record of
/// earlier generations' individuals is kept, so a better individual seen
/// before a regression is not returned.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<T, S> {
    /// Total fitness evaluations: generations run times population size.
    pub evaluations: usize,

    /// Best scored individual of the final generation.
    pub best: ScoredIndividual<T, S>,

    /// Number of generations scored.
    pub generations: usize,

    /// Which stop condition ended the run.
    pub reason: Termination,

    /// Best score of each generation, in order.
    pub score_history: Vec<f64>,
}

impl<T, S> GaResult<T, S> {
    /// Splits the result into `(evaluations, best)`.
    pub fn into_parts(self) -> (usize, ScoredIndividual<T, S>) {
        (self.evaluations, self.best)
    }
}

/// State of the generational loop.
#[derive(Debug, Clone)]
pub enum EvolutionState<T, S> {
    /// Generation `iteration` is waiting to be scored.
    Running {
        /// Zero-based generation index.
        iteration: usize,
        /// Unscored individuals of this generation.
        population: Vec<T>,
        /// Best score of every generation scored so far.
        score_history: Vec<f64>,
    },
    /// The run is over.
    Terminated(GaResult<T, S>),
}

impl<T, S> EvolutionState<T, S> {
    /// Initial state: generation 0 is `first_generation`.
    pub fn start(first_generation: Vec<T>) -> Self {
        EvolutionState::Running {
            iteration: 0,
            population: first_generation,
            score_history: Vec::new(),
        }
    }

    /// Whether the run is over.
    pub fn is_terminated(&self) -> bool {
        matches!(self, EvolutionState::Terminated(_))
    }
}

impl<T: Clone + Send + Sync, S: Score> EvolutionState<T, S> {
    /// Performs one step of the loop.
    ///
    /// Scores the current generation, reports its best individual, and
    /// either terminates or moves to the next generation. A terminated
    /// state is returned unchanged.
    pub fn advance<P, R>(self, problem: &P, config: &GaConfig<S>, rng: &mut R) -> Result<Self>
    where
        P: GaProblem<Individual = T, Score = S>,
        R: Rng,
    {
        let (iteration, population, mut score_history) = match self {
            EvolutionState::Running {
                iteration,
                population,
                score_history,
            } => (iteration, population, score_history),
            done @ EvolutionState::Terminated(_) => return Ok(done),
        };

        let size = population.len();
        let scored = score_population(problem, population, config.parallel);
        let best = best_of(&scored).ok_or(GaError::EmptyPopulation)?.clone();
        score_history.push(best.score.to_f64());

        tracing::info!(
            iteration,
            best_score = ?best.score,
            population = size,
            "generation scored"
        );
        problem.on_generation(iteration, &best);

        let good_enough = best.score.compare(&config.good_enough_fitness) != Ordering::Less;
        let exhausted = iteration + 1 >= config.max_iterations;
        if good_enough || exhausted {
            let reason = if good_enough {
                Termination::GoodEnough
            } else {
                Termination::MaxIterations
            };
            return Ok(EvolutionState::Terminated(GaResult {
                evaluations: (iteration + 1) * size,
                best,
                generations: iteration + 1,
                reason,
                score_history,
            }));
        }

        let population = next_generation(
            problem,
            &config.tournament(),
            config.mutation_probability,
            &scored,
            config.parallel,
            rng,
        )?;
        tracing::debug!(iteration = iteration + 1, "next generation bred");

        Ok(EvolutionState::Running {
            iteration: iteration + 1,
            population,
            score_history,
        })
    }
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::quartets::{QuartetProblem, MAX_FITNESS};
/// use u_evolve::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_good_enough_fitness(MAX_FITNESS)
///     .with_max_iterations(10)
///     .with_seed(42);
/// let result = GaRunner::run(&QuartetProblem, &config, vec![0u64; 8]).unwrap();
/// assert_eq!(result.best.score, MAX_FITNESS);
/// assert_eq!(result.evaluations, 8);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the engine from `first_generation`.
    ///
    /// # Errors
    ///
    /// - [`GaError::InvalidConfig`] if [`GaConfig::validate`] fails.
    /// - [`GaError::EmptyPopulation`] if `first_generation` is empty.
    /// - [`GaError::SelectionExhausted`] if a tournament trips its retry
    ///   guard.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig<P::Score>,
        first_generation: Vec<P::Individual>,
    ) -> Result<GaResult<P::Individual, P::Score>> {
        config.validate()?;
        if first_generation.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let mut rng = rng_from_seed(config.seed);
        let population_size = first_generation.len();
        tracing::info!(
            population_size,
            max_iterations = config.max_iterations,
            tournament_size = config.tournament_size,
            selection_probability = config.selection_probability,
            mutation_probability = config.mutation_probability,
            parallel = config.parallel,
            "evolution started"
        );

        let mut state = EvolutionState::start(first_generation);
        loop {
            match state.advance(problem, config, &mut rng)? {
                EvolutionState::Terminated(result) => {
                    tracing::info!(
                        generations = result.generations,
                        evaluations = result.evaluations,
                        best_score = ?result.best.score,
                        reason = ?result.reason,
                        "evolution finished"
                    );
                    return Ok(result);
                }
                running => state = running,
            }
        }
    }
}

/// Runs the engine with closure operators and default tournament settings.
///
/// Returns `(total fitness evaluations, best scored individual of the
/// final generation)`.
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_evolve::ga::evolve;
///
/// let (evaluations, best) = evolve(
///     |x: &u8| x.count_ones(),
///     |a: &u8, b: &u8, _rng: &mut dyn RngCore| a & 0x0F | b & 0xF0,
///     |x: &u8, rng: &mut dyn RngCore| x ^ (1u8 << rng.random_range(0..8u32)),
///     0.2,
///     8,
///     200,
///     vec![0u8; 16],
/// )
/// .unwrap();
/// assert!(evaluations <= 200 * 16);
/// assert!(best.score <= 8);
/// ```
pub fn evolve<T, S, F, C, M>(
    fitness: F,
    crossbreed: C,
    mutate: M,
    mutation_probability: f64,
    good_enough_fitness: S,
    max_iterations: usize,
    first_generation: Vec<T>,
) -> Result<(usize, ScoredIndividual<T, S>)>
where
    T: Clone + Send + Sync,
    S: Score,
    F: Fn(&T) -> S + Send + Sync,
    C: Fn(&T, &T, &mut dyn RngCore) -> T + Send + Sync,
    M: Fn(&T, &mut dyn RngCore) -> T + Send + Sync,
{
    let problem = FnProblem::new(fitness, crossbreed, mutate);
    let config = GaConfig::default()
        .with_mutation_probability(mutation_probability)
        .with_good_enough_fitness(good_enough_fitness)
        .with_max_iterations(max_iterations);
    GaRunner::run(&problem, &config, first_generation).map(GaResult::into_parts)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::quartets::{QuartetProblem, MAX_FITNESS};
    use std::sync::Mutex;

    // ---- OneMax over a Vec<bool>: maximize the number of set bits ----

    struct OneMax {
        n: usize,
    }

    impl GaProblem for OneMax {
        type Individual = Vec<bool>;
        type Score = usize;

        fn fitness(&self, bits: &Vec<bool>) -> usize {
            bits.iter().filter(|&&b| b).count()
        }

        fn crossbreed<R: Rng>(&self, a: &Vec<bool>, b: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            let point = rng.random_range(0..self.n);
            a[..point].iter().chain(&b[point..]).copied().collect()
        }

        fn mutate<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            let mut child = bits.clone();
            let idx = rng.random_range(0..self.n);
            child[idx] = !child[idx];
            child
        }
    }

    fn zeros(n: usize, count: usize) -> Vec<Vec<bool>> {
        vec![vec![false; n]; count]
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMax { n: 20 };
        let config = GaConfig::default()
            .with_mutation_probability(0.5)
            .with_max_iterations(300)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config, zeros(20, 40)).unwrap();

        assert!(
            result.best.score >= 15,
            "expected score >= 15 for 20-bit OneMax, got {}",
            result.best.score
        );
    }

    #[test]
    fn test_evaluations_accounting() {
        let problem = OneMax { n: 16 };
        let config = GaConfig::default()
            .with_max_iterations(25)
            .with_seed(1)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config, zeros(16, 12)).unwrap();

        assert_eq!(result.reason, Termination::MaxIterations);
        assert_eq!(result.generations, 25);
        assert_eq!(result.evaluations, 25 * 12);
        assert_eq!(result.score_history.len(), 25);
    }

    #[test]
    fn test_good_enough_stops_early() {
        let problem = OneMax { n: 10 };
        let config = GaConfig::default()
            .with_good_enough_fitness(4)
            .with_mutation_probability(0.8)
            .with_max_iterations(10_000)
            .with_seed(3);

        let result = GaRunner::run(&problem, &config, zeros(10, 30)).unwrap();

        assert_eq!(result.reason, Termination::GoodEnough);
        assert!(result.generations < 10_000);
        assert!(result.best.score >= 4);
        assert_eq!(result.evaluations, result.generations * 30);
        // Only the final generation may reach the threshold.
        let before_last = &result.score_history[..result.score_history.len() - 1];
        assert!(before_last.iter().all(|&s| s < 4.0));
    }

    #[test]
    fn test_all_zero_quartets_stop_at_iteration_zero() {
        let config = GaConfig::default()
            .with_good_enough_fitness(MAX_FITNESS)
            .with_max_iterations(100);

        let result = GaRunner::run(&QuartetProblem, &config, vec![0u64; 10]).unwrap();

        assert_eq!(result.best.score, 80);
        assert_eq!(result.best.individual, 0);
        assert_eq!(result.generations, 1);
        assert_eq!(result.evaluations, 10);
        assert_eq!(result.reason, Termination::GoodEnough);
    }

    #[test]
    fn test_single_individual_is_stable() {
        let genome = 0x2A5F_0000_1234_ABCDu64 & crate::ga::quartets::GENOME_MASK;
        let config = GaConfig::default()
            .with_tournament_size(1)
            .with_mutation_probability(0.0)
            .with_max_iterations(17)
            .with_seed(9);

        let result = GaRunner::run(&QuartetProblem, &config, vec![genome]).unwrap();

        assert_eq!(result.generations, 17);
        assert_eq!(result.evaluations, 17);
        assert_eq!(result.best.individual, genome);
        assert_eq!(result.best.score, QuartetProblem.fitness(&genome));
        assert!(result
            .score_history
            .iter()
            .all(|&s| (s - result.best.score as f64).abs() < 1e-12));
    }

    #[test]
    fn test_weak_selection_pressure_completes() {
        // Size-1 tournaments at p = 1e-5 need ~100 000 draws per winner.
        let config = GaConfig::default()
            .with_tournament_size(1)
            .with_selection_probability(1e-5)
            .with_max_iterations(3)
            .with_seed(1);

        let result = GaRunner::run(&QuartetProblem, &config, vec![5u64; 8]).unwrap();

        assert_eq!(result.generations, 3);
        assert_eq!(result.reason, Termination::MaxIterations);
        assert_eq!(result.evaluations, 3 * 8);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let problem = OneMax { n: 24 };
        let config = GaConfig::default()
            .with_max_iterations(40)
            .with_mutation_probability(0.3)
            .with_seed(2024)
            .with_parallel(false);

        let a = GaRunner::run(&problem, &config, zeros(24, 20)).unwrap();
        let b = GaRunner::run(&problem, &config, zeros(24, 20)).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);

        // Per-slot generators make parallel runs reproducible as well.
        let c = GaRunner::run(&problem, &config.clone().with_parallel(true), zeros(24, 20))
            .unwrap();
        assert_eq!(a.best, c.best);
        assert_eq!(a.score_history, c.score_history);
    }

    #[test]
    fn test_on_generation_called_each_generation() {
        struct Recording {
            inner: OneMax,
            seen: Mutex<Vec<(usize, usize)>>,
        }

        impl GaProblem for Recording {
            type Individual = Vec<bool>;
            type Score = usize;

            fn fitness(&self, bits: &Vec<bool>) -> usize {
                self.inner.fitness(bits)
            }

            fn crossbreed<R: Rng>(&self, a: &Vec<bool>, b: &Vec<bool>, rng: &mut R) -> Vec<bool> {
                self.inner.crossbreed(a, b, rng)
            }

            fn mutate<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Vec<bool> {
                self.inner.mutate(bits, rng)
            }

            fn on_generation(&self, iteration: usize, best: &ScoredIndividual<Vec<bool>, usize>) {
                self.seen.lock().unwrap().push((iteration, best.score));
            }
        }

        let problem = Recording {
            inner: OneMax { n: 8 },
            seen: Mutex::new(Vec::new()),
        };
        let config = GaConfig::default().with_max_iterations(6).with_seed(4);
        let result = GaRunner::run(&problem, &config, zeros(8, 5)).unwrap();

        let seen = problem.seen.into_inner().unwrap();
        let iterations: Vec<usize> = seen.iter().map(|&(i, _)| i).collect();
        assert_eq!(iterations, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(seen.last().unwrap().1, result.best.score);
    }

    #[test]
    fn test_state_machine_steps() {
        let problem = OneMax { n: 4 };
        let config = GaConfig::default().with_max_iterations(2).with_seed(0);
        let mut rng = crate::random::create_rng(0);

        let state = EvolutionState::start(zeros(4, 3));
        let state = state.advance(&problem, &config, &mut rng).unwrap();
        match &state {
            EvolutionState::Running {
                iteration,
                population,
                score_history,
            } => {
                assert_eq!(*iteration, 1);
                assert_eq!(population.len(), 3);
                assert_eq!(score_history.len(), 1);
            }
            EvolutionState::Terminated(_) => panic!("terminated after one generation"),
        }

        let state = state.advance(&problem, &config, &mut rng).unwrap();
        assert!(state.is_terminated());
        let state = state.advance(&problem, &config, &mut rng).unwrap();
        match state {
            EvolutionState::Terminated(result) => assert_eq!(result.evaluations, 6),
            EvolutionState::Running { .. } => panic!("expected terminated state"),
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let problem = OneMax { n: 4 };
        for config in [
            GaConfig::default().with_tournament_size(0),
            GaConfig::default().with_selection_probability(0.0),
            GaConfig::default().with_max_iterations(0),
        ] {
            let err = GaRunner::run(&problem, &config, zeros(4, 3)).unwrap_err();
            assert!(matches!(err, GaError::InvalidConfig { .. }), "{err:?}");
        }
    }

    #[test]
    fn test_empty_first_generation() {
        let problem = OneMax { n: 4 };
        let err = GaRunner::run(&problem, &GaConfig::default(), vec![]).unwrap_err();
        assert_eq!(err, GaError::EmptyPopulation);
    }

    #[test]
    fn test_evolve_closure_entry_point() {
        let (evaluations, best) = evolve(
            |x: &u64| QuartetProblem.fitness(x),
            |a: &u64, b: &u64, mut rng: &mut dyn RngCore| QuartetProblem.crossbreed(a, b, &mut rng),
            |x: &u64, mut rng: &mut dyn RngCore| QuartetProblem.mutate(x, &mut rng),
            0.1,
            MAX_FITNESS,
            1,
            vec![0u64, 1, 2],
        )
        .unwrap();
        assert_eq!(evaluations, 3);
        assert_eq!(best.score, MAX_FITNESS);
        assert_eq!(best.individual, 0);
    }

    #[test]
    #[should_panic(expected = "fitness exploded")]
    fn test_operator_panic_propagates() {
        let _ = evolve(
            |_: &u8| -> u32 { panic!("fitness exploded") },
            |a: &u8, _b: &u8, _rng: &mut dyn RngCore| *a,
            |x: &u8, _rng: &mut dyn RngCore| *x,
            0.1,
            1,
            5,
            vec![1u8; 4],
        );
    }
}
