//! Engine configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::selection::Tournament;
use super::types::Score;
use crate::error::{GaError, Result};

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::<u32>::default();
/// assert_eq!(config.tournament_size, 5);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.good_enough_fitness, u32::MAX);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_good_enough_fitness(80u32)
///     .with_tournament_size(7)
///     .with_selection_probability(0.75)
///     .with_mutation_probability(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig<S> {
    /// Number of individuals drawn (with replacement) per tournament.
    ///
    /// Must be at least 1. A size of 1 makes selection uniform.
    pub tournament_size: usize,

    /// Chance that a tournament candidate wins its trial, in (0, 1].
    ///
    /// Candidates are tried best first, so values close to 1 approach
    /// best-of-sample elitism.
    pub selection_probability: f64,

    /// Chance that an offspring is replaced by a mutated copy, in [0, 1].
    pub mutation_probability: f64,

    /// A generation whose best score reaches this value ends the run.
    pub good_enough_fitness: S,

    /// Maximum number of generations scored before the run ends.
    pub max_iterations: usize,

    /// Number of complete tournament draws tried before selection gives up
    /// with [`GaError::SelectionExhausted`].
    ///
    /// `None` sizes the limit from the tournament size and selection
    /// probability so that a valid configuration never realistically hits
    /// it (see [`Tournament::round_limit`]).
    pub max_selection_rounds: Option<usize>,

    /// Whether to score and breed individuals in parallel using rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl<S: Score> Default for GaConfig<S> {
    fn default() -> Self {
        Self {
            tournament_size: 5,
            selection_probability: 0.5,
            mutation_probability: 0.1,
            good_enough_fitness: S::max_value(),
            max_iterations: 500,
            max_selection_rounds: None,
            parallel: true,
            seed: None,
        }
    }
}

impl<S: Score> GaConfig<S> {
    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the per-candidate selection probability.
    pub fn with_selection_probability(mut self, p: f64) -> Self {
        self.selection_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the score at which the run stops early.
    pub fn with_good_enough_fitness(mut self, score: S) -> Self {
        self.good_enough_fitness = score;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Caps the tournament retry guard at `n` rounds.
    pub fn with_max_selection_rounds(mut self, n: usize) -> Self {
        self.max_selection_rounds = Some(n);
        self
    }

    /// Enables or disables parallel evaluation and breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The tournament described by this configuration.
    pub fn tournament(&self) -> Tournament {
        Tournament {
            size: self.tournament_size,
            selection_probability: self.selection_probability,
            max_rounds: self.max_selection_rounds,
        }
    }

    /// Validates the configuration.
    ///
    /// A zero tournament size or zero selection probability would make
    /// selection loop forever, so both are rejected here.
    pub fn validate(&self) -> Result<()> {
        self.tournament().validate()?;
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::invalid(
                "mutation_probability",
                format!("must be in [0, 1], got {}", self.mutation_probability),
            ));
        }
        if self.max_iterations == 0 {
            return Err(GaError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}
