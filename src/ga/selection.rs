//! Probabilistic tournament selection.
//!
//! A tournament draws `size` individuals with replacement, ranks them by
//! descending score and walks the ranking, giving each candidate an
//! independent trial that succeeds with `selection_probability`. The first
//! success wins. If every trial fails the whole draw starts again.
//!
//! The candidate at rank `i` of one draw wins with probability
//! `p·(1-p)^i`, so `p` tunes selection pressure independently of the
//! tournament size.
//!
//! A round fails only when all `size` trials fail, which happens with
//! probability `(1-p)^size`. The retry guard is sized from that miss
//! probability, so a valid tournament exhausts it with probability below
//! `e^-40` no matter how small `p` is.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::sampler::Sampler;
use super::types::{Score, ScoredIndividual};
use crate::error::{GaError, Result};
use rand::Rng;

// Expected rounds per winner are multiplied by this to size the guard.
const GUARD_FACTOR: f64 = 40.0;

/// Tournament selection parameters.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{ScoredIndividual, Tournament};
/// use u_evolve::random::create_rng;
///
/// let population = vec![
///     ScoredIndividual::new(1u32, 'a'),
///     ScoredIndividual::new(9u32, 'b'),
/// ];
/// let mut rng = create_rng(42);
/// let winner = Tournament::default().select(&population, &mut rng).unwrap();
/// assert!(population.contains(winner));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tournament {
    /// Individuals drawn per round.
    pub size: usize,
    /// Success probability of each candidate's trial.
    pub selection_probability: f64,
    /// Rounds tried before giving up.
    ///
    /// `None` derives the limit from `size` and `selection_probability`
    /// (see [`Tournament::round_limit`]).
    pub max_rounds: Option<usize>,
}

impl Default for Tournament {
    fn default() -> Self {
        Tournament {
            size: 5,
            selection_probability: 0.5,
            max_rounds: None,
        }
    }
}

impl Tournament {
    /// Creates a tournament whose retry guard is derived from its parameters.
    pub fn new(size: usize, selection_probability: f64) -> Self {
        Tournament {
            size,
            selection_probability,
            ..Self::default()
        }
    }

    /// Checks that selection can terminate.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GaError::invalid("tournament_size", "must be at least 1"));
        }
        let p = self.selection_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(GaError::invalid(
                "selection_probability",
                format!("must be in (0, 1], got {p}"),
            ));
        }
        if self.max_rounds == Some(0) {
            return Err(GaError::invalid("max_selection_rounds", "must be at least 1"));
        }
        Ok(())
    }

    /// Number of rounds [`select`](Tournament::select) tries before giving up.
    ///
    /// An explicit `max_rounds` is used as is. Otherwise the limit is
    /// `40 / (1 - (1-p)^size)` rounds, forty times the expected number of
    /// rounds per winner, saturating at `usize::MAX`.
    pub fn round_limit(&self) -> usize {
        if let Some(rounds) = self.max_rounds {
            return rounds;
        }
        // 1 - (1-p)^size, accurate for tiny p.
        let hit = -(self.size as f64 * (-self.selection_probability).ln_1p()).exp_m1();
        (GUARD_FACTOR / hit).ceil().max(1.0) as usize
    }

    /// Selects one individual from `population`.
    ///
    /// The returned reference always points into `population`.
    ///
    /// # Errors
    ///
    /// - [`GaError::InvalidConfig`] for a zero size or a probability
    ///   outside (0, 1].
    /// - [`GaError::EmptyPopulation`] when `population` is empty.
    /// - [`GaError::SelectionExhausted`] after
    ///   [`round_limit`](Tournament::round_limit) draws without a winner.
    pub fn select<'a, T, S: Score, R: Rng>(
        &self,
        population: &'a [ScoredIndividual<T, S>],
        rng: &mut R,
    ) -> Result<&'a ScoredIndividual<T, S>> {
        self.validate()?;
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let rounds = self.round_limit();
        let mut sample: Vec<&'a ScoredIndividual<T, S>> = Vec::with_capacity(self.size);
        for round in 1..=rounds {
            sample.clear();
            sample.extend(Sampler::new(population, rng)?.take(self.size));
            // Stable: equal scores keep draw order.
            sample.sort_by(|a, b| b.score.compare(&a.score));

            for candidate in &sample {
                if rng.random_bool(self.selection_probability) {
                    if round > 1 {
                        tracing::trace!(round, "tournament winner after redraw");
                    }
                    return Ok(*candidate);
                }
            }
        }

        tracing::warn!(
            rounds,
            size = self.size,
            p = self.selection_probability,
            "tournament selection exhausted its retry guard"
        );
        Err(GaError::SelectionExhausted { rounds })
    }
}
