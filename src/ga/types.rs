//! Core trait definitions for the engine.
//!
//! [`Score`] and [`GaProblem`] define the contract between the generic
//! engine and a concrete genome. The engine never looks inside an
//! individual; it only hands individuals to the operators of the problem.

use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Fitness value produced by [`GaProblem::fitness`].
///
/// Higher scores are better (maximization). Built-in implementations
/// exist for the primitive integer and float types.
pub trait Score: PartialOrd + Copy + Send + Sync + Debug + 'static {
    /// The largest representable score.
    ///
    /// Used as the default good-enough threshold, which makes a run stop
    /// only on its iteration budget.
    fn max_value() -> Self;

    /// Converts the score to `f64` for logging and history.
    fn to_f64(self) -> f64;

    /// Total order used for every comparison made by the engine.
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

macro_rules! impl_int_score {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                fn max_value() -> Self {
                    <$t>::MAX
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_int_score!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

// NaN ranks below every other value so it can never be the best.
macro_rules! impl_float_score {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                fn max_value() -> Self {
                    <$t>::INFINITY
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn compare(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (true, true) => Ordering::Equal,
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
                    }
                }
            }
        )*
    };
}

impl_float_score!(f32, f64);

/// An individual paired with its fitness score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredIndividual<T, S> {
    /// Fitness of `individual`.
    pub score: S,
    /// The genome.
    pub individual: T,
}

impl<T, S> ScoredIndividual<T, S> {
    /// Pairs a score with an individual.
    pub fn new(score: S, individual: T) -> Self {
        Self { score, individual }
    }
}

/// Defines an optimization problem: the operator bundle over a genome type.
///
/// # Contract
///
/// - [`fitness`](GaProblem::fitness) must be deterministic and free of
///   observable side effects. The engine evaluates individuals in parallel
///   when configured to.
/// - [`crossbreed`](GaProblem::crossbreed) and [`mutate`](GaProblem::mutate)
///   get all their randomness from the generator they are handed.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because every operator may run on a
/// rayon worker.
pub trait GaProblem: Send + Sync {
    /// The genome type.
    type Individual: Clone + Send + Sync;

    /// The fitness type.
    type Score: Score;

    /// Evaluates an individual.
    fn fitness(&self, individual: &Self::Individual) -> Self::Score;

    /// Combines two parents into one offspring.
    fn crossbreed<R: Rng>(
        &self,
        parent_a: &Self::Individual,
        parent_b: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Returns a perturbed copy of an individual.
    fn mutate<R: Rng>(&self, individual: &Self::Individual, rng: &mut R) -> Self::Individual;

    /// Called once per generation with the iteration index and the best
    /// scored individual of that generation.
    ///
    /// The default implementation is a no-op.
    fn on_generation(
        &self,
        _iteration: usize,
        _best: &ScoredIndividual<Self::Individual, Self::Score>,
    ) {
    }
}

/// A [`GaProblem`] assembled from three closures.
///
/// Crossbreed and mutation closures receive the engine's generator as
/// `&mut dyn RngCore`, which implements [`Rng`].
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_evolve::ga::FnProblem;
///
/// let problem = FnProblem::new(
///     |x: &u32| x.count_ones(),
///     |a: &u32, b: &u32, _rng: &mut dyn RngCore| a & 0xFFFF | b & !0xFFFF,
///     |x: &u32, rng: &mut dyn RngCore| x ^ (1u32 << rng.random_range(0..32u32)),
/// );
/// # let _ = problem;
/// ```
pub struct FnProblem<T, S, F, C, M> {
    fitness: F,
    crossbreed: C,
    mutate: M,
    _marker: PhantomData<fn() -> (T, S)>,
}

impl<T, S, F, C, M> FnProblem<T, S, F, C, M>
where
    F: Fn(&T) -> S,
    C: Fn(&T, &T, &mut dyn RngCore) -> T,
    M: Fn(&T, &mut dyn RngCore) -> T,
{
    /// Bundles fitness, crossbreed and mutation closures.
    pub fn new(fitness: F, crossbreed: C, mutate: M) -> Self {
        Self {
            fitness,
            crossbreed,
            mutate,
            _marker: PhantomData,
        }
    }
}

impl<T, S, F, C, M> GaProblem for FnProblem<T, S, F, C, M>
where
    T: Clone + Send + Sync,
    S: Score,
    F: Fn(&T) -> S + Send + Sync,
    C: Fn(&T, &T, &mut dyn RngCore) -> T + Send + Sync,
    M: Fn(&T, &mut dyn RngCore) -> T + Send + Sync,
{
    type Individual = T;
    type Score = S;

    fn fitness(&self, individual: &T) -> S {
        (self.fitness)(individual)
    }

    fn crossbreed<R: Rng>(&self, parent_a: &T, parent_b: &T, rng: &mut R) -> T {
        let rng: &mut dyn RngCore = rng;
        (self.crossbreed)(parent_a, parent_b, rng)
    }

    fn mutate<R: Rng>(&self, individual: &T, rng: &mut R) -> T {
        let rng: &mut dyn RngCore = rng;
        (self.mutate)(individual, rng)
    }
}
