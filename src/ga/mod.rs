//! Generational genetic algorithm engine.
//!
//! A generic, domain-agnostic engine built on trait-based abstractions.
//! Users define their genome by implementing [`GaProblem`] (or by handing
//! three closures to [`FnProblem`] / [`evolve`]), which specifies how to
//! score, crossbreed, and mutate individuals.
//!
//! # Core Traits
//!
//! - [`Score`]: Totally ordered fitness value (higher is better)
//! - [`GaProblem`]: Operator bundle over a genome type
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (tournament, mutation, stop conditions)
//! - [`GaRunner`]: Executes the generational loop
//! - [`EvolutionState`]: One-step-at-a-time form of the same loop
//! - [`GaResult`]: Final result with evaluation count and score history
//!
//! # Building Blocks
//!
//! - [`Sampler`]: Uniform draws with replacement
//! - [`Tournament`]: Probabilistic tournament selection
//! - [`crossbreed`], [`mutate_population`], [`next_generation`]: Population operators
//! - [`score_population`]: Optionally parallel fitness evaluation
//! - [`quartets`]: 63-bit quartet genome used by the demo binary
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

mod breeding;
mod config;
mod generation;
mod mutation;
pub mod quartets;
mod runner;
mod sampler;
mod scoring;
mod selection;
mod types;

pub use breeding::crossbreed;
pub use config::GaConfig;
pub use generation::next_generation;
pub use mutation::mutate_population;
pub use runner::{evolve, EvolutionState, GaResult, GaRunner, Termination};
pub use sampler::Sampler;
pub use scoring::{best_of, score_population};
pub use selection::Tournament;
pub use types::{FnProblem, GaProblem, Score, ScoredIndividual};
