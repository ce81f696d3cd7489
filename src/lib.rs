//! Generic generational genetic algorithm engine.
//!
//! Given a first generation, a fitness operator and two genetic operators
//! (crossbreed, mutate), the engine scores each generation, stops once a
//! generation is good enough or the iteration budget is spent, and
//! otherwise breeds the next generation through probabilistic tournament
//! selection followed by mutation.
//!
//! - **Selection**: tournaments rank a random sample by score and walk it
//!   with independent coin flips, so pressure is tuned by a probability
//!   rather than by the sample size alone.
//! - **Parallelism**: scoring, crossbreeding and mutation fan out over
//!   rayon behind the default `parallel` feature. Every task owns its own
//!   generator, so a seeded run gives the same result in parallel and
//!   sequential mode.
//! - **Failure model**: malformed configuration is rejected up front with
//!   [`GaError`]; panics from user operators unwind out of the run.
//!
//! # Architecture
//!
//! - [`random`]: generator creation and per-task generator derivation
//! - [`ga`]: problem traits, configuration, operators and the driver
//! - [`error`]: the crate error type
//!
//! The crate contains no domain-specific concepts; the [`ga::quartets`]
//! genome exists only to exercise the engine.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GaError, Result};
