//! Error type for the evolution engine.

use thiserror::Error;

/// Errors reported by the engine.
///
/// Operator functions supplied by the caller are not wrapped: a panic in
/// a fitness, crossbreed or mutation operator unwinds out of the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// A configuration parameter is outside its valid range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The population (or the sequence handed to the sampler) is empty.
    #[error("population must contain at least one individual")]
    EmptyPopulation,

    /// Tournament selection redrew its sample too many times without a winner.
    #[error("tournament selection found no winner after {rounds} rounds")]
    SelectionExhausted {
        /// Number of complete draws attempted.
        rounds: usize,
    },
}

impl GaError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GaError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
