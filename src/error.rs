//! Error taxonomy for the placement engine.
//!
//! Every fallible operation returns [`PlacementError`]. Errors are fatal for
//! the current run: the engine never retries, since re-running a seeded,
//! deterministic search on the same input produces the same failure.

use thiserror::Error;

/// Errors raised while building a problem, validating a configuration, or
/// running the search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// Invalid problem instance or out-of-range parameter.
    ///
    /// Raised before any generation runs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A non-finite or negative value appeared while evaluating a solution.
    #[error("numeric anomaly in {context}: {value}")]
    NumericAnomaly {
        /// Which quantity was being computed.
        context: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The population was empty when an individual was requested.
    ///
    /// A validated configuration makes this unreachable; seeing it means an
    /// internal invariant was broken.
    #[error("population is empty")]
    EmptyPopulation,
}

impl PlacementError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PlacementError::Configuration(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlacementError>;
