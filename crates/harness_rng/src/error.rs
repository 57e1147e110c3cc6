//! Strategy error types.

use harness_core::HarnessError;
use thiserror::Error;

/// Errors raised when selecting or running a strategy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    /// No strategy has the given name.
    #[error("Unknown strategy '{0}'. Known strategies: {known}", known = crate::strategy::Strategy::names().join(", "))]
    UnknownStrategy(String),

    /// The harness rejected its configuration.
    #[error(transparent)]
    Harness(#[from] HarnessError),
}
