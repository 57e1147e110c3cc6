//! CLI error types.

use harness_core::HarnessError;
use harness_rng::StrategyError;
use thiserror::Error;

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Harness configuration rejected.
    #[error("Harness error: {0}")]
    Harness(#[from] HarnessError),

    /// Strategy name not recognised.
    #[error("{0}")]
    Strategy(#[from] StrategyError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_harness() {
        let err: CliError = HarnessError::InvalidWorkerCount(0).into();
        assert!(err.to_string().starts_with("Harness error: Invalid worker count 0"));
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let err = CliError::InvalidArgument("trials must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: trials must be positive");
    }
}
