//! Error types for the trial harness.
//!
//! Work units themselves are infallible; the only recoverable failures are
//! configuration problems detected before any worker is launched.

use thiserror::Error;

use crate::config::{MAX_OPS_PER_WORKER, MAX_WORKERS};

/// Errors raised while configuring or constructing a [`TrialHarness`](crate::TrialHarness).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    /// Worker count outside the valid range [1, MAX_WORKERS].
    #[error("Invalid worker count {0}: must be in range [1, {max}]", max = MAX_WORKERS)]
    InvalidWorkerCount(usize),

    /// Per-worker operation count above MAX_OPS_PER_WORKER.
    #[error("Invalid ops per worker {0}: must be at most {max}", max = MAX_OPS_PER_WORKER)]
    InvalidOpsPerWorker(usize),

    /// A multi-trial run was requested with zero trials.
    #[error("Invalid trial count {0}: at least one trial is required")]
    InvalidTrialCount(usize),

    /// The worker thread pool could not be started.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}
