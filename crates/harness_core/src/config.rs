//! Harness configuration.
//!
//! The benchmark runs with two fixed quantities: the number of operations each
//! worker performs per trial ([`OPS_PER_WORKER`]) and the number of workers,
//! which is the host's available parallelism queried once per process
//! ([`default_workers`]). [`HarnessConfig`] carries both, plus the dispatch
//! mode, and validates them before a harness is built.

use std::sync::OnceLock;

use super::error::HarnessError;

/// Operations each worker performs per trial.
pub const OPS_PER_WORKER: usize = 1000;

/// Upper bound on the worker count.
pub const MAX_WORKERS: usize = 4096;

/// Upper bound on per-worker operations.
pub const MAX_OPS_PER_WORKER: usize = 100_000_000;

static HOST_WORKERS: OnceLock<usize> = OnceLock::new();

/// Returns the host's available parallelism.
///
/// Queried on first call and reused for the rest of the process, so every
/// trial in a run sees the same worker count.
pub fn default_workers() -> usize {
    *HOST_WORKERS.get_or_init(|| num_cpus::get().max(1))
}

/// How a trial runs its workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Each worker is a task on the harness pool; all run in parallel.
    #[default]
    Concurrent,

    /// Workers run one after another on the calling thread.
    ///
    /// Same loop shape and barrier as [`Dispatch::Concurrent`], no parallelism.
    Inline,
}

impl std::fmt::Display for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Concurrent => write!(f, "concurrent"),
            Dispatch::Inline => write!(f, "inline"),
        }
    }
}

/// Immutable trial harness configuration.
///
/// Use [`HarnessConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use harness_core::{Dispatch, HarnessConfig, OPS_PER_WORKER};
///
/// let config = HarnessConfig::builder()
///     .workers(4)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.workers(), 4);
/// assert_eq!(config.ops_per_worker(), OPS_PER_WORKER);
/// assert_eq!(config.dispatch(), Dispatch::Concurrent);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Workers launched per trial.
    workers: usize,
    /// Work unit invocations per worker per trial.
    ops_per_worker: usize,
    /// Concurrent or inline execution.
    dispatch: Dispatch,
}

impl HarnessConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::default()
    }

    /// Returns the number of workers per trial.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the number of operations each worker performs per trial.
    #[inline]
    pub fn ops_per_worker(&self) -> usize {
        self.ops_per_worker
    }

    /// Returns the dispatch mode.
    #[inline]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Returns the total number of work unit invocations per trial.
    #[inline]
    pub fn ops_per_trial(&self) -> usize {
        self.workers * self.ops_per_worker
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if:
    /// - `workers` is 0 or greater than [`MAX_WORKERS`]
    /// - `ops_per_worker` is greater than [`MAX_OPS_PER_WORKER`]
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(HarnessError::InvalidWorkerCount(self.workers));
        }
        if self.ops_per_worker > MAX_OPS_PER_WORKER {
            return Err(HarnessError::InvalidOpsPerWorker(self.ops_per_worker));
        }
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            ops_per_worker: OPS_PER_WORKER,
            dispatch: Dispatch::Concurrent,
        }
    }
}

/// Builder for [`HarnessConfig`].
///
/// Unset fields fall back to [`default_workers`] and [`OPS_PER_WORKER`].
#[derive(Clone, Debug, Default)]
pub struct HarnessConfigBuilder {
    workers: Option<usize>,
    ops_per_worker: Option<usize>,
    dispatch: Dispatch,
}

impl HarnessConfigBuilder {
    /// Sets the number of workers per trial.
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the number of operations per worker.
    #[inline]
    pub fn ops_per_worker(mut self, ops_per_worker: usize) -> Self {
        self.ops_per_worker = Some(ops_per_worker);
        self
    }

    /// Sets the dispatch mode.
    #[inline]
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the resulting configuration fails
    /// [`HarnessConfig::validate`].
    pub fn build(self) -> Result<HarnessConfig, HarnessError> {
        let config = HarnessConfig {
            workers: self.workers.unwrap_or_else(default_workers),
            ops_per_worker: self.ops_per_worker.unwrap_or(OPS_PER_WORKER),
            dispatch: self.dispatch,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = HarnessConfig::builder().build().unwrap();

        assert_eq!(config.workers(), default_workers());
        assert_eq!(config.ops_per_worker(), OPS_PER_WORKER);
        assert_eq!(config.dispatch(), Dispatch::Concurrent);
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = HarnessConfig::builder()
            .workers(3)
            .ops_per_worker(7)
            .dispatch(Dispatch::Inline)
            .build()
            .unwrap();

        assert_eq!(config.workers(), 3);
        assert_eq!(config.ops_per_worker(), 7);
        assert_eq!(config.dispatch(), Dispatch::Inline);
        assert_eq!(config.ops_per_trial(), 21);
    }

    #[test]
    fn test_config_zero_ops_is_valid() {
        let config = HarnessConfig::builder()
            .workers(2)
            .ops_per_worker(0)
            .build()
            .unwrap();

        assert_eq!(config.ops_per_trial(), 0);
    }

    #[test]
    fn test_config_invalid_zero_workers() {
        let result = HarnessConfig::builder().workers(0).build();

        assert!(matches!(result, Err(HarnessError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_workers() {
        let result = HarnessConfig::builder().workers(MAX_WORKERS + 1).build();

        assert!(matches!(result, Err(HarnessError::InvalidWorkerCount(_))));
    }

    #[test]
    fn test_config_invalid_too_many_ops() {
        let result = HarnessConfig::builder()
            .workers(1)
            .ops_per_worker(MAX_OPS_PER_WORKER + 1)
            .build();

        assert!(matches!(result, Err(HarnessError::InvalidOpsPerWorker(_))));
    }

    #[test]
    fn test_default_workers_is_stable() {
        let first = default_workers();
        assert!(first >= 1);
        assert_eq!(first, default_workers());
    }

    #[test]
    fn test_dispatch_default_and_display() {
        assert_eq!(Dispatch::default(), Dispatch::Concurrent);
        assert_eq!(Dispatch::Concurrent.to_string(), "concurrent");
        assert_eq!(Dispatch::Inline.to_string(), "inline");
    }
}
