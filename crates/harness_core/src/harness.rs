//! Parallel trial harness.
//!
//! A trial launches `workers` tasks, each running the work unit
//! `ops_per_worker` times, and blocks on a [`CompletionBarrier`] until every
//! task has signalled. [`TrialHarness`] owns a dedicated rayon pool sized to
//! the worker count so that thread start-up happens once, outside the
//! measured trials.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use harness_core::{work_fn, HarnessConfig, TrialHarness};
//!
//! let config = HarnessConfig::builder()
//!     .workers(2)
//!     .ops_per_worker(50)
//!     .build()
//!     .unwrap();
//! let harness = TrialHarness::new(config).unwrap();
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let unit = {
//!     let counter = Arc::clone(&counter);
//!     Arc::new(work_fn(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     }))
//! };
//!
//! let reports = harness.run_trials(&unit, 3).unwrap();
//! assert_eq!(reports.len(), 3);
//! assert_eq!(counter.load(Ordering::Relaxed), 300);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::barrier::CompletionBarrier;
use crate::config::{Dispatch, HarnessConfig};
use crate::error::HarnessError;
use crate::unit::{run_worker, WorkUnit};

/// Outcome of one trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialReport {
    /// Workers launched.
    pub workers: usize,
    /// Operations per worker.
    pub ops_per_worker: usize,
    /// Completion signals the barrier recorded before releasing the caller.
    pub signals: usize,
    /// Wall-clock time from first launch to barrier release.
    pub elapsed: Duration,
}

impl TrialReport {
    /// Total work unit invocations in the trial.
    #[inline]
    pub fn total_ops(&self) -> usize {
        self.workers * self.ops_per_worker
    }

    /// Mean nanoseconds per work unit invocation, or 0.0 for an empty trial.
    pub fn nanos_per_op(&self) -> f64 {
        let ops = self.total_ops();
        if ops == 0 {
            0.0
        } else {
            self.elapsed.as_nanos() as f64 / ops as f64
        }
    }
}

/// Runs trials of a fixed shape against caller-supplied work units.
///
/// A worker that never finishes stalls its trial forever; there is no
/// cancellation. A panic inside a concurrent worker aborts the process.
pub struct TrialHarness {
    config: HarnessConfig,
    /// `None` for [`Dispatch::Inline`].
    pool: Option<ThreadPool>,
}

impl TrialHarness {
    /// Creates a harness, starting its worker pool for concurrent dispatch.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the configuration is invalid or the pool
    /// cannot be started.
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;

        let pool = match config.dispatch() {
            Dispatch::Concurrent => Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.workers())
                    .thread_name(|idx| format!("trial-worker-{idx}"))
                    .build()
                    .map_err(|e| HarnessError::ThreadPool(e.to_string()))?,
            ),
            Dispatch::Inline => None,
        };

        info!(
            workers = config.workers(),
            ops_per_worker = config.ops_per_worker(),
            dispatch = %config.dispatch(),
            "Trial harness ready"
        );

        Ok(Self { config, pool })
    }

    /// Returns the harness configuration.
    #[inline]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs a single trial and blocks until every worker has signalled.
    pub fn run_trial<U: WorkUnit>(&self, unit: &Arc<U>) -> TrialReport {
        let workers = self.config.workers();
        let ops = self.config.ops_per_worker();
        let barrier = Arc::new(CompletionBarrier::new(workers));

        let start = Instant::now();
        match &self.pool {
            Some(pool) => {
                for _ in 0..workers {
                    let unit = Arc::clone(unit);
                    let barrier = Arc::clone(&barrier);
                    pool.spawn(move || {
                        run_worker(&*unit, ops);
                        barrier.signal();
                    });
                }
            }
            None => {
                for _ in 0..workers {
                    run_worker(&**unit, ops);
                    barrier.signal();
                }
            }
        }
        barrier.wait();
        let elapsed = start.elapsed();

        debug!(
            workers,
            ops_per_worker = ops,
            elapsed_ns = elapsed.as_nanos() as u64,
            "Trial complete"
        );

        TrialReport {
            workers,
            ops_per_worker: ops,
            signals: barrier.signals(),
            elapsed,
        }
    }

    /// Runs `trials` consecutive trials with the same work unit.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::InvalidTrialCount` if `trials` is 0.
    pub fn run_trials<U: WorkUnit>(
        &self,
        unit: &Arc<U>,
        trials: usize,
    ) -> Result<Vec<TrialReport>, HarnessError> {
        if trials == 0 {
            return Err(HarnessError::InvalidTrialCount(trials));
        }
        Ok((0..trials).map(|_| self.run_trial(unit)).collect())
    }
}

impl std::fmt::Debug for TrialHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialHarness")
            .field("config", &self.config)
            .field("pool_threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

/// Runs one concurrent trial of `workers` tasks, each invoking `unit`
/// `ops_per_worker` times.
///
/// Builds a throwaway harness; use [`TrialHarness`] directly to amortise
/// pool start-up across many trials.
///
/// # Errors
///
/// Returns `HarnessError` if `workers` is 0 or the pool cannot be started.
pub fn run_trial<U: WorkUnit>(
    workers: usize,
    ops_per_worker: usize,
    unit: U,
) -> Result<TrialReport, HarnessError> {
    let config = HarnessConfig::builder()
        .workers(workers)
        .ops_per_worker(ops_per_worker)
        .build()?;
    let harness = TrialHarness::new(config)?;
    Ok(harness.run_trial(&Arc::new(unit)))
}
