//! # Harness Core (Layer H: The Kernel)
//!
//! Parallel trial harness for microbenchmarks under concurrent load.
//!
//! A trial launches a fixed number of workers, each invoking the same work
//! unit a fixed number of times, and blocks on a completion barrier until all
//! of them finish. The worker count defaults to the host's available
//! parallelism, queried once per process; the per-worker operation count
//! defaults to [`OPS_PER_WORKER`].
//!
//! This crate provides:
//! - [`TrialHarness`] and [`run_trial`]: launch N workers, wait for N completions
//! - [`CompletionBarrier`]: counting latch used to release the caller
//! - [`WorkUnit`] and [`work_fn`]: the measured operation and its per-worker session
//! - [`HarnessConfig`]: validated harness shape
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use harness_core::{run_trial, work_fn};
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let unit = {
//!     let counter = Arc::clone(&counter);
//!     work_fn(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     })
//! };
//!
//! let report = run_trial(4, 100, unit).unwrap();
//! assert_eq!(report.signals, 4);
//! assert_eq!(counter.load(Ordering::Relaxed), 400);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod barrier;
mod config;
mod error;
mod harness;
mod unit;

pub use barrier::CompletionBarrier;
pub use config::{
    default_workers, Dispatch, HarnessConfig, HarnessConfigBuilder, MAX_OPS_PER_WORKER,
    MAX_WORKERS, OPS_PER_WORKER,
};
pub use error::HarnessError;
pub use harness::{run_trial, TrialHarness, TrialReport};
pub use unit::{work_fn, FnUnit, WorkUnit};
