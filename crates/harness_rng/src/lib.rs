//! # Harness RNG (Layer H: Strategies)
//!
//! Random-number-generation strategies measured with the
//! [`harness_core`] trial harness.
//!
//! ## Strategies
//!
//! - `global_rand_single`: one shared generator, workers run inline (baseline)
//! - `global_rand`: one shared generator, all workers draw concurrently
//! - `rand_pre_init`: each worker seeds a fresh generator per trial
//! - `rand_sync_pool`: each worker checks a generator out of a shared pool
//! - `crypto_rand`: each operation reads 8 bytes from the OS CSPRNG
//!
//! The shared generator is an explicit [`SharedRng`] handle carried in an
//! [`RngContext`], never a hidden global.
//!
//! ## Usage Example
//!
//! ```rust
//! use harness_core::HarnessConfig;
//! use harness_rng::{run_strategy, RngContext, Strategy};
//!
//! let ctx = RngContext::new(12345);
//! let base = HarnessConfig::builder().workers(4).ops_per_worker(100).build().unwrap();
//!
//! for strategy in Strategy::ALL {
//!     let reports = run_strategy(strategy, &ctx, &base, 3).unwrap();
//!     assert!(reports.iter().all(|r| r.signals == 4));
//! }
//! ```
//!
//! ## Benchmarks
//!
//! ```bash
//! cargo bench -p harness_rng
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod generator;
mod pool;
mod secure;
mod shared;
mod strategy;
pub mod workloads;

pub use error::StrategyError;
pub use generator::{BenchRng, DRAW_BOUND};
pub use pool::{PoolStats, PooledRng, RngPool};
pub use secure::{SecureSource, SECURE_READ_LEN};
pub use shared::{SharedRng, DEFAULT_GLOBAL_SEED};
pub use strategy::{run_strategy, RngContext, Strategy, StrategyRunner};
