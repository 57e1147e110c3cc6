//! Shared pool of reusable generators.
//!
//! [`RngPool`] keeps a free list of idle [`BenchRng`] instances. A worker
//! checks one out for the length of its trial segment and the returned
//! [`PooledRng`] guard puts it back on drop, including during unwinding.
//! When the free list is empty a new generator is created, seeded from the
//! pool's [`SharedRng`].
//!
//! # Design Goals
//!
//! - **Exclusive ownership**: a checked-out generator belongs to one guard;
//!   drawing from it takes no lock
//! - **Locked free list only**: checkout and return serialise on one mutex
//! - **RAII semantics**: generators auto-return to the pool when dropped
//! - **Statistics tracking**: monitor reuse
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use harness_rng::{RngPool, SharedRng};
//!
//! let pool = Arc::new(RngPool::new(SharedRng::new(1)));
//!
//! let mut rng = pool.checkout();
//! let _ = rng.draw();
//! drop(rng);
//!
//! // Next checkout reuses the idle generator
//! let _rng = pool.checkout();
//! assert_eq!(pool.stats().reuses, 1);
//! assert_eq!(pool.stats().generators_created, 1);
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::generator::BenchRng;
use crate::shared::SharedRng;

/// Statistics about pool usage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Idle generators currently on the free list.
    pub generators_in_pool: usize,
    /// Total checkout requests.
    pub checkouts: usize,
    /// Checkouts served from the free list.
    pub reuses: usize,
    /// Generators created on a checkout miss.
    pub generators_created: usize,
    /// Generators handed back to the free list.
    pub returns: usize,
}

impl PoolStats {
    /// Returns the reuse rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.checkouts == 0 {
            0.0
        } else {
            self.reuses as f64 / self.checkouts as f64
        }
    }
}

/// An idle generator with its pool-assigned identity.
struct Slot {
    id: usize,
    rng: BenchRng,
}

/// Thread-safe free list of reusable generators.
///
/// The pool is unbounded: it holds at most as many generators as were ever
/// checked out at the same time. Which idle instance a checkout receives is
/// unspecified.
pub struct RngPool {
    /// Idle generators.
    free: Mutex<Vec<Slot>>,
    /// Seeds generators created on a miss.
    seeds: SharedRng,
    checkouts: AtomicUsize,
    reuses: AtomicUsize,
    created: AtomicUsize,
    returns: AtomicUsize,
}

impl RngPool {
    /// Creates an empty pool whose new generators are seeded from `seeds`.
    pub fn new(seeds: SharedRng) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            seeds,
            checkouts: AtomicUsize::new(0),
            reuses: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
        }
    }

    /// Checks out a generator, creating one if none is idle.
    ///
    /// The guard returns the generator to this pool when dropped.
    pub fn checkout(self: &Arc<Self>) -> PooledRng {
        self.checkouts.fetch_add(1, Ordering::Relaxed);

        let idle = self.lock().pop();
        let slot = match idle {
            Some(slot) => {
                self.reuses.fetch_add(1, Ordering::Relaxed);
                slot
            }
            None => {
                let id = self.created.fetch_add(1, Ordering::Relaxed);
                let rng = BenchRng::from_seed(self.seeds.next_seed());
                trace!(id, seed = rng.seed(), "Pool miss, created generator");
                Slot { id, rng }
            }
        };

        PooledRng {
            slot: Some(slot),
            pool: Arc::clone(self),
        }
    }

    /// Returns the number of idle generators.
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            generators_in_pool: self.idle(),
            checkouts: self.checkouts.load(Ordering::Relaxed),
            reuses: self.reuses.load(Ordering::Relaxed),
            generators_created: self.created.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
        }
    }

    fn give_back(&self, slot: Slot) {
        self.lock().push(slot);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Slot>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RngPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RngPool")
            .field("stats", &self.stats())
            .finish()
    }
}

/// A generator checked out of an [`RngPool`]; returns to the pool on drop.
///
/// Derefs to [`BenchRng`].
pub struct PooledRng {
    /// Present from checkout until drop.
    slot: Option<Slot>,
    pool: Arc<RngPool>,
}

impl PooledRng {
    /// Returns the pool-assigned identity of the checked-out generator.
    ///
    /// Identities are dense, starting at 0 in creation order.
    pub fn id(&self) -> usize {
        self.slot().id
    }

    fn slot(&self) -> &Slot {
        self.slot
            .as_ref()
            .expect("pooled generator is held until drop")
    }
}

impl Deref for PooledRng {
    type Target = BenchRng;

    fn deref(&self) -> &BenchRng {
        &self.slot().rng
    }
}

impl DerefMut for PooledRng {
    fn deref_mut(&mut self) -> &mut BenchRng {
        &mut self
            .slot
            .as_mut()
            .expect("pooled generator is held until drop")
            .rng
    }
}

impl Drop for PooledRng {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.pool.give_back(slot);
        }
    }
}

impl std::fmt::Debug for PooledRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledRng")
            .field("id", &self.slot.as_ref().map(|s| s.id))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    fn pool() -> Arc<RngPool> {
        Arc::new(RngPool::new(SharedRng::new(42)))
    }

    #[test]
    fn test_pool_miss_creates_generator() {
        let pool = pool();

        let rng = pool.checkout();
        assert_eq!(rng.id(), 0);

        let stats = pool.stats();
        assert_eq!(stats.checkouts, 1);
        assert_eq!(stats.generators_created, 1);
        assert_eq!(stats.reuses, 0);
        assert_eq!(stats.generators_in_pool, 0);
    }

    #[test]
    fn test_pool_reuses_returned_generator() {
        let pool = pool();

        let first = pool.checkout();
        let id = first.id();
        let seed = first.seed();
        drop(first);
        assert_eq!(pool.idle(), 1);

        let second = pool.checkout();
        assert_eq!(second.id(), id);
        assert_eq!(second.seed(), seed);
        assert_eq!(pool.stats().reuses, 1);
    }

    #[test]
    fn test_pool_concurrent_holds_are_distinct() {
        let pool = pool();

        let a = pool.checkout();
        let b = pool.checkout();
        let c = pool.checkout();
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
        assert_ne!(a.id(), c.id());

        drop((a, b, c));
        let stats = pool.stats();
        assert_eq!(stats.generators_in_pool, 3);
        assert_eq!(stats.returns, 3);
    }

    #[test]
    fn test_pool_seeds_from_shared_generator() {
        let seeds = SharedRng::new(8);
        let mut reference = BenchRng::from_seed(8);
        let pool = Arc::new(RngPool::new(seeds));

        let rng = pool.checkout();
        assert_eq!(rng.seed(), reference.next_seed());
    }

    #[test]
    fn test_pool_returns_generator_on_panic() {
        let pool = pool();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut rng = pool.checkout();
            let _ = rng.draw();
            panic!("work unit failed");
        }));

        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.stats().returns, 1);
    }

    #[test]
    fn test_pool_hit_rate() {
        let pool = pool();
        assert_eq!(pool.stats().hit_rate(), 0.0);

        drop(pool.checkout());
        drop(pool.checkout());

        let stats = pool.stats();
        assert_eq!(stats.checkouts, 2);
        assert!((stats.hit_rate() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_pool_shared_across_threads() {
        let pool = pool();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let mut rng = pool.checkout();
                        let _ = rng.draw();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = pool.stats();
        assert_eq!(stats.checkouts, 800);
        assert_eq!(stats.returns, 800);
        assert!(stats.generators_created <= 8);
        assert_eq!(stats.generators_in_pool, stats.generators_created);
    }
}
