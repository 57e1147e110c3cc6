//! Work units for each generator-sharing strategy.
//!
//! Every unit performs one draw (or one secure read) per step and discards
//! the result through [`black_box`] so the work is not optimised away.

use std::hint::black_box;
use std::sync::Arc;

use harness_core::WorkUnit;
use tracing::error;

use crate::generator::BenchRng;
use crate::pool::{PooledRng, RngPool};
use crate::secure::{SecureSource, SECURE_READ_LEN};
use crate::shared::SharedRng;

/// Every worker draws from one shared generator.
#[derive(Clone, Debug)]
pub struct GlobalDraw {
    rng: SharedRng,
}

impl GlobalDraw {
    /// Creates a unit drawing from `rng`.
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

impl WorkUnit for GlobalDraw {
    type Session = ();

    #[inline]
    fn open(&self) {}

    #[inline]
    fn step(&self, _session: &mut ()) {
        black_box(self.rng.draw());
    }
}

/// Each worker seeds a fresh generator from the shared one at trial start.
#[derive(Clone, Debug)]
pub struct FreshDraw {
    seeds: SharedRng,
}

impl FreshDraw {
    /// Creates a unit whose per-worker generators are seeded from `seeds`.
    pub fn new(seeds: SharedRng) -> Self {
        Self { seeds }
    }
}

impl WorkUnit for FreshDraw {
    type Session = BenchRng;

    #[inline]
    fn open(&self) -> BenchRng {
        BenchRng::from_seed(self.seeds.next_seed())
    }

    #[inline]
    fn step(&self, rng: &mut BenchRng) {
        black_box(rng.draw());
    }
}

/// Each worker checks a generator out of a shared pool for its segment.
#[derive(Clone, Debug)]
pub struct PooledDraw {
    pool: Arc<RngPool>,
}

impl PooledDraw {
    /// Creates a unit drawing from generators checked out of `pool`.
    pub fn new(pool: Arc<RngPool>) -> Self {
        Self { pool }
    }
}

impl WorkUnit for PooledDraw {
    type Session = PooledRng;

    #[inline]
    fn open(&self) -> PooledRng {
        self.pool.checkout()
    }

    #[inline]
    fn step(&self, rng: &mut PooledRng) {
        black_box(rng.draw());
    }
}

/// Each step reads [`SECURE_READ_LEN`] bytes from the OS CSPRNG into a
/// worker-owned buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRead {
    source: SecureSource,
}

impl SecureRead {
    /// Creates a unit reading from `source`.
    pub fn new(source: SecureSource) -> Self {
        Self { source }
    }
}

impl WorkUnit for SecureRead {
    type Session = [u8; SECURE_READ_LEN];

    #[inline]
    fn open(&self) -> [u8; SECURE_READ_LEN] {
        [0u8; SECURE_READ_LEN]
    }

    #[inline]
    fn step(&self, buf: &mut [u8; SECURE_READ_LEN]) {
        if let Err(err) = self.source.fill(buf) {
            error!(%err, "OS randomness unavailable");
            panic!("OS randomness unavailable: {err}");
        }
        black_box(&buf[..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_core::run_trial;

    #[test]
    fn test_global_draw_advances_shared_generator() {
        let shared = SharedRng::new(10);
        let unit = GlobalDraw::new(shared.clone());

        run_trial(2, 25, unit).unwrap();

        let mut reference = BenchRng::from_seed(10);
        for _ in 0..50 {
            reference.draw();
        }
        assert_eq!(shared.draw(), reference.draw());
    }

    #[test]
    fn test_fresh_draw_takes_one_seed_per_worker() {
        let shared = SharedRng::new(20);
        let unit = FreshDraw::new(shared.clone());

        run_trial(3, 100, unit).unwrap();

        let mut reference = BenchRng::from_seed(20);
        for _ in 0..3 {
            reference.next_seed();
        }
        assert_eq!(shared.next_seed(), reference.next_seed());
    }

    #[test]
    fn test_pooled_draw_returns_every_generator() {
        let pool = Arc::new(RngPool::new(SharedRng::new(30)));
        let unit = PooledDraw::new(Arc::clone(&pool));

        run_trial(4, 100, unit).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.checkouts, 4);
        assert_eq!(stats.returns, 4);
        assert_eq!(stats.generators_in_pool, stats.generators_created);
    }

    #[test]
    fn test_secure_read_fills_session_buffer() {
        let unit = SecureRead::default();
        let mut buf = unit.open();

        unit.step(&mut buf);
        let first = buf;
        unit.step(&mut buf);

        assert_ne!(first, buf);
    }
}
