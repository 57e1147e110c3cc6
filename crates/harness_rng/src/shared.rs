//! Process-wide shared generator handle.
//!
//! [`SharedRng`] is one generator reachable from every worker. It is passed
//! around explicitly rather than living in a `static`, so contention on it is
//! something a benchmark opts into. Callers never lock it themselves; the
//! handle synchronises internally and that synchronisation is what the
//! shared-global strategy measures.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::generator::BenchRng;

/// Seed of the default global generator.
pub const DEFAULT_GLOBAL_SEED: u64 = 1;

/// Cloneable handle to a single internally-synchronised generator.
///
/// # Examples
///
/// ```rust
/// use harness_rng::{SharedRng, DRAW_BOUND};
///
/// let global = SharedRng::new(99);
/// let handle = global.clone();
///
/// assert!(handle.draw() < DRAW_BOUND);
/// assert!(global.same_generator(&handle));
/// ```
#[derive(Clone, Debug)]
pub struct SharedRng {
    inner: Arc<Mutex<BenchRng>>,
}

impl SharedRng {
    /// Creates a shared generator initialised with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::from_rng(BenchRng::from_seed(seed))
    }

    /// Wraps an existing generator.
    pub fn from_rng(rng: BenchRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Draws a uniform integer in `[0, DRAW_BOUND)`.
    #[inline]
    pub fn draw(&self) -> u64 {
        self.lock().draw()
    }

    /// Produces a seed for a new, independent generator.
    #[inline]
    pub fn next_seed(&self) -> u64 {
        self.lock().next_seed()
    }

    /// Returns the seed the shared generator was created with.
    pub fn seed(&self) -> u64 {
        self.lock().seed()
    }

    /// Returns true if both handles refer to the same generator.
    pub fn same_generator(&self, other: &SharedRng) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, BenchRng> {
        // A panicking worker aborts the run; the generator state stays usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::DRAW_BOUND;
    use std::thread;

    #[test]
    fn test_shared_matches_single_generator_sequence() {
        let shared = SharedRng::new(5);
        let mut local = BenchRng::from_seed(5);

        for _ in 0..50 {
            assert_eq!(shared.draw(), local.draw());
        }
    }

    #[test]
    fn test_clones_share_state() {
        let a = SharedRng::new(11);
        let b = a.clone();
        let mut reference = BenchRng::from_seed(11);

        assert_eq!(a.draw(), reference.draw());
        assert_eq!(b.draw(), reference.draw());
        assert!(a.same_generator(&b));
        assert!(!a.same_generator(&SharedRng::new(11)));
    }

    #[test]
    fn test_default_seed() {
        assert_eq!(SharedRng::default().seed(), DEFAULT_GLOBAL_SEED);
    }

    #[test]
    fn test_concurrent_draws() {
        let shared = SharedRng::new(3);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || (0..1000).all(|_| shared.draw() < DRAW_BOUND))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
