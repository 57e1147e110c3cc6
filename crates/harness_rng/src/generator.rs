//! Seeded pseudo-random generator used by every non-secure strategy.
//!
//! [`BenchRng`] wraps `rand::rngs::StdRng` and exposes the single operation
//! the benchmarks measure: a uniform integer draw in `[0, DRAW_BOUND)`.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Exclusive upper bound of every benchmark draw.
pub const DRAW_BOUND: u64 = 10_000_000;

/// Benchmark pseudo-random generator.
///
/// # Examples
///
/// ```rust
/// use harness_rng::{BenchRng, DRAW_BOUND};
///
/// let mut rng = BenchRng::from_seed(42);
/// assert_eq!(rng.seed(), 42);
///
/// let value = rng.draw();
/// assert!(value < DRAW_BOUND);
/// ```
pub struct BenchRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl BenchRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// The same seed always produces the same sequence of draws.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a uniform integer in `[0, DRAW_BOUND)`.
    #[inline]
    pub fn draw(&mut self) -> u64 {
        self.inner.gen_range(0..DRAW_BOUND)
    }

    /// Produces a seed for a new, independent generator.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl std::fmt::Debug for BenchRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchRng").field("seed", &self.seed).finish()
    }
}
