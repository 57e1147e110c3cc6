//! Counting completion barrier.
//!
//! [`CompletionBarrier`] releases its waiter once a fixed number of signals
//! have arrived. Workers call [`CompletionBarrier::signal`] exactly once when
//! their loop finishes; the trial's caller blocks in
//! [`CompletionBarrier::wait`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use harness_core::CompletionBarrier;
//!
//! let barrier = Arc::new(CompletionBarrier::new(3));
//!
//! for _ in 0..3 {
//!     let barrier = Arc::clone(&barrier);
//!     thread::spawn(move || barrier.signal());
//! }
//!
//! barrier.wait();
//! assert_eq!(barrier.remaining(), 0);
//! assert_eq!(barrier.signals(), 3);
//! ```

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A latch that opens after `expected` signals.
///
/// There is no timeout: if a signal never arrives, [`wait`](Self::wait)
/// never returns.
#[derive(Debug)]
pub struct CompletionBarrier {
    /// Signals required to open the barrier.
    expected: usize,
    /// Signals still outstanding.
    remaining: Mutex<usize>,
    /// Notified when `remaining` reaches zero.
    opened: Condvar,
}

impl CompletionBarrier {
    /// Creates a barrier that opens after `expected` signals.
    ///
    /// A barrier created with `expected == 0` is already open.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            remaining: Mutex::new(expected),
            opened: Condvar::new(),
        }
    }

    /// Records one completion.
    ///
    /// Signals beyond `expected` are ignored; the count never goes below zero.
    pub fn signal(&self) {
        let mut remaining = self.lock();
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.opened.notify_all();
        }
    }

    /// Blocks until every expected signal has arrived.
    pub fn wait(&self) {
        let mut remaining = self.lock();
        while *remaining > 0 {
            remaining = self
                .opened
                .wait(remaining)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Returns the number of signals still outstanding.
    pub fn remaining(&self) -> usize {
        *self.lock()
    }

    /// Returns the number of signals recorded so far.
    pub fn signals(&self) -> usize {
        self.expected - self.remaining()
    }

    /// Returns the number of signals the barrier was created for.
    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Returns true once all expected signals have arrived.
    pub fn is_open(&self) -> bool {
        self.remaining() == 0
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The guarded value is a plain counter; a panic elsewhere cannot
        // leave it half-updated.
        self.remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
