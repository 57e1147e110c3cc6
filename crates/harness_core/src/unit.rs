//! Work units executed by trial workers.
//!
//! A [`WorkUnit`] is the opaque operation being measured. Each worker opens
//! one session at the start of its trial segment, steps it a fixed number of
//! times, then drops it. The session is owned by that worker alone, which is
//! where per-worker generators and pool checkouts live.

/// An operation invoked repeatedly by every worker of a trial.
///
/// Implementations are shared across workers, so `step` may run on several
/// threads at once. Anything touched through `&self` must tolerate that.
pub trait WorkUnit: Send + Sync + 'static {
    /// Per-worker state for one trial segment.
    type Session;

    /// Called once per worker before its first step.
    fn open(&self) -> Self::Session;

    /// One measured operation.
    fn step(&self, session: &mut Self::Session);
}

/// A stateless work unit wrapping a closure.
///
/// Built with [`work_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnUnit<F> {
    f: F,
}

/// Adapts a zero-argument closure into a [`WorkUnit`].
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use harness_core::{run_trial, work_fn};
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let unit = {
///     let counter = Arc::clone(&counter);
///     work_fn(move || {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })
/// };
///
/// run_trial(4, 100, unit).unwrap();
/// assert_eq!(counter.load(Ordering::Relaxed), 400);
/// ```
#[inline]
pub fn work_fn<F>(f: F) -> FnUnit<F>
where
    F: Fn() + Send + Sync + 'static,
{
    FnUnit { f }
}

impl<F> WorkUnit for FnUnit<F>
where
    F: Fn() + Send + Sync + 'static,
{
    type Session = ();

    #[inline]
    fn open(&self) {}

    #[inline]
    fn step(&self, _session: &mut ()) {
        (self.f)()
    }
}

/// Runs one worker's segment: open a session, step it `ops` times, drop it.
#[inline]
pub(crate) fn run_worker<U: WorkUnit>(unit: &U, ops: usize) {
    let mut session = unit.open();
    for _ in 0..ops {
        unit.step(&mut session);
    }
}
