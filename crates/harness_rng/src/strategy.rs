//! Named benchmark strategies.
//!
//! A [`Strategy`] pairs a generator-sharing policy with a dispatch mode.
//! [`StrategyRunner`] builds the strategy's work unit and a harness once,
//! then runs as many trials as the caller wants.
//!
//! | Strategy          | Name                 | Dispatch   | Generator access                  |
//! |-------------------|----------------------|------------|-----------------------------------|
//! | `GlobalSingle`    | `global_rand_single` | inline     | shared generator, no concurrency  |
//! | `GlobalShared`    | `global_rand`        | concurrent | shared generator, all workers     |
//! | `FreshPerWorker`  | `rand_pre_init`      | concurrent | new generator per worker          |
//! | `Pooled`          | `rand_sync_pool`     | concurrent | generator checked out of a pool   |
//! | `CryptoSecure`    | `crypto_rand`        | concurrent | OS CSPRNG, 8 bytes per op         |

use std::str::FromStr;
use std::sync::Arc;

use harness_core::{Dispatch, HarnessConfig, HarnessError, TrialHarness, TrialReport};
use tracing::info;

use crate::error::StrategyError;
use crate::pool::RngPool;
use crate::secure::SecureSource;
use crate::shared::SharedRng;
use crate::workloads::{FreshDraw, GlobalDraw, PooledDraw, SecureRead};

/// A random-number-generation strategy under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Shared generator, workers run inline on the caller thread.
    GlobalSingle,
    /// Shared generator, workers run concurrently.
    GlobalShared,
    /// Per-worker generator seeded fresh each trial.
    FreshPerWorker,
    /// Per-worker generator checked out of a shared pool.
    Pooled,
    /// Operating-system CSPRNG.
    CryptoSecure,
}

impl Strategy {
    /// Every strategy, in benchmark order.
    pub const ALL: [Strategy; 5] = [
        Strategy::GlobalSingle,
        Strategy::GlobalShared,
        Strategy::FreshPerWorker,
        Strategy::Pooled,
        Strategy::CryptoSecure,
    ];

    /// Returns the benchmark name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::GlobalSingle => "global_rand_single",
            Strategy::GlobalShared => "global_rand",
            Strategy::FreshPerWorker => "rand_pre_init",
            Strategy::Pooled => "rand_sync_pool",
            Strategy::CryptoSecure => "crypto_rand",
        }
    }

    /// Returns every benchmark name, in benchmark order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Strategy::name).collect()
    }

    /// Returns a one-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::GlobalSingle => "shared global generator, workers inline (baseline)",
            Strategy::GlobalShared => "shared global generator, concurrent workers",
            Strategy::FreshPerWorker => "fresh generator per worker, seeded from global",
            Strategy::Pooled => "generator checked out of a shared pool per worker",
            Strategy::CryptoSecure => "OS CSPRNG, 8 bytes per operation",
        }
    }

    /// Returns how the strategy's workers are dispatched.
    pub fn dispatch(&self) -> Dispatch {
        match self {
            Strategy::GlobalSingle => Dispatch::Inline,
            _ => Dispatch::Concurrent,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| StrategyError::UnknownStrategy(s.to_string()))
    }
}

/// Shared resources every strategy draws on.
///
/// Cloning shares the same global generator and pool.
#[derive(Clone, Debug)]
pub struct RngContext {
    /// The process-wide generator, also the seed source for fresh and pooled generators.
    pub global: SharedRng,
    /// Pool used by [`Strategy::Pooled`].
    pub pool: Arc<RngPool>,
    /// Source used by [`Strategy::CryptoSecure`].
    pub secure: SecureSource,
}

impl RngContext {
    /// Creates a context whose global generator is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let global = SharedRng::new(seed);
        let pool = Arc::new(RngPool::new(global.clone()));
        Self {
            global,
            pool,
            secure: SecureSource::new(),
        }
    }
}

impl Default for RngContext {
    fn default() -> Self {
        let global = SharedRng::default();
        let pool = Arc::new(RngPool::new(global.clone()));
        Self {
            global,
            pool,
            secure: SecureSource::new(),
        }
    }
}

/// The concrete work unit behind a strategy.
enum StrategyUnit {
    Global(Arc<GlobalDraw>),
    Fresh(Arc<FreshDraw>),
    Pooled(Arc<PooledDraw>),
    Secure(Arc<SecureRead>),
}

impl StrategyUnit {
    fn new(strategy: Strategy, ctx: &RngContext) -> Self {
        match strategy {
            Strategy::GlobalSingle | Strategy::GlobalShared => {
                Self::Global(Arc::new(GlobalDraw::new(ctx.global.clone())))
            }
            Strategy::FreshPerWorker => Self::Fresh(Arc::new(FreshDraw::new(ctx.global.clone()))),
            Strategy::Pooled => Self::Pooled(Arc::new(PooledDraw::new(Arc::clone(&ctx.pool)))),
            Strategy::CryptoSecure => Self::Secure(Arc::new(SecureRead::new(ctx.secure))),
        }
    }

    fn run_trial(&self, harness: &TrialHarness) -> TrialReport {
        match self {
            Self::Global(unit) => harness.run_trial(unit),
            Self::Fresh(unit) => harness.run_trial(unit),
            Self::Pooled(unit) => harness.run_trial(unit),
            Self::Secure(unit) => harness.run_trial(unit),
        }
    }

    fn run_trials(
        &self,
        harness: &TrialHarness,
        trials: usize,
    ) -> Result<Vec<TrialReport>, HarnessError> {
        match self {
            Self::Global(unit) => harness.run_trials(unit, trials),
            Self::Fresh(unit) => harness.run_trials(unit, trials),
            Self::Pooled(unit) => harness.run_trials(unit, trials),
            Self::Secure(unit) => harness.run_trials(unit, trials),
        }
    }
}

/// A strategy bound to its work unit and a harness.
///
/// # Example
///
/// ```rust
/// use harness_core::HarnessConfig;
/// use harness_rng::{RngContext, Strategy, StrategyRunner};
///
/// let ctx = RngContext::new(7);
/// let base = HarnessConfig::builder().workers(2).ops_per_worker(10).build().unwrap();
/// let runner = StrategyRunner::new(Strategy::Pooled, &ctx, &base).unwrap();
///
/// let report = runner.run_trial();
/// assert_eq!(report.signals, 2);
/// assert_eq!(report.total_ops(), 20);
/// ```
pub struct StrategyRunner {
    strategy: Strategy,
    harness: TrialHarness,
    unit: StrategyUnit,
}

impl StrategyRunner {
    /// Binds `strategy` to `ctx`, taking worker and op counts from `base`.
    ///
    /// The dispatch mode always comes from the strategy.
    ///
    /// # Errors
    ///
    /// Returns `StrategyError::Harness` if the harness cannot be built.
    pub fn new(
        strategy: Strategy,
        ctx: &RngContext,
        base: &HarnessConfig,
    ) -> Result<Self, StrategyError> {
        let config = HarnessConfig::builder()
            .workers(base.workers())
            .ops_per_worker(base.ops_per_worker())
            .dispatch(strategy.dispatch())
            .build()?;
        let harness = TrialHarness::new(config)?;

        info!(strategy = %strategy, "Strategy runner ready");

        Ok(Self {
            strategy,
            harness,
            unit: StrategyUnit::new(strategy, ctx),
        })
    }

    /// Returns the strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the harness configuration in effect.
    #[inline]
    pub fn config(&self) -> &HarnessConfig {
        self.harness.config()
    }

    /// Runs one trial.
    #[inline]
    pub fn run_trial(&self) -> TrialReport {
        self.unit.run_trial(&self.harness)
    }

    /// Runs `trials` consecutive trials.
    ///
    /// # Errors
    ///
    /// Returns `StrategyError::Harness` if `trials` is 0.
    pub fn run_trials(&self, trials: usize) -> Result<Vec<TrialReport>, StrategyError> {
        Ok(self.unit.run_trials(&self.harness, trials)?)
    }
}

impl std::fmt::Debug for StrategyRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRunner")
            .field("strategy", &self.strategy)
            .field("harness", &self.harness)
            .finish()
    }
}

/// Runs `trials` trials of `strategy` with a freshly built runner.
///
/// # Errors
///
/// Returns `StrategyError::Harness` for an invalid configuration or a zero
/// trial count.
pub fn run_strategy(
    strategy: Strategy,
    ctx: &RngContext,
    base: &HarnessConfig,
    trials: usize,
) -> Result<Vec<TrialReport>, StrategyError> {
    StrategyRunner::new(strategy, ctx, base)?.run_trials(trials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> HarnessConfig {
        HarnessConfig::builder()
            .workers(3)
            .ops_per_worker(20)
            .build()
            .unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.name());
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_dashes() {
        assert_eq!(
            "Rand-Sync-Pool".parse::<Strategy>().unwrap(),
            Strategy::Pooled
        );
        assert_eq!(" crypto_rand ".parse::<Strategy>().unwrap(), Strategy::CryptoSecure);
    }

    #[test]
    fn test_parse_unknown() {
        let result = "xorshift".parse::<Strategy>();
        assert_eq!(
            result,
            Err(StrategyError::UnknownStrategy("xorshift".to_string()))
        );
    }

    #[test]
    fn test_only_baseline_runs_inline() {
        for strategy in Strategy::ALL {
            let expected = if strategy == Strategy::GlobalSingle {
                Dispatch::Inline
            } else {
                Dispatch::Concurrent
            };
            assert_eq!(strategy.dispatch(), expected, "{strategy}");
        }
    }

    #[test]
    fn test_runner_takes_dispatch_from_strategy() {
        let ctx = RngContext::new(1);
        let runner = StrategyRunner::new(Strategy::GlobalSingle, &ctx, &small_config()).unwrap();

        assert_eq!(runner.strategy(), Strategy::GlobalSingle);
        assert_eq!(runner.config().dispatch(), Dispatch::Inline);
        assert_eq!(runner.config().workers(), 3);
        assert_eq!(runner.config().ops_per_worker(), 20);
    }

    #[test]
    fn test_run_strategy_every_strategy() {
        let ctx = RngContext::new(2);

        for strategy in Strategy::ALL {
            let reports = run_strategy(strategy, &ctx, &small_config(), 2).unwrap();
            assert_eq!(reports.len(), 2);
            for report in reports {
                assert_eq!(report.signals, 3, "{strategy}");
                assert_eq!(report.total_ops(), 60, "{strategy}");
            }
        }
    }

    #[test]
    fn test_run_strategy_rejects_zero_trials() {
        let ctx = RngContext::default();
        let result = run_strategy(Strategy::GlobalShared, &ctx, &small_config(), 0);

        assert_eq!(
            result.unwrap_err(),
            StrategyError::Harness(HarnessError::InvalidTrialCount(0))
        );
    }

    #[test]
    fn test_context_clone_shares_resources() {
        let ctx = RngContext::new(4);
        let copy = ctx.clone();

        assert!(ctx.global.same_generator(&copy.global));
        assert!(Arc::ptr_eq(&ctx.pool, &copy.pool));
    }
}
