//! Run command implementation
//!
//! Runs each selected strategy for a fixed number of trials and reports the
//! elapsed time per trial, one line per strategy:
//!
//! ```text
//! rand_sync_pool-8        100      50725 ns/trial      6.34 ns/op
//! ```

use std::time::Duration;

use harness_core::TrialReport;
use harness_rng::{RngContext, StrategyRunner};
use tracing::info;

use crate::config::RunSettings;
use crate::Result;

/// One strategy's outcome.
#[derive(Clone, Debug)]
pub struct StrategySummary {
    /// Benchmark name.
    pub name: &'static str,
    /// Workers per trial.
    pub workers: usize,
    /// Trials run.
    pub trials: usize,
    /// Mean elapsed time per trial.
    pub per_trial: Duration,
    /// Mean nanoseconds per work unit invocation.
    pub nanos_per_op: f64,
}

impl StrategySummary {
    fn from_reports(name: &'static str, reports: &[TrialReport]) -> Self {
        let trials = reports.len();
        let total: Duration = reports.iter().map(|r| r.elapsed).sum();
        let ops: usize = reports.iter().map(TrialReport::total_ops).sum();
        let workers = reports.first().map_or(0, |r| r.workers);

        let per_trial = mean_per_trial(total, trials);
        let nanos_per_op = if ops == 0 {
            0.0
        } else {
            total.as_nanos() as f64 / ops as f64
        };

        Self {
            name,
            workers,
            trials,
            per_trial,
            nanos_per_op,
        }
    }

    /// Formats the summary as a single report line.
    pub fn line(&self) -> String {
        format!(
            "{:<24} {:>8} {:>12} ns/trial {:>10.2} ns/op",
            format!("{}-{}", self.name, self.workers),
            self.trials,
            self.per_trial.as_nanos(),
            self.nanos_per_op
        )
    }
}

/// Divides in nanoseconds so trial counts beyond `u32::MAX` do not truncate.
fn mean_per_trial(total: Duration, trials: usize) -> Duration {
    if trials == 0 {
        return Duration::ZERO;
    }
    let nanos = total.as_nanos() / trials as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Run the run command
pub fn run(settings: &RunSettings) -> Result<Vec<StrategySummary>> {
    info!("Starting strategy runs...");
    info!("  Strategies: {}", settings.strategies.len());
    info!("  Trials: {}", settings.trials);
    info!("  Workers: {}", settings.harness.workers());
    info!("  Ops per worker: {}", settings.harness.ops_per_worker());
    info!("  Global seed: {}", settings.seed);

    let ctx = RngContext::new(settings.seed);
    let mut summaries = Vec::with_capacity(settings.strategies.len());

    for &strategy in &settings.strategies {
        let runner = StrategyRunner::new(strategy, &ctx, &settings.harness)?;
        let reports = runner.run_trials(settings.trials)?;
        let summary = StrategySummary::from_reports(strategy.name(), &reports);

        info!(
            strategy = %strategy,
            dispatch = %strategy.dispatch(),
            per_trial_ns = summary.per_trial.as_nanos() as u64,
            "Strategy complete"
        );
        println!("{}", summary.line());
        summaries.push(summary);
    }

    let pool = ctx.pool.stats();
    info!(
        checkouts = pool.checkouts,
        created = pool.generators_created,
        hit_rate = pool.hit_rate(),
        "Pool usage"
    );

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_rng::Strategy;

    #[test]
    fn test_run_all_strategies_small() {
        let settings = RunSettings::from_args(&[], 2, Some(2), Some(10), Some(1)).unwrap();

        let summaries = run(&settings).unwrap();

        assert_eq!(summaries.len(), Strategy::ALL.len());
        for (summary, strategy) in summaries.iter().zip(Strategy::ALL) {
            assert_eq!(summary.name, strategy.name());
            assert_eq!(summary.trials, 2);
            assert_eq!(summary.workers, 2);
        }
    }

    #[test]
    fn test_summary_from_reports() {
        let report = TrialReport {
            workers: 4,
            ops_per_worker: 10,
            signals: 4,
            elapsed: Duration::from_nanos(400),
        };

        let summary = StrategySummary::from_reports("global_rand", &[report, report]);

        assert_eq!(summary.trials, 2);
        assert_eq!(summary.per_trial, Duration::from_nanos(400));
        assert!((summary.nanos_per_op - 10.0).abs() < 1e-9);
        assert!(summary.line().starts_with("global_rand-4"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_mean_per_trial_beyond_u32_trials() {
        let trials = 1usize << 32;
        let total = Duration::from_nanos(3 << 32);

        assert_eq!(mean_per_trial(total, trials), Duration::from_nanos(3));
        assert_eq!(mean_per_trial(total, trials + 1), Duration::from_nanos(2));
    }

    #[test]
    fn test_mean_per_trial_rounds_down() {
        assert_eq!(
            mean_per_trial(Duration::from_nanos(1_001), 2),
            Duration::from_nanos(500)
        );
        assert_eq!(mean_per_trial(Duration::from_secs(1), 0), Duration::ZERO);
    }

    #[test]
    fn test_summary_from_no_reports() {
        let summary = StrategySummary::from_reports("crypto_rand", &[]);
        assert_eq!(summary.per_trial, Duration::ZERO);
        assert_eq!(summary.nanos_per_op, 0.0);
    }
}
