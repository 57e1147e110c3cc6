//! Run settings assembled from command-line arguments.

use harness_core::HarnessConfig;
use harness_rng::{Strategy, DEFAULT_GLOBAL_SEED};

use crate::{CliError, Result};

/// Default number of measured trials per strategy.
pub const DEFAULT_TRIALS: usize = 100;

/// Everything a `run` invocation needs.
#[derive(Clone, Debug)]
pub struct RunSettings {
    /// Strategies to run, in order.
    pub strategies: Vec<Strategy>,
    /// Trials per strategy.
    pub trials: usize,
    /// Seed of the shared global generator.
    pub seed: u64,
    /// Workers and ops per worker.
    pub harness: HarnessConfig,
}

impl RunSettings {
    /// Builds settings, filling unset values from the harness defaults.
    ///
    /// An empty `strategies` list selects every strategy.
    pub fn from_args(
        strategies: &[String],
        trials: usize,
        workers: Option<usize>,
        ops: Option<usize>,
        seed: Option<u64>,
    ) -> Result<Self> {
        if trials == 0 {
            return Err(CliError::InvalidArgument(
                "trials must be at least 1".to_string(),
            ));
        }

        let strategies = if strategies.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            strategies
                .iter()
                .map(|name| name.parse::<Strategy>())
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        let mut builder = HarnessConfig::builder();
        if let Some(workers) = workers {
            builder = builder.workers(workers);
        }
        if let Some(ops) = ops {
            builder = builder.ops_per_worker(ops);
        }

        Ok(Self {
            strategies,
            trials,
            seed: seed.unwrap_or(DEFAULT_GLOBAL_SEED),
            harness: builder.build()?,
        })
    }
}
