//! rngbench - Command Line Runner for RNG Strategy Benchmarks
//!
//! Runs the random-number-generation strategies from `harness_rng` through
//! the trial harness and prints the elapsed time per trial.
//!
//! # Commands
//!
//! - `rngbench list` - List strategies and their dispatch mode
//! - `rngbench run [--strategy NAME]... [--trials N]` - Run strategies
//!
//! For statistically rigorous numbers use `cargo bench -p harness_rng`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{RunSettings, DEFAULT_TRIALS};

/// Concurrent RNG strategy benchmark runner
#[derive(Parser)]
#[command(name = "rngbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (per-trial timings)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List strategies
    List,

    /// Run strategies and report time per trial
    Run {
        /// Strategy to run (repeatable); all strategies when omitted
        #[arg(short, long = "strategy", value_name = "NAME")]
        strategies: Vec<String>,

        /// Trials per strategy
        #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,

        /// Workers per trial (defaults to host parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Operations per worker per trial
        #[arg(short, long)]
        ops: Option<usize>,

        /// Seed of the shared global generator
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// Renders a failure the way the process reports it on stderr.
fn exit_message(err: &CliError) -> String {
    format!("Error: {err}")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Command failed");
            eprintln!("{}", exit_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::List => commands::list::run(),
        Commands::Run {
            strategies,
            trials,
            workers,
            ops,
            seed,
        } => {
            let settings = RunSettings::from_args(&strategies, trials, workers, ops, seed)?;
            commands::run::run(&settings).map(|_| ())
        }
    }
}
