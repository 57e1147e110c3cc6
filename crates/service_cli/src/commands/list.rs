//! List command implementation
//!
//! Prints every strategy with its dispatch mode.

use harness_rng::Strategy;

use crate::Result;

/// Run the list command
pub fn run() -> Result<()> {
    println!("{:<20} {:<12} DESCRIPTION", "STRATEGY", "DISPATCH");
    for strategy in Strategy::ALL {
        println!(
            "{:<20} {:<12} {}",
            strategy.name(),
            strategy.dispatch().to_string(),
            strategy.description()
        );
    }
    Ok(())
}
