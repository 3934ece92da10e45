//! QUBO command implementation.
//!
//! Reads a sparse QUBO and echoes it with the sampling parameters that a
//! solver submission would use. Nothing is sent anywhere.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use ising_io::Qubo;

/// Execute the qubo command.
pub fn execute(input: &Path, num_reads: u32, annealing_time: f64, autoscale: bool) -> Result<()> {
    let qubo = Qubo::load(input)
        .with_context(|| format!("Failed to read QUBO from {}", input.display()))?;

    if !(annealing_time.is_finite() && annealing_time > 0.0) {
        anyhow::bail!("Annealing time must be positive, got {annealing_time}");
    }

    println!(
        "{} Dry run, echoing Q ({} terms, {} variables)",
        style("→").cyan().bold(),
        qubo.len(),
        qubo.num_variables()
    );
    println!("{qubo}");
    println!("num_reads={num_reads}");
    println!("annealing_time={annealing_time:?}");
    println!("auto_scale={autoscale}");

    Ok(())
}
