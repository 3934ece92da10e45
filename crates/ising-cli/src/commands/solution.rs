//! Solution command implementation.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use ising_io::{SampleSet, SolutionTable};

/// Execute the solution command.
pub fn execute(input: &Path, output: Option<&Path>, no_chain_break: bool) -> Result<()> {
    let set = SampleSet::load(input)
        .with_context(|| format!("Failed to load sample set from {}", input.display()))?;
    let table = SolutionTable::from_sample_set(&set, !no_chain_break)
        .with_context(|| format!("Cannot build a solution table from {}", input.display()))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            table.write_csv(BufWriter::new(file))?;
            eprintln!(
                "{} Wrote {} solutions to {}",
                style("✓").green().bold(),
                table.rows().len(),
                style(path.display()).green()
            );
        }
        None => table.write_csv(io::stdout().lock())?,
    }

    Ok(())
}
