//! Timing command implementation.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use ising_io::{SampleSet, TimingReport};

/// Execute the timing command.
pub fn execute(input: &Path, noheader: bool, fields: &[String]) -> Result<()> {
    let set = SampleSet::load(input)
        .with_context(|| format!("Failed to load sample set from {}", input.display()))?;

    let mut report = TimingReport::from_sample_set(&set)
        .with_context(|| format!("No timing information in {}", input.display()))?;
    if !fields.is_empty() {
        report = report.select(fields)?;
    }

    report.write_csv(io::stdout().lock(), !noheader)?;
    Ok(())
}
