//! P-value command implementation.
//!
//! Loads an energy sample, bootstraps the ground-state estimator and reports
//! the probability that the lowest observed energy is the ground state.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use ising_io::{SampleFormat, load_records};
use ising_stats::{BootstrapVerifier, GroundStateEstimator, Verification, expand};

/// Input layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Detect from the file contents.
    Auto,
    /// `energy,num_occurrences` table.
    Csv,
    /// Serialized sample set.
    Json,
}

impl InputFormat {
    fn sample_format(self) -> Option<SampleFormat> {
        match self {
            InputFormat::Auto => None,
            InputFormat::Csv => Some(SampleFormat::Csv),
            InputFormat::Json => Some(SampleFormat::Json),
        }
    }
}

/// Report layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines.
    Text,
    /// JSON document.
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    verification: &'a Verification,
    #[serde(skip_serializing_if = "Option::is_none")]
    ground_state_estimate: Option<f64>,
    seed: u64,
}

/// Execute the pvalue command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    input: &Path,
    alpha: f64,
    bootstrap_samples: usize,
    estimate_energy: bool,
    seed: Option<u64>,
    parallel: bool,
    format: InputFormat,
    output: OutputFormat,
) -> Result<()> {
    let records = load_records(input, format.sample_format())
        .with_context(|| format!("Failed to load energies from {}", input.display()))?;
    let sample = expand(&records)
        .with_context(|| format!("No usable energies in {}", input.display()))?;

    let verifier = BootstrapVerifier::new(alpha, bootstrap_samples)?.parallel(parallel);

    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "bootstrap seed");
    let mut rng = StdRng::seed_from_u64(seed);

    let verification = verifier
        .verify(&sample, &mut rng)
        .context("Bootstrap failed")?;

    let estimate = if estimate_energy {
        let estimator = GroundStateEstimator::new(alpha)?;
        Some(
            estimator
                .estimate(&sample)
                .context("Cannot estimate the ground-state energy of the sample")?,
        )
    } else {
        None
    };

    match output {
        OutputFormat::Text => {
            println!("{:?}", verification.p_value);
            if let Some(h) = estimate {
                println!("H_min={h:.6}");
            }
        }
        OutputFormat::Json => {
            let report = Report {
                verification: &verification,
                ground_state_estimate: estimate,
                seed,
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}
