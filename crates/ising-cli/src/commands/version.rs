//! Version command implementation.

use console::style;

use ising_stats::{DEFAULT_ALPHA, DEFAULT_BOOTSTRAP_SAMPLES, MomentConvention, SKEW_TOLERANCE};

/// Defaults the `pvalue` command runs with, as `(label, value)` pairs.
fn verification_defaults() -> Vec<(&'static str, String)> {
    let convention = MomentConvention::REFERENCE;
    vec![
        ("alpha", DEFAULT_ALPHA.to_string()),
        ("bootstrap samples", DEFAULT_BOOTSTRAP_SAMPLES.to_string()),
        (
            "moments",
            format!(
                "{:?} std dev, {:?} skewness",
                convention.std_dev, convention.skewness
            )
            .to_lowercase(),
        ),
        ("skew tolerance", format!("{SKEW_TOLERANCE:e}")),
    ]
}

/// Execute the version command.
pub fn execute() {
    println!(
        "{} {}",
        style("ising-verify").bold(),
        env!("CARGO_PKG_VERSION")
    );

    let defaults = verification_defaults();
    let width = defaults.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in defaults {
        println!("  {}  {value}", style(format!("{label:<width$}")).dim());
    }
}
