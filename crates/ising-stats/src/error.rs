//! Error types for the statistics crate.

use thiserror::Error;

/// Errors produced while expanding samples, estimating ground-state
/// energies, or running the bootstrap.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum StatsError {
    /// An energy record has a malformed occurrence count or energy.
    #[error("invalid energy record #{index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the input sequence.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Expansion produced no observations.
    #[error("energy sample is empty ({records} records, zero total occurrences)")]
    EmptySample {
        /// Number of records that were expanded.
        records: usize,
    },

    /// Fewer data points than the statistic requires.
    #[error("insufficient data: need at least {needed} energies, got {got}")]
    InsufficientData {
        /// Minimum number of points required.
        needed: usize,
        /// Number of points supplied.
        got: usize,
    },

    /// Skewness is zero (symmetric or constant sample), so the correction
    /// term `sigma / skew` is undefined.
    #[error("degenerate sample: skewness {skewness:e} over {len} energies leaves the estimate undefined")]
    DegenerateSkew {
        /// The skewness that was computed.
        skewness: f64,
        /// Sample size.
        len: usize,
    },

    /// `alpha = -1` (or a non-finite alpha) makes `(alpha + 2) / (alpha + 1)` undefined.
    #[error("invalid alpha {0}: the correction (alpha + 2) / (alpha + 1) is undefined")]
    InvalidAlpha(f64),

    /// Bootstrap needs at least one resample.
    #[error("number of bootstrap resamples must be at least 1, got {0}")]
    InvalidResamples(usize),

    /// A single bootstrap replicate failed; the whole run is aborted.
    #[error("bootstrap replicate {index} of {resamples} failed: {source}")]
    Replicate {
        /// Zero-based replicate index.
        index: usize,
        /// Total number of replicates requested.
        resamples: usize,
        /// Underlying estimator failure.
        #[source]
        source: Box<StatsError>,
    },

    /// The run was cancelled; partial replicates are discarded.
    #[error("bootstrap cancelled after {completed} of {requested} replicates")]
    Cancelled {
        /// Replicates finished before cancellation was observed.
        completed: usize,
        /// Replicates requested.
        requested: usize,
    },
}

impl StatsError {
    /// The innermost error, looking through replicate wrappers.
    pub fn root(&self) -> &StatsError {
        match self {
            StatsError::Replicate { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;
