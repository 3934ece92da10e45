//! Bootstrap p-value for "the annealer reached the ground state".
//!
//! The sample is resampled with replacement `s` times; each resample yields
//! one ground-state estimate. With `F` the ECDF of those estimates and
//! `H_min` the lowest energy actually observed,
//!
//! ```text
//!   p = 1 - F(H_min)
//! ```
//!
//! is the fraction of bootstrap estimates lying strictly above `H_min`.
//!
//! Replicates draw from their own `StdRng`, seeded from the caller's RNG in
//! replicate order, so a run is reproducible from one seed and gives the same
//! replicate set whether it runs sequentially or on the rayon pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::ecdf::Ecdf;
use crate::error::{StatsError, StatsResult};
use crate::estimator::GroundStateEstimator;
use crate::moments::MomentConvention;

/// Default number of bootstrap resamples.
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;

/// Ground-state estimates from every bootstrap replicate, in replicate order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapReplicateSet {
    estimates: Vec<f64>,
    #[serde(skip)]
    ecdf: Ecdf,
}

impl BootstrapReplicateSet {
    /// Wrap a non-empty set of estimates.
    pub fn new(estimates: Vec<f64>) -> StatsResult<Self> {
        let ecdf = Ecdf::new(estimates.clone())?;
        Ok(Self { estimates, ecdf })
    }

    /// Estimates in replicate order.
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Number of replicates.
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// ECDF of the estimates.
    pub fn ecdf(&self) -> &Ecdf {
        &self.ecdf
    }

    /// `1 - F(threshold)`: fraction of estimates strictly above `threshold`.
    pub fn p_value_at(&self, threshold: f64) -> f64 {
        1.0 - self.ecdf.eval(threshold)
    }

    /// Location summary for diagnostics.
    pub fn summary(&self) -> ReplicateSummary {
        let n = self.estimates.len() as f64;
        ReplicateSummary {
            min: self.ecdf.min(),
            median: self.ecdf.quantile(0.5),
            max: self.ecdf.max(),
            mean: self.estimates.iter().sum::<f64>() / n,
        }
    }

    /// Take the estimates.
    pub fn into_estimates(self) -> Vec<f64> {
        self.estimates
    }
}

/// Spread of the bootstrap estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplicateSummary {
    /// Smallest estimate.
    pub min: f64,
    /// Lower median.
    pub median: f64,
    /// Largest estimate.
    pub max: f64,
    /// Mean estimate.
    pub mean: f64,
}

/// Outcome of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    /// Fraction of bootstrap estimates above the observed minimum.
    pub p_value: f64,
    /// Lowest energy in the observed sample.
    pub h_min: f64,
    /// Shape parameter used.
    pub alpha: f64,
    /// Number of bootstrap replicates.
    pub resamples: usize,
    /// Number of energies in the observed sample.
    pub sample_size: usize,
    /// Moment convention used by the estimator.
    pub convention: MomentConvention,
    /// Replicate spread.
    pub summary: ReplicateSummary,
    /// Every replicate estimate.
    #[serde(skip)]
    pub replicates: BootstrapReplicateSet,
}

/// Nonparametric bootstrap over the ground-state estimator.
#[derive(Debug, Clone)]
pub struct BootstrapVerifier {
    estimator: GroundStateEstimator,
    resamples: usize,
    parallel: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl BootstrapVerifier {
    /// Configure a verifier with `resamples` bootstrap replicates.
    pub fn new(alpha: f64, resamples: usize) -> StatsResult<Self> {
        if resamples == 0 {
            return Err(StatsError::InvalidResamples(resamples));
        }
        Ok(Self {
            estimator: GroundStateEstimator::new(alpha)?,
            resamples,
            parallel: false,
            cancel: None,
        })
    }

    /// Use a different moment convention for every replicate estimate.
    #[must_use]
    pub fn with_convention(mut self, convention: MomentConvention) -> Self {
        self.estimator = self.estimator.with_convention(convention);
        self
    }

    /// Run replicates on the rayon thread pool.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Abort with [`StatsError::Cancelled`] once `flag` is set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Estimator applied to each replicate.
    pub fn estimator(&self) -> &GroundStateEstimator {
        &self.estimator
    }

    /// Number of replicates.
    pub fn resamples(&self) -> usize {
        self.resamples
    }

    /// Draw every replicate and return the raw estimates.
    pub fn replicates<R: Rng + ?Sized>(
        &self,
        sample: &[f64],
        rng: &mut R,
    ) -> StatsResult<BootstrapReplicateSet> {
        let needed = self.estimator.convention().min_len();
        if sample.len() < needed {
            return Err(StatsError::InsufficientData {
                needed,
                got: sample.len(),
            });
        }

        let seeds: Vec<u64> = (0..self.resamples).map(|_| rng.next_u64()).collect();
        debug!(
            resamples = self.resamples,
            sample_size = sample.len(),
            alpha = self.estimator.alpha(),
            parallel = self.parallel,
            "running bootstrap"
        );

        let completed = AtomicUsize::new(0);
        let estimates = if self.parallel {
            seeds
                .par_iter()
                .enumerate()
                .map_init(Vec::new, |scratch, (index, &seed)| {
                    self.replicate(sample, index, seed, scratch, &completed)
                })
                .collect::<StatsResult<Vec<f64>>>()?
        } else {
            let mut scratch = Vec::with_capacity(sample.len());
            seeds
                .iter()
                .enumerate()
                .map(|(index, &seed)| self.replicate(sample, index, seed, &mut scratch, &completed))
                .collect::<StatsResult<Vec<f64>>>()?
        };

        BootstrapReplicateSet::new(estimates)
    }

    /// Run the bootstrap and derive the p-value.
    pub fn verify<R: Rng + ?Sized>(&self, sample: &[f64], rng: &mut R) -> StatsResult<Verification> {
        let replicates = self.replicates(sample, rng)?;
        let h_min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let p_value = replicates.p_value_at(h_min);

        debug!(p_value, h_min, "bootstrap complete");
        Ok(Verification {
            p_value,
            h_min,
            alpha: self.estimator.alpha(),
            resamples: self.resamples,
            sample_size: sample.len(),
            convention: self.estimator.convention(),
            summary: replicates.summary(),
            replicates,
        })
    }

    fn replicate(
        &self,
        sample: &[f64],
        index: usize,
        seed: u64,
        scratch: &mut Vec<f64>,
        completed: &AtomicUsize,
    ) -> StatsResult<f64> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(StatsError::Cancelled {
                    completed: completed.load(Ordering::Relaxed),
                    requested: self.resamples,
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let l = sample.len();
        scratch.clear();
        scratch.extend((0..l).map(|_| sample[rng.gen_range(0..l)]));

        let estimate = self
            .estimator
            .estimate(scratch)
            .map_err(|source| StatsError::Replicate {
                index,
                resamples: self.resamples,
                source: Box::new(source),
            })?;
        completed.fetch_add(1, Ordering::Relaxed);
        Ok(estimate)
    }
}

impl Default for BootstrapVerifier {
    fn default() -> Self {
        Self {
            estimator: GroundStateEstimator::default(),
            resamples: DEFAULT_BOOTSTRAP_SAMPLES,
            parallel: false,
            cancel: None,
        }
    }
}

/// Bootstrap p-value with the reference moment convention, run sequentially.
pub fn bootstrap_pvalue<R: Rng + ?Sized>(
    sample: &[f64],
    alpha: f64,
    resamples: usize,
    rng: &mut R,
) -> StatsResult<f64> {
    Ok(BootstrapVerifier::new(alpha, resamples)?
        .verify(sample, rng)?
        .p_value)
}
