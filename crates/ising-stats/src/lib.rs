//! Statistical verification of Ising annealer outputs.
//!
//! Given the energies an annealer returned (with occurrence counts), this
//! crate
//!
//! - expands `(energy, occurrences)` records into a flat sample,
//! - estimates the ground-state energy from the sample's mean, standard
//!   deviation and skewness, and
//! - bootstraps that estimate to obtain a p-value for "the lowest observed
//!   energy is the ground state".
//!
//! Method: K. Domino, M. Koniorczyk, Z. Puchała, "Statistical quality
//! assessment of Ising-based annealer outputs", QIP 21 (2022).
//!
//! # Quick start
//!
//! ```rust
//! use ising_stats::{BootstrapVerifier, EnergyRecord, expand};
//! use rand::SeedableRng;
//!
//! let records = [
//!     EnergyRecord::new(-12.0, 40),
//!     EnergyRecord::new(-11.0, 25),
//!     EnergyRecord::new(-9.5, 12),
//!     EnergyRecord::new(-7.0, 5),
//!     EnergyRecord::new(-2.0, 1),
//! ];
//! let sample = expand(&records).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let verification = BootstrapVerifier::new(0.19, 200)
//!     .unwrap()
//!     .verify(&sample, &mut rng)
//!     .unwrap();
//! assert!((0.0..=1.0).contains(&verification.p_value));
//! ```

pub mod bootstrap;
pub mod ecdf;
pub mod error;
pub mod estimator;
pub mod moments;
pub mod sample;

pub use bootstrap::{
    BootstrapReplicateSet, BootstrapVerifier, DEFAULT_BOOTSTRAP_SAMPLES, ReplicateSummary,
    Verification, bootstrap_pvalue,
};
pub use ecdf::Ecdf;
pub use error::{StatsError, StatsResult};
pub use estimator::{DEFAULT_ALPHA, GroundStateEstimator, SKEW_TOLERANCE, estimate_ground_state};
pub use moments::{MomentConvention, Moments, SkewnessKind, StdDevKind};
pub use sample::{EnergyRecord, EnergySample, expand};
