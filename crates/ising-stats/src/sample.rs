//! Energy records and their expansion into a flat sample.
//!
//! Annealers report each distinct solution once together with the number of
//! reads that landed on it. The statistics downstream work on one entry per
//! read, so a record `(energy, k)` contributes `k` copies of `energy`.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StatsError, StatsResult};

/// One distinct observed energy and how many reads produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    /// Ising/QUBO energy of the solution.
    pub energy: f64,
    /// Number of reads that returned it.
    pub occurrences: u64,
}

impl EnergyRecord {
    /// Create a record from an already-validated count.
    pub fn new(energy: f64, occurrences: u64) -> Self {
        Self {
            energy,
            occurrences,
        }
    }

    /// Create a record from raw numeric fields as they come out of a table.
    ///
    /// `occurrences` must be a finite, non-negative whole number (`5.0` is
    /// accepted, `2.5` and `-1` are not). `index` is the record's position in
    /// the input and is only used for error context.
    pub fn from_raw(index: usize, energy: f64, occurrences: f64) -> StatsResult<Self> {
        let invalid = |reason: String| StatsError::InvalidRecord { index, reason };

        if !energy.is_finite() {
            return Err(invalid(format!("energy {energy} is not finite")));
        }
        if !occurrences.is_finite() {
            return Err(invalid(format!("occurrence count {occurrences} is not finite")));
        }
        if occurrences < 0.0 {
            return Err(invalid(format!("occurrence count {occurrences} is negative")));
        }
        if occurrences.fract() != 0.0 {
            return Err(invalid(format!("occurrence count {occurrences} is not an integer")));
        }
        if occurrences >= u64::MAX as f64 {
            return Err(invalid(format!("occurrence count {occurrences} is out of range")));
        }

        Ok(Self::new(energy, occurrences as u64))
    }
}

/// A flat, non-empty sequence of energies, one per physical read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnergySample(Vec<f64>);

impl EnergySample {
    /// Wrap already-flat energies. Fails on an empty vector or non-finite values.
    pub fn from_energies(energies: Vec<f64>) -> StatsResult<Self> {
        if energies.is_empty() {
            return Err(StatsError::EmptySample { records: 0 });
        }
        if let Some(index) = energies.iter().position(|e| !e.is_finite()) {
            return Err(StatsError::InvalidRecord {
                index,
                reason: format!("energy {} is not finite", energies[index]),
            });
        }
        Ok(Self(energies))
    }

    /// Lowest observed energy.
    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Borrow the energies.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Take the energies back.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for EnergySample {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for EnergySample {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Expand `(energy, occurrences)` records into one entry per read.
///
/// Record order is preserved. Fails with [`StatsError::EmptySample`] when the
/// records add up to zero reads.
pub fn expand(records: &[EnergyRecord]) -> StatsResult<EnergySample> {
    let mut total: u64 = 0;
    for (index, record) in records.iter().enumerate() {
        if !record.energy.is_finite() {
            return Err(StatsError::InvalidRecord {
                index,
                reason: format!("energy {} is not finite", record.energy),
            });
        }
        total = total
            .checked_add(record.occurrences)
            .ok_or_else(|| StatsError::InvalidRecord {
                index,
                reason: "total occurrence count overflows".into(),
            })?;
    }

    if total == 0 {
        return Err(StatsError::EmptySample {
            records: records.len(),
        });
    }

    let capacity = usize::try_from(total).map_err(|_| StatsError::InvalidRecord {
        index: records.len().saturating_sub(1),
        reason: format!("total occurrence count {total} does not fit in memory"),
    })?;

    let mut energies = Vec::with_capacity(capacity);
    for record in records {
        energies.extend(std::iter::repeat_n(record.energy, record.occurrences as usize));
    }

    debug!(records = records.len(), reads = energies.len(), "expanded energy sample");
    Ok(EnergySample(energies))
}
