//! Empirical cumulative distribution function.

use crate::error::{StatsError, StatsResult};

/// Right-continuous step CDF over a finite sample: `F(x) = #{v <= x} / n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ecdf {
    sorted: Vec<f64>,
}

impl Ecdf {
    /// Build from a non-empty set of values.
    pub fn new(values: impl Into<Vec<f64>>) -> StatsResult<Self> {
        let mut sorted = values.into();
        if sorted.is_empty() {
            return Err(StatsError::InsufficientData { needed: 1, got: 0 });
        }
        sorted.sort_by(f64::total_cmp);
        Ok(Self { sorted })
    }

    /// Fraction of values less than or equal to `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let count = self.sorted.partition_point(|&v| v <= x);
        count as f64 / self.sorted.len() as f64
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always false; an ECDF is never empty.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Smallest value.
    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    /// Largest value.
    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Lower empirical quantile: the smallest value `v` with `F(v) >= q`.
    pub fn quantile(&self, q: f64) -> f64 {
        let n = self.sorted.len();
        let rank = (q.clamp(0.0, 1.0) * n as f64).ceil() as usize;
        self.sorted[rank.clamp(1, n) - 1]
    }

    /// Values in ascending order.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }
}
