//! Sparse QUBO matrices read from CSV.
//!
//! The file has one header line followed by `i,j,Qij` rows. The matrix may
//! be given symmetric, upper or lower triangular; it is stored upper
//! triangular, so `(i, j)` with `i > j` is folded into `(j, i)`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{QuboError, QuboResult};

/// Upper-triangular QUBO coefficients keyed by `(i, j)`, `i <= j`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qubo {
    terms: BTreeMap<(u64, u64), f64>,
}

impl Qubo {
    /// Empty QUBO.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one matrix entry.
    ///
    /// Off-diagonal entries accumulate, so a symmetric input sums both halves.
    /// A diagonal entry replaces any earlier value for the same variable.
    pub fn add_entry(&mut self, i: u64, j: u64, value: f64) {
        if i == j {
            if let Some(previous) = self.terms.insert((i, i), value) {
                warn!(variable = i, previous, value, "duplicate diagonal QUBO entry replaced");
            }
            return;
        }
        let key = if i < j { (i, j) } else { (j, i) };
        *self.terms.entry(key).or_insert(0.0) += value;
    }

    /// Parse CSV text.
    pub fn from_csv_str(text: &str) -> QuboResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse CSV from a reader.
    pub fn from_reader<R: Read>(reader: R) -> QuboResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut qubo = Qubo::new();
        for row in rdr.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line());
            let bad = |reason: String| QuboError::Row { line, reason };

            if row.len() != 3 {
                return Err(bad(format!("expected 3 fields 'i,j,Qij', found {}", row.len())));
            }
            let index = |k: usize| {
                row[k]
                    .parse::<u64>()
                    .map_err(|_| bad(format!("'{}' is not a variable index", &row[k])))
            };
            let i = index(0)?;
            let j = index(1)?;
            let value: f64 = row[2]
                .parse()
                .map_err(|_| bad(format!("'{}' is not a coefficient", &row[2])))?;

            qubo.add_entry(i, j, value);
        }

        debug!(terms = qubo.len(), variables = qubo.num_variables(), "read QUBO");
        Ok(qubo)
    }

    /// Read a QUBO file.
    pub fn load(path: &Path) -> QuboResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| QuboError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_str(&text)
    }

    /// Coefficient at `(i, j)`, looked up in upper-triangular order.
    pub fn get(&self, i: u64, j: u64) -> Option<f64> {
        let key = if i <= j { (i, j) } else { (j, i) };
        self.terms.get(&key).copied()
    }

    /// Stored entries in key order.
    pub fn terms(&self) -> impl Iterator<Item = ((u64, u64), f64)> + '_ {
        self.terms.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if no entries were read.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// One past the highest variable index.
    pub fn num_variables(&self) -> u64 {
        self.terms.keys().map(|&(_, j)| j + 1).max().unwrap_or(0)
    }

    /// Objective `x^T Q x` for a binary assignment indexed by variable.
    pub fn energy(&self, assignment: &[u8]) -> QuboResult<f64> {
        let needed = self.num_variables();
        if (assignment.len() as u64) < needed {
            return Err(QuboError::Assignment {
                needed: needed.saturating_sub(1),
                got: assignment.len(),
            });
        }
        Ok(self
            .terms
            .iter()
            .filter(|&(&(i, j), _)| assignment[i as usize] != 0 && assignment[j as usize] != 0)
            .map(|(_, &v)| v)
            .sum())
    }
}

impl fmt::Display for Qubo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, ((i, j), v)) in self.terms().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({i}, {j}): {v:?}")?;
        }
        write!(f, "}}")
    }
}
