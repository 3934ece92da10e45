//! Serialized sample sets, as returned by an annealer.
//!
//! The document is the JSON rendering of a sample set's serializable form:
//! per-row vectors (`energy`, `num_occurrences`, optionally
//! `chain_break_fraction`), the variable labels, the raw samples and the
//! solver's `info` block (which carries `timing`).
//!
//! ```json
//! {
//!   "variable_labels": [0, 1, 2],
//!   "vectors": {
//!     "energy": {"type": "array", "data": [-3.0, -1.0], "data_type": "float64"},
//!     "num_occurrences": {"type": "array", "data": [7, 3], "data_type": "int64"}
//!   },
//!   "sample_data": {"type": "array", "data": [[0, 1, 1], [1, 0, 1]], "use_bytes": false},
//!   "info": {"timing": {"qpu_access_time": 15000.0}},
//!   "vartype": "BINARY"
//! }
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ising_stats::EnergyRecord;

use crate::error::{LoadError, LoadResult};

/// One per-row vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataVector {
    /// Row values.
    pub data: Vec<f64>,
}

/// The per-row vectors of a sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vectors {
    /// Energy of each distinct sample.
    pub energy: DataVector,
    /// Number of reads for each distinct sample.
    pub num_occurrences: DataVector,
    /// Fraction of broken chains, when the sampler embedded the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_break_fraction: Option<DataVector>,
}

/// Raw sample matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleData {
    /// Nested rows of variable values, or a packed payload when `use_bytes`.
    pub data: Value,
    /// Whether `data` is a packed byte payload.
    #[serde(default)]
    pub use_bytes: bool,
}

/// A deserialized sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    /// Variable labels, one per sample column.
    #[serde(default)]
    pub variable_labels: Vec<Value>,
    /// Per-row vectors.
    pub vectors: Vectors,
    /// Raw samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<SampleData>,
    /// Solver metadata.
    #[serde(default)]
    pub info: Map<String, Value>,
    /// `BINARY` or `SPIN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vartype: Option<String>,
}

impl SampleSet {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> LoadResult<Self> {
        let set: SampleSet = serde_json::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse and validate from a reader.
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let set: SampleSet = serde_json::from_reader(reader)?;
        set.validate()?;
        Ok(set)
    }

    /// Read a sample set file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Number of distinct rows.
    pub fn num_rows(&self) -> usize {
        self.vectors.energy.data.len()
    }

    /// Energy records in row order.
    pub fn records(&self) -> LoadResult<Vec<EnergyRecord>> {
        self.vectors
            .energy
            .data
            .iter()
            .zip(&self.vectors.num_occurrences.data)
            .enumerate()
            .map(|(index, (&energy, &count))| {
                EnergyRecord::from_raw(index, energy, count).map_err(LoadError::from)
            })
            .collect()
    }

    /// Lowest energy in the set.
    pub fn min_energy(&self) -> Option<f64> {
        self.vectors.energy.data.iter().copied().reduce(f64::min)
    }

    /// The solver's timing block, if any.
    pub fn timing(&self) -> Option<&Map<String, Value>> {
        self.info.get("timing").and_then(Value::as_object)
    }

    /// Column names for the variables: labels rendered as text, or
    /// positional indices when the document has no labels.
    pub fn variable_names(&self, width: usize) -> Vec<String> {
        if self.variable_labels.is_empty() {
            return (0..width).map(|i| i.to_string()).collect();
        }
        self.variable_labels
            .iter()
            .map(|label| match label {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }

    /// Unpacked sample rows.
    pub fn samples(&self) -> LoadResult<Vec<Vec<i64>>> {
        let Some(sample_data) = &self.sample_data else {
            return Err(LoadError::Schema("sample set has no 'sample_data'".into()));
        };
        if sample_data.use_bytes {
            return Err(LoadError::Schema(
                "packed 'sample_data' (use_bytes) is not supported; export it unpacked".into(),
            ));
        }

        let rows: Vec<Vec<i64>> = serde_json::from_value(sample_data.data.clone())
            .map_err(|e| LoadError::Schema(format!("'sample_data.data': {e}")))?;

        if rows.len() != self.num_rows() {
            return Err(LoadError::Schema(format!(
                "{} sample rows for {} energies",
                rows.len(),
                self.num_rows()
            )));
        }
        if let Some(first) = rows.first() {
            if let Some(bad) = rows.iter().position(|r| r.len() != first.len()) {
                return Err(LoadError::Schema(format!(
                    "sample row {bad} has {} variables, row 0 has {}",
                    rows[bad].len(),
                    first.len()
                )));
            }
            if !self.variable_labels.is_empty() && self.variable_labels.len() != first.len() {
                return Err(LoadError::Schema(format!(
                    "{} variable labels for {} sample columns",
                    self.variable_labels.len(),
                    first.len()
                )));
            }
        }
        Ok(rows)
    }

    fn validate(&self) -> LoadResult<()> {
        let rows = self.num_rows();
        let occurrences = self.vectors.num_occurrences.data.len();
        if occurrences != rows {
            return Err(LoadError::Schema(format!(
                "{rows} energies but {occurrences} occurrence counts"
            )));
        }
        if let Some(cbf) = &self.vectors.chain_break_fraction {
            if cbf.data.len() != rows {
                return Err(LoadError::Schema(format!(
                    "{rows} energies but {} chain break fractions",
                    cbf.data.len()
                )));
            }
        }
        Ok(())
    }
}
