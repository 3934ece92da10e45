//! File formats around an Ising annealer run.
//!
//! - [`sample`]: energy records from a CSV table or a serialized sample set,
//!   with format detection.
//! - [`sampleset`]: the JSON form of a sample set (vectors, samples, labels
//!   and solver `info`).
//! - [`qubo`]: sparse `i,j,Qij` QUBO files.
//! - [`timing`]: the solver's timing block as a CSV row.
//! - [`solution`]: samples as a CSV table sorted by energy.

pub mod error;
pub mod qubo;
pub mod sample;
pub mod sampleset;
pub mod solution;
pub mod timing;

pub use error::{ExportError, ExportResult, LoadError, LoadResult, QuboError, QuboResult};
pub use qubo::Qubo;
pub use sample::{
    ENERGY_COLUMN, OCCURRENCES_COLUMN, SampleFormat, load_records, read_records, read_records_csv,
};
pub use sampleset::{DataVector, SampleData, SampleSet, Vectors};
pub use solution::{CHAIN_BREAK_COLUMN, SolutionRow, SolutionTable};
pub use timing::{MINIMUM_FIELD, TimingReport};
