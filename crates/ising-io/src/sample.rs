//! Sample loader: energy records from a CSV table or a serialized sample set.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use ising_stats::EnergyRecord;

use crate::error::{LoadError, LoadResult};
use crate::sampleset::SampleSet;

/// Column holding the energy of each row.
pub const ENERGY_COLUMN: &str = "energy";
/// Column holding the read count of each row.
pub const OCCURRENCES_COLUMN: &str = "num_occurrences";

/// On-disk layout of an energy sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Table with `energy` and `num_occurrences` columns.
    Csv,
    /// Serialized sample set document.
    Json,
}

impl SampleFormat {
    /// JSON when the first non-whitespace byte opens an object, CSV otherwise.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => SampleFormat::Json,
            _ => SampleFormat::Csv,
        }
    }
}

/// Read energy records from a CSV table.
///
/// The header must name `energy` and `num_occurrences` columns; any other
/// columns are ignored.
pub fn read_records_csv<R: Read>(reader: R) -> LoadResult<Vec<EnergyRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let energy_idx = column(ENERGY_COLUMN)?;
    let count_idx = column(OCCURRENCES_COLUMN)?;

    let mut records = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row?;
        let field = |idx: usize, name: &str| -> LoadResult<f64> {
            let text = row.get(idx).unwrap_or("");
            text.parse::<f64>().map_err(|_| LoadError::Field {
                row: index + 1,
                column: name.to_string(),
                value: text.to_string(),
            })
        };
        let energy = field(energy_idx, ENERGY_COLUMN)?;
        let count = field(count_idx, OCCURRENCES_COLUMN)?;
        records.push(EnergyRecord::from_raw(index, energy, count)?);
    }

    debug!(rows = records.len(), "read sample table");
    Ok(records)
}

/// Read energy records from an in-memory buffer in the given format.
pub fn read_records(bytes: &[u8], format: SampleFormat) -> LoadResult<Vec<EnergyRecord>> {
    match format {
        SampleFormat::Csv => read_records_csv(bytes),
        SampleFormat::Json => SampleSet::from_reader(bytes)?.records(),
    }
}

/// Load energy records from a file, detecting the format unless one is given.
pub fn load_records(path: &Path, format: Option<SampleFormat>) -> LoadResult<Vec<EnergyRecord>> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = format.unwrap_or_else(|| SampleFormat::detect(&bytes));
    debug!(path = %path.display(), ?format, "loading energy sample");
    read_records(&bytes, format)
}
