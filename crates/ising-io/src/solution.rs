//! Solution table export.
//!
//! Flattens a sample set into one CSV row per distinct sample, lowest energy
//! first: `energy, num_occurrences, [chain_break_fraction], <variables...>`.

use std::io::Write;

use csv::WriterBuilder;
use tracing::debug;

use ising_stats::EnergyRecord;

use crate::error::ExportResult;
use crate::sample::{ENERGY_COLUMN, OCCURRENCES_COLUMN};
use crate::sampleset::SampleSet;

/// Column name for the chain break fraction.
pub const CHAIN_BREAK_COLUMN: &str = "chain_break_fraction";

/// One distinct sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionRow {
    /// Sample energy.
    pub energy: f64,
    /// Read count.
    pub num_occurrences: u64,
    /// Fraction of broken chains, when reported and kept.
    pub chain_break_fraction: Option<f64>,
    /// Variable values in column order.
    pub sample: Vec<i64>,
}

/// Samples sorted by energy, with their column names.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionTable {
    columns: Vec<String>,
    rows: Vec<SolutionRow>,
}

impl SolutionTable {
    /// Build the table. The chain break column is kept only when the sample
    /// set has one and `include_chain_break` is set.
    pub fn from_sample_set(set: &SampleSet, include_chain_break: bool) -> ExportResult<Self> {
        let samples = set.samples()?;
        let records = set.records()?;
        let chain_breaks = set
            .vectors
            .chain_break_fraction
            .as_ref()
            .filter(|_| include_chain_break)
            .map(|v| v.data.as_slice());

        let width = samples.first().map_or(0, Vec::len);
        let mut columns = vec![ENERGY_COLUMN.to_string(), OCCURRENCES_COLUMN.to_string()];
        if chain_breaks.is_some() {
            columns.push(CHAIN_BREAK_COLUMN.to_string());
        }
        columns.extend(set.variable_names(width));

        let mut rows: Vec<SolutionRow> = records
            .into_iter()
            .zip(samples)
            .enumerate()
            .map(|(i, (EnergyRecord { energy, occurrences }, sample))| SolutionRow {
                energy,
                num_occurrences: occurrences,
                chain_break_fraction: chain_breaks.map(|c| c[i]),
                sample,
            })
            .collect();
        rows.sort_by(|a, b| a.energy.total_cmp(&b.energy));

        debug!(rows = rows.len(), columns = columns.len(), "built solution table");
        Ok(Self { columns, rows })
    }

    /// Header cells.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, lowest energy first.
    pub fn rows(&self) -> &[SolutionRow] {
        &self.rows
    }

    /// Write the header and every row as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            let mut cells = vec![format!("{:?}", row.energy), row.num_occurrences.to_string()];
            if let Some(cbf) = row.chain_break_fraction {
                cells.push(format!("{cbf:?}"));
            }
            cells.extend(row.sample.iter().map(i64::to_string));
            wtr.write_record(&cells)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
