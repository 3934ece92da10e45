//! Solver timing extraction.
//!
//! Samplers report QPU timing in microseconds under `info.timing`. The
//! report adds one synthetic field, `minimum`, holding the lowest energy in
//! the set, so a timing row can be joined with solution quality.

use std::io::Write;

use csv::WriterBuilder;
use serde_json::Value;

use crate::error::{ExportError, ExportResult};
use crate::sampleset::SampleSet;

/// Name of the lowest-energy field appended to the timing fields.
pub const MINIMUM_FIELD: &str = "minimum";

/// Ordered `(field, value)` pairs for one solver call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingReport {
    fields: Vec<(String, Value)>,
}

impl TimingReport {
    /// All timing fields in document order, then `minimum`.
    pub fn from_sample_set(set: &SampleSet) -> ExportResult<Self> {
        let timing = set.timing().ok_or(ExportError::MissingTiming)?;
        let mut fields: Vec<(String, Value)> = timing
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let minimum = set
            .min_energy()
            .map_or(Value::Null, Value::from);
        match fields.iter_mut().find(|(k, _)| k == MINIMUM_FIELD) {
            Some(slot) => slot.1 = minimum,
            None => fields.push((MINIMUM_FIELD.to_string(), minimum)),
        }

        Ok(Self { fields })
    }

    /// Keep only `names`, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> ExportResult<Self> {
        let fields = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .map(|v| (name.to_string(), v.clone()))
                    .ok_or_else(|| ExportError::UnknownField {
                        field: name.to_string(),
                        available: self.field_names().join(","),
                    })
            })
            .collect::<ExportResult<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// Field names in output order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Value of one field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Write one CSV row, preceded by a header row when `header` is set.
    pub fn write_csv<W: Write>(&self, writer: W, header: bool) -> ExportResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        if header {
            wtr.write_record(self.fields.iter().map(|(k, _)| k.as_str()))?;
        }
        wtr.write_record(self.fields.iter().map(|(_, v)| cell(v)))?;
        wtr.flush()?;
        Ok(())
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
