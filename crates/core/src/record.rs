// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark record and result set types.
//!
//! A [`BenchmarkRecord`] is one completed benchmark invocation. A
//! [`ResultSet`] is the ordered collection of records from one result
//! directory and is always sorted by `(solver_type, batch_size)`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Column names every aggregate file carries, in header order.
pub const CORE_COLUMNS: [&str; 4] = [
    "solver_type",
    "batch_size",
    "time_median",
    "residuals_l2_avg",
];

/// One completed benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Identifier of the solving method.
    pub solver_type: String,
    /// Number of problem instances solved together.
    pub batch_size: u64,
    /// Median execution time in seconds.
    pub time_median: f64,
    /// Average L2 norm of the residual.
    pub residuals_l2_avg: f64,
    /// Any other fields the benchmark emitted, passed through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Shape of a per-run JSON document: the known fields plus everything else.
#[derive(Deserialize)]
struct RunDocument {
    solver_type: String,
    #[serde(deserialize_with = "deserialize_batch_size")]
    batch_size: u64,
    time_median: f64,
    residuals_l2_avg: f64,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl BenchmarkRecord {
    /// Create a record without extra columns.
    pub fn new(
        solver_type: impl Into<String>,
        batch_size: u64,
        time_median: f64,
        residuals_l2_avg: f64,
    ) -> Self {
        Self {
            solver_type: solver_type.into(),
            batch_size,
            time_median,
            residuals_l2_avg,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an extra column value.
    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(column.into(), value.into());
        self
    }

    /// Parse a per-run JSON document.
    ///
    /// Unknown keys become extra columns. Scalars are kept as their text
    /// form and nested values as compact JSON. `null` and empty-string
    /// fields are dropped; both are written as empty cells.
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        let doc: RunDocument = serde_json::from_str(content)?;
        Ok(Self {
            solver_type: doc.solver_type,
            batch_size: doc.batch_size,
            time_median: doc.time_median,
            residuals_l2_avg: doc.residuals_l2_avg,
            extra: doc
                .extra
                .into_iter()
                .filter(|(_, value)| !is_blank(value))
                .map(|(key, value)| (key, cell_text(value)))
                .collect(),
        })
    }

    /// Ordering used by every [`ResultSet`].
    pub fn sort_order(&self, other: &Self) -> Ordering {
        self.solver_type
            .cmp(&other.solver_type)
            .then(self.batch_size.cmp(&other.batch_size))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Parse a batch size, accepting whole numbers written with a trailing `.0`.
pub fn parse_batch_size(text: &str) -> Option<u64> {
    text.parse::<u64>()
        .ok()
        .or_else(|| whole_batch_size(text.parse().ok()?))
}

fn whole_batch_size(value: f64) -> Option<u64> {
    (value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64).then(|| value as u64)
}

fn deserialize_batch_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Whole(u64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Whole(value) => Ok(value),
        Number::Float(value) => whole_batch_size(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid batch_size {value}"))),
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Records of one result directory, sorted by `(solver_type, batch_size)`.
///
/// The sort is stable, so records sharing a key keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<BenchmarkRecord>,
}

impl ResultSet {
    /// Build a result set, sorting the records.
    pub fn new(mut records: Vec<BenchmarkRecord>) -> Self {
        records.sort_by(BenchmarkRecord::sort_order);
        Self { records }
    }

    /// An empty result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorted records.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Consume the set, returning the sorted records.
    pub fn into_records(self) -> Vec<BenchmarkRecord> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkRecord> {
        self.records.iter()
    }

    /// Distinct solver identifiers, sorted lexicographically.
    pub fn solver_types(&self) -> Vec<&str> {
        let distinct: BTreeSet<&str> = self.iter().map(|r| r.solver_type.as_str()).collect();
        distinct.into_iter().collect()
    }

    /// Distinct batch sizes, ascending.
    pub fn batch_sizes(&self) -> Vec<u64> {
        let distinct: BTreeSet<u64> = self.iter().map(|r| r.batch_size).collect();
        distinct.into_iter().collect()
    }

    /// Union of all extra column names, sorted.
    pub fn extra_columns(&self) -> Vec<&str> {
        let distinct: BTreeSet<&str> = self
            .iter()
            .flat_map(|r| r.extra.keys().map(String::as_str))
            .collect();
        distinct.into_iter().collect()
    }

    /// Records of one solver, ascending by batch size.
    pub fn for_solver<'a>(
        &'a self,
        solver_type: &'a str,
    ) -> impl Iterator<Item = &'a BenchmarkRecord> + 'a {
        self.iter().filter(move |r| r.solver_type == solver_type)
    }
}

impl FromIterator<BenchmarkRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = BenchmarkRecord;
    type IntoIter = std::vec::IntoIter<BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
