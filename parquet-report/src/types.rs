//! Core types for the dataset report library
//!
//! This module defines the records the inspector produces for each report
//! section. None of them outlive a run: everything is recomputed from the
//! dataset file on every invocation.

use serde::Serialize;
use std::path::PathBuf;

/// Result type for inspector operations
pub type Result<T> = std::result::Result<T, InspectError>;

/// Columns the report reads by name. Every other column is discovered at runtime.
pub const KEY_COLUMNS: [&str; 8] = [
    "id",
    "base_id",
    "names",
    "categories",
    "confidence",
    "base_names",
    "base_categories",
    "base_confidence",
];

/// Errors that can occur while inspecting a dataset
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("Query engine error: {0}")]
    Engine(#[from] duckdb::Error),

    #[error("Dataset not found: {0:?}")]
    DatasetNotFound(PathBuf),

    #[error("Dataset has no rows")]
    EmptyDataset,

    #[error("No non-null values in column: {0}")]
    NoValues(String),

    #[error("Invalid report options: {0}")]
    InvalidOptions(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A column name and its declared type, as reported by schema introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Null statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullCount {
    pub column: String,
    pub null_count: u64,
    /// `100 * null_count / total_rows`
    pub percentage: f64,
}

impl NullCount {
    /// Build a record, computing the percentage against `total_rows`.
    ///
    /// An empty dataset has no meaningful percentage and is rejected.
    pub fn new(column: impl Into<String>, null_count: u64, total_rows: u64) -> Result<Self> {
        if total_rows == 0 {
            return Err(InspectError::EmptyDataset);
        }
        Ok(Self {
            column: column.into(),
            null_count,
            percentage: 100.0 * null_count as f64 / total_rows as f64,
        })
    }
}

/// One bucket of the confidence histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceBin {
    /// Confidence rounded to 2 decimal places
    pub bin: f64,
    pub count: u64,
}

/// Summary of the `base_confidence` column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Distinct key counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniquenessStats {
    pub unique_ids: u64,
    pub unique_base_ids: u64,
}

impl UniquenessStats {
    /// True when several conflated records share a base record
    pub fn has_duplicate_bases(&self, total_rows: u64) -> bool {
        self.unique_base_ids < total_rows
    }
}

/// A `base_id` value shared by more than one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    /// Textual form of the key; `None` groups the null keys
    pub base_id: Option<String>,
    pub count: u64,
}

/// Rows fetched for display
///
/// Cells hold the engine's textual rendering of each value; `None` is SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SampleTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pair each column name with its value in row `index`
    pub fn row_pairs(&self, index: usize) -> Option<Vec<(&str, Option<&str>)>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .zip(row)
                .map(|(name, value)| (name.as_str(), value.as_deref()))
                .collect(),
        )
    }
}
