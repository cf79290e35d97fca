//! Report options
//!
//! The defaults reproduce the fixed report layout. A config file may override
//! any field; everything not given keeps its default.

use crate::types::{InspectError, Result};
use serde::{Deserialize, Serialize};

/// Layout and limits applied by the report sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Rows shown in the key-attribute sample (default: 5)
    pub sample_rows: usize,

    /// Confidence histogram buckets shown (default: 10)
    pub confidence_bins: usize,

    /// Duplicate base records listed (default: 5)
    pub top_duplicates: usize,

    /// Full-sample values longer than this are cut (default: 80 characters)
    pub truncate_at: usize,

    /// Width of the column-name field in schema and null listings (default: 20)
    pub name_width: usize,

    /// Segments in the null-percentage bar (default: 20, i.e. 5% each)
    pub bar_width: usize,

    /// Text printed for SQL NULL (default: "NULL")
    pub null_marker: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sample_rows: 5,
            confidence_bins: 10,
            top_duplicates: 5,
            truncate_at: 80,
            name_width: 20,
            bar_width: 20,
            null_marker: "NULL".to_string(),
        }
    }
}

impl ReportOptions {
    /// Create report options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of sample rows
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    /// Builder method: set the number of confidence buckets
    pub fn with_confidence_bins(mut self, bins: usize) -> Self {
        self.confidence_bins = bins;
        self
    }

    /// Builder method: set the number of duplicate bases listed
    pub fn with_top_duplicates(mut self, top: usize) -> Self {
        self.top_duplicates = top;
        self
    }

    /// Builder method: set the truncation limit for full-sample values
    pub fn with_truncate_at(mut self, limit: usize) -> Self {
        self.truncate_at = limit;
        self
    }

    /// Builder method: set the number of bar segments
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Builder method: set the text shown for nulls
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    /// Percentage covered by one bar segment
    pub fn percent_per_segment(&self) -> f64 {
        100.0 / self.bar_width as f64
    }

    /// Reject settings that would make a section meaningless
    pub fn validate(&self) -> Result<()> {
        if self.bar_width == 0 {
            return Err(InspectError::InvalidOptions(
                "bar_width must be at least 1".to_string(),
            ));
        }
        if self.sample_rows == 0 {
            return Err(InspectError::InvalidOptions(
                "sample_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
