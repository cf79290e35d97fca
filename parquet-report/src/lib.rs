//! Parquet Dataset Report Library
//!
//! Read-only inspection of a single columnar dataset through an embedded
//! DuckDB session: schema, row and null counts, the confidence histogram,
//! sample rows and duplicate-key analysis of conflated place records.
//!
//! # Architecture
//!
//! This library runs queries and returns typed records:
//! - `Inspector` owns the engine connection for one dataset file
//! - `types` holds the per-section records
//! - `format` turns numbers and values into report text
//!
//! The library does NOT print. Rendering the report is done by the
//! application layer (parquet-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use parquet_report::{Inspector, ReportOptions};
//! use std::path::Path;
//!
//! let options = ReportOptions::new().with_sample_rows(3);
//! let inspector = Inspector::open(Path::new("data/project_a_samples.parquet")).unwrap();
//!
//! let columns = inspector.describe().unwrap();
//! let total = inspector.row_count().unwrap();
//! for null_count in inspector.null_counts(&columns, total).unwrap() {
//!     println!("{}: {:.1}%", null_count.column, null_count.percentage);
//! }
//!
//! let sample = inspector
//!     .sample_rows(&parquet_report::KEY_COLUMNS, options.sample_rows)
//!     .unwrap();
//! println!("{} sample rows", sample.len());
//! inspector.close().unwrap();
//! ```

// Public modules
pub mod config;
pub mod format;
pub mod inspector;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use config::ReportOptions;
pub use inspector::Inspector;
pub use source::default_dataset_path;
pub use types::{
    ColumnDescriptor, ConfidenceBin, ConfidenceStats, DuplicateKey, InspectError, NullCount,
    Result, SampleTable, UniquenessStats, KEY_COLUMNS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
