//! Query-engine session over a single Parquet dataset
//!
//! The `Inspector` is the entry point of the library. It owns the DuckDB
//! connection for the whole run and issues one read-only query per call; the
//! file is read in place through `read_parquet`, never imported.

use crate::source::{quote_ident, table_expr};
use crate::types::{
    ColumnDescriptor, ConfidenceBin, ConfidenceStats, DuplicateKey, InspectError, NullCount,
    Result, SampleTable, UniquenessStats,
};
use duckdb::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A scoped connection to the query engine bound to one dataset file
///
/// Dropping the inspector releases the connection; `close` does the same
/// but reports a failure instead of swallowing it.
pub struct Inspector {
    conn: Connection,
    path: PathBuf,
    table: String,
}

impl Inspector {
    /// Open an in-memory engine session for the dataset at `path`
    ///
    /// # Example
    /// ```no_run
    /// use parquet_report::Inspector;
    /// use std::path::Path;
    ///
    /// let inspector = Inspector::open(Path::new("data/project_a_samples.parquet")).unwrap();
    /// println!("{} rows", inspector.row_count().unwrap());
    /// ```
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(InspectError::DatasetNotFound(path.to_path_buf()));
        }

        log::info!("Opening dataset: {:?}", path);
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            table: table_expr(path),
        })
    }

    /// Path of the dataset this session reads
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Columns and declared types, in file order
    pub fn describe(&self) -> Result<Vec<ColumnDescriptor>> {
        let sql = format!("DESCRIBE SELECT * FROM {}", self.table);
        let start = Instant::now();

        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnDescriptor::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        log::debug!(
            "describe: {} columns in {} ms",
            columns.len(),
            start.elapsed().as_millis()
        );
        Ok(columns)
    }

    /// Total number of rows
    pub fn row_count(&self) -> Result<u64> {
        self.count(&format!("SELECT COUNT(*) FROM {}", self.table))
    }

    /// Null statistics for every column, most nulls first
    ///
    /// One query per column. Columns with equal counts keep their schema order.
    pub fn null_counts(&self, columns: &[ColumnDescriptor], total_rows: u64) -> Result<Vec<NullCount>> {
        let mut counts = Vec::with_capacity(columns.len());
        for column in columns {
            let nulls = self.count(&format!(
                "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
                self.table,
                quote_ident(&column.name)
            ))?;
            counts.push(NullCount::new(column.name.as_str(), nulls, total_rows)?);
        }

        counts.sort_by(|a, b| b.null_count.cmp(&a.null_count));
        Ok(counts)
    }

    /// Histogram of `confidence` rounded to 2 decimals, highest bins first
    pub fn confidence_bins(&self, limit: usize) -> Result<Vec<ConfidenceBin>> {
        let sql = format!(
            "SELECT ROUND(CAST(confidence AS DOUBLE), 2) AS conf_bin, COUNT(*) AS cnt \
             FROM {} \
             WHERE confidence IS NOT NULL \
             GROUP BY conf_bin \
             ORDER BY conf_bin DESC \
             LIMIT {}",
            self.table, limit
        );
        let start = Instant::now();

        let mut stmt = self.conn.prepare(&sql)?;
        let bins = stmt
            .query_map([], |row| {
                Ok(ConfidenceBin {
                    bin: row.get::<_, f64>(0)?,
                    count: row.get::<_, i64>(1)?.max(0) as u64,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        log::debug!(
            "confidence_bins: {} bins in {} ms",
            bins.len(),
            start.elapsed().as_millis()
        );
        Ok(bins)
    }

    /// Min, max and mean of the non-null `base_confidence` values
    pub fn base_confidence_stats(&self) -> Result<ConfidenceStats> {
        let sql = format!(
            "SELECT MIN(CAST(base_confidence AS DOUBLE)), \
                    MAX(CAST(base_confidence AS DOUBLE)), \
                    AVG(CAST(base_confidence AS DOUBLE)) \
             FROM {} \
             WHERE base_confidence IS NOT NULL",
            self.table
        );

        let (min, max, avg) = self.conn.query_row(&sql, [], |row| {
            Ok((
                row.get::<_, Option<f64>>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
            ))
        })?;

        match (min, max, avg) {
            (Some(min), Some(max), Some(avg)) => Ok(ConfidenceStats { min, max, avg }),
            _ => Err(InspectError::NoValues("base_confidence".to_string())),
        }
    }

    /// First `limit` rows of the named columns, in engine order
    pub fn sample_rows<S: AsRef<str>>(&self, columns: &[S], limit: usize) -> Result<SampleTable> {
        let select_list = columns
            .iter()
            .map(|c| {
                let ident = quote_ident(c.as_ref());
                format!("CAST({ident} AS VARCHAR) AS {ident}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM {} LIMIT {}", select_list, self.table, limit);
        let start = Instant::now();

        let width = columns.len();
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Option<String>>(i))
                    .collect::<duckdb::Result<Vec<_>>>()
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        log::debug!(
            "sample_rows: {} rows x {} columns in {} ms",
            rows.len(),
            width,
            start.elapsed().as_millis()
        );
        Ok(SampleTable {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
        })
    }

    /// Every column of the first row
    pub fn first_row(&self, columns: &[ColumnDescriptor]) -> Result<SampleTable> {
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        self.sample_rows(&names, 1)
    }

    /// Distinct counts of `id` and `base_id`
    pub fn uniqueness(&self) -> Result<UniquenessStats> {
        Ok(UniquenessStats {
            unique_ids: self.count(&format!("SELECT COUNT(DISTINCT id) FROM {}", self.table))?,
            unique_base_ids: self.count(&format!(
                "SELECT COUNT(DISTINCT base_id) FROM {}",
                self.table
            ))?,
        })
    }

    /// `base_id` values shared by several rows, most shared first
    pub fn duplicate_base_ids(&self, limit: usize) -> Result<Vec<DuplicateKey>> {
        let sql = format!(
            "SELECT CAST(base_id AS VARCHAR) AS dup_key, COUNT(*) AS n \
             FROM {} \
             GROUP BY base_id \
             HAVING COUNT(*) > 1 \
             ORDER BY n DESC, dup_key \
             LIMIT {}",
            self.table, limit
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let keys = stmt
            .query_map([], |row| {
                Ok(DuplicateKey {
                    base_id: row.get::<_, Option<String>>(0)?,
                    count: row.get::<_, i64>(1)?.max(0) as u64,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        log::debug!("duplicate_base_ids: {} shared keys", keys.len());
        Ok(keys)
    }

    /// Release the connection, surfacing any error from the engine
    pub fn close(self) -> Result<()> {
        log::debug!("Closing connection for {:?}", self.path);
        self.conn.close().map_err(|(_, e)| InspectError::Engine(e))
    }

    fn count(&self, sql: &str) -> Result<u64> {
        let start = Instant::now();
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        log::debug!("{} -> {} ({} ms)", sql, n, start.elapsed().as_millis());
        Ok(n.max(0) as u64)
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector").field("path", &self.path).finish()
    }
}
