//! Dataset location and SQL quoting
//!
//! The dataset is addressed by path inside every query, so the engine reads
//! the file in place.

use std::path::{Path, PathBuf};

/// Directory (relative to the project root) that holds datasets
pub const DATA_DIR: &str = "data";

/// File name of the conflation sample dataset
pub const DATASET_FILE: &str = "project_a_samples.parquet";

/// Resolve the dataset from the directory the program lives in.
///
/// The project root is the parent of `anchor_dir`, so the result does not
/// depend on the caller's working directory.
pub fn default_dataset_path(anchor_dir: &Path) -> PathBuf {
    anchor_dir
        .parent()
        .unwrap_or(anchor_dir)
        .join(DATA_DIR)
        .join(DATASET_FILE)
}

/// Quote `text` as a SQL string literal
pub fn sql_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Quote `name` as a SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Table expression reading the Parquet file at `path`
pub fn table_expr(path: &Path) -> String {
    format!("read_parquet({})", sql_literal(&path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset_path() {
        let path = default_dataset_path(Path::new("/opt/places/scripts"));
        assert_eq!(
            path,
            PathBuf::from("/opt/places/data/project_a_samples.parquet")
        );
    }

    #[test]
    fn test_quoting() {
        assert_eq!(sql_literal("a.parquet"), "'a.parquet'");
        assert_eq!(sql_literal("o'brien.parquet"), "'o''brien.parquet'");
        assert_eq!(quote_ident("base_id"), "\"base_id\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_table_expr() {
        assert_eq!(
            table_expr(Path::new("/data/x.parquet")),
            "read_parquet('/data/x.parquet')"
        );
    }
}
