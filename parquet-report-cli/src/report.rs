//! Report generation
//!
//! Renders the dataset overview section by section. Sections run in a fixed
//! order and the first failure aborts the report, labelled with the section
//! that produced it.

use anyhow::{Context, Result};
use parquet_report::format::{null_bar, render_table, thousands, truncate_display};
use parquet_report::{ColumnDescriptor, Inspector, ReportOptions, KEY_COLUMNS};
use std::io::Write;

const TITLE: &str = "PLACES ATTRIBUTE CONFLATION — Dataset Overview";
const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

/// Writes the text report for one inspector session
pub struct ReportWriter<'a, W: Write> {
    out: W,
    inspector: &'a Inspector,
    options: &'a ReportOptions,
}

impl<'a, W: Write> ReportWriter<'a, W> {
    pub fn new(out: W, inspector: &'a Inspector, options: &'a ReportOptions) -> Self {
        Self {
            out,
            inspector,
            options,
        }
    }

    /// Write every section in order
    pub fn write_report(&mut self) -> Result<()> {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(self.out, "{}", banner)?;
        writeln!(self.out, "{}", TITLE)?;
        writeln!(self.out, "{}", banner)?;

        let columns = self.schema().context("SCHEMA section failed")?;
        let total_rows = self.row_count().context("ROW COUNT section failed")?;
        self.null_counts(&columns, total_rows)
            .context("NULL COUNTS section failed")?;
        self.confidence().context("CONFIDENCE section failed")?;
        self.sample_rows().context("SAMPLE ROWS section failed")?;
        self.uniqueness(total_rows)
            .context("UNIQUENESS section failed")?;
        self.full_sample(&columns)
            .context("FULL SAMPLE section failed")?;

        writeln!(self.out, "\n{}", banner)?;
        self.out.flush()?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n{}", title)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn schema(&mut self) -> Result<Vec<ColumnDescriptor>> {
        self.heading("SCHEMA (columns & types)")?;
        let columns = self.inspector.describe()?;
        let width = self.options.name_width;
        for column in &columns {
            writeln!(self.out, "  {:<width$} {}", column.name, column.data_type)?;
        }
        Ok(columns)
    }

    fn row_count(&mut self) -> Result<u64> {
        let total = self.inspector.row_count()?;
        writeln!(self.out, "\nROW COUNT: {}", thousands(total))?;
        Ok(total)
    }

    fn null_counts(&mut self, columns: &[ColumnDescriptor], total_rows: u64) -> Result<()> {
        self.heading("NULL COUNTS per column")?;
        let counts = self.inspector.null_counts(columns, total_rows)?;
        let width = self.options.name_width;
        for count in &counts {
            writeln!(
                self.out,
                "  {:<width$} {:>5} ({:5.1}%) {}",
                count.column,
                count.null_count,
                count.percentage,
                null_bar(count.percentage, self.options.bar_width)
            )?;
        }
        Ok(())
    }

    fn confidence(&mut self) -> Result<()> {
        self.heading("CONFIDENCE distribution (conflated vs base)")?;
        let bins = self.inspector.confidence_bins(self.options.confidence_bins)?;
        let rows: Vec<Vec<String>> = bins
            .iter()
            .map(|b| vec![format!("{:.2}", b.bin), b.count.to_string()])
            .collect();
        writeln!(self.out, "{}", render_table(&["conf_bin", "cnt"], &rows, false))?;

        let stats = self.inspector.base_confidence_stats()?;
        writeln!(
            self.out,
            "\n  base_confidence: min={:.2}, max={:.2}, avg={:.2}",
            stats.min, stats.max, stats.avg
        )?;
        Ok(())
    }

    fn sample_rows(&mut self) -> Result<()> {
        self.heading("SAMPLE ROWS (key attributes)")?;
        let sample = self
            .inspector
            .sample_rows(&KEY_COLUMNS, self.options.sample_rows)?;
        let marker = self.options.null_marker.as_str();
        let rows: Vec<Vec<String>> = sample
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_deref().unwrap_or(marker).to_string())
                    .collect()
            })
            .collect();
        writeln!(self.out, "{}", render_table(&sample.columns, &rows, true))?;
        Ok(())
    }

    fn uniqueness(&mut self, total_rows: u64) -> Result<()> {
        self.heading("UNIQUENESS")?;
        let stats = self.inspector.uniqueness()?;
        writeln!(self.out, "  Unique id:       {}", thousands(stats.unique_ids))?;
        writeln!(self.out, "  Unique base_id:  {}", thousands(stats.unique_base_ids))?;

        if stats.has_duplicate_bases(total_rows) {
            let dupes = self
                .inspector
                .duplicate_base_ids(self.options.top_duplicates)?;
            log::debug!("{} base records shared by several rows", dupes.len());

            let marker = self.options.null_marker.as_str();
            let rows: Vec<Vec<String>> = dupes
                .iter()
                .map(|d| {
                    vec![
                        d.base_id.as_deref().unwrap_or(marker).to_string(),
                        d.count.to_string(),
                    ]
                })
                .collect();
            writeln!(
                self.out,
                "  (Multiple conflated records per base_id; top duplicate bases:)"
            )?;
            writeln!(self.out, "{}", render_table(&["base_id", "n"], &rows, false))?;
        }
        Ok(())
    }

    fn full_sample(&mut self, columns: &[ColumnDescriptor]) -> Result<()> {
        self.heading("FULL SAMPLE (first row, all columns)")?;
        let row = self.inspector.first_row(columns)?;
        let Some(pairs) = row.row_pairs(0) else {
            log::warn!("Dataset has no rows; full sample skipped");
            return Ok(());
        };

        for (name, value) in pairs {
            let text = match value {
                Some(v) => truncate_display(v, self.options.truncate_at),
                None => self.options.null_marker.clone(),
            };
            writeln!(self.out, "  {}: {}", name, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const CONFLATION_ROWS: &str = r#"
        SELECT * FROM (VALUES
            (1, 10, 'Cafe Uno', 'cafe', 0.91::DOUBLE, 'Cafe 1', 'coffee_shop', 0.5::DOUBLE, repeat('x', 100)),
            (2, 10, 'Cafe Uno Bis', 'cafe', 0.80::DOUBLE, 'Cafe 1', 'coffee_shop', 0.5::DOUBLE, 'short'),
            (3, 20, 'Bakery', 'bakery', NULL, 'Bakery', 'bakery', 0.6::DOUBLE, NULL)
        ) AS t(id, base_id, names, categories, confidence, base_names, base_categories, base_confidence, notes)
    "#;

    const UNIQUE_BASE_ROWS: &str = r#"
        SELECT * FROM (VALUES
            (1, 10, 'A', 'cafe', 0.9::DOUBLE, 'A', 'cafe', 0.7::DOUBLE),
            (2, 20, 'B', 'bar', 0.7::DOUBLE, 'B', 'bar', 0.8::DOUBLE)
        ) AS t(id, base_id, names, categories, confidence, base_names, base_categories, base_confidence)
    "#;

    fn write_parquet(dir: &TempDir, select: &str) -> PathBuf {
        let path = dir.path().join("samples.parquet");
        let conn = duckdb::Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!(
            "COPY ({}) TO {} (FORMAT PARQUET)",
            select,
            parquet_report::source::sql_literal(&path.to_string_lossy())
        ))
        .unwrap();
        path
    }

    fn render(path: &Path, options: &ReportOptions) -> Result<String> {
        let inspector = Inspector::open(path)?;
        let mut buf = Vec::new();
        ReportWriter::new(&mut buf, &inspector, options).write_report()?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_conflation_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, CONFLATION_ROWS);
        let report = render(&path, &ReportOptions::default()).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], TITLE);
        assert!(lines.contains(&format!("  {:<20} INTEGER", "id").as_str()));
        assert!(lines.contains(&"ROW COUNT: 3"));

        let confidence_line = format!(
            "  {:<20} {:>5} ({:5.1}%) {}",
            "confidence",
            1,
            100.0 / 3.0,
            null_bar(100.0 / 3.0, 20)
        );
        assert!(lines.contains(&confidence_line.as_str()));
        assert!(report.contains("1 ( 33.3%)"));

        assert!(lines.contains(&"  base_confidence: min=0.50, max=0.60, avg=0.53"));
        assert!(lines.contains(&"  Unique id:       3"));
        assert!(lines.contains(&"  Unique base_id:  2"));

        let note = lines
            .iter()
            .position(|l| l.contains("top duplicate bases"))
            .expect("duplicate section present");
        let full = lines
            .iter()
            .position(|l| l.starts_with("FULL SAMPLE"))
            .unwrap();
        let dupes: Vec<Vec<&str>> = lines[note + 1..full]
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(dupes[0], vec!["base_id", "n"]);
        assert_eq!(dupes[1], vec!["10", "2"]);
        assert_eq!(dupes.len(), 2);

        assert!(lines.contains(&format!("  notes: {}...", "x".repeat(80)).as_str()));
        assert!(lines.contains(&"  id: 1"));
        assert_eq!(*lines.last().unwrap(), "=".repeat(60));
    }

    #[test]
    fn test_section_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, CONFLATION_ROWS);
        let report = render(&path, &ReportOptions::default()).unwrap();

        let order = [
            "SCHEMA (columns & types)",
            "ROW COUNT:",
            "NULL COUNTS per column",
            "CONFIDENCE distribution",
            "SAMPLE ROWS (key attributes)",
            "UNIQUENESS",
            "FULL SAMPLE (first row, all columns)",
        ];
        let positions: Vec<usize> = order.iter().map(|h| report.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_rows_show_null_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, CONFLATION_ROWS);
        let options = ReportOptions::default().with_null_marker("None");
        let report = render(&path, &options).unwrap();

        let start = report.find("SAMPLE ROWS").unwrap();
        let end = report.find("UNIQUENESS").unwrap();
        let sample = &report[start..end];
        let third = sample
            .lines()
            .find(|l| l.split_whitespace().next() == Some("2"))
            .unwrap();
        assert!(third.contains("None"));
        assert!(third.contains("Bakery"));
    }

    #[test]
    fn test_no_duplicate_section_when_bases_unique() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, UNIQUE_BASE_ROWS);
        let report = render(&path, &ReportOptions::default()).unwrap();

        assert!(report.contains("  Unique base_id:  2"));
        assert!(!report.contains("top duplicate bases"));
    }

    #[test]
    fn test_failure_names_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, "SELECT 1 AS id, 2 AS base_id");
        let err = render(&path, &ReportOptions::default()).unwrap_err();

        assert_eq!(err.to_string(), "CONFIDENCE section failed");
    }

    #[test]
    fn test_empty_dataset_fails_in_null_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, &format!("{} WHERE false", UNIQUE_BASE_ROWS.trim()));
        let err = render(&path, &ReportOptions::default()).unwrap_err();

        assert_eq!(err.to_string(), "NULL COUNTS section failed");
    }
}
