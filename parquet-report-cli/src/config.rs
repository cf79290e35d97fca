//! Configuration loading and parsing
//!
//! A config file is optional; without one the report uses its fixed defaults.

use anyhow::{Context, Result};
use parquet_report::ReportOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportOptions,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Dataset to inspect instead of the bundled sample
    pub data: Option<PathBuf>,
}

/// Load configuration from a TOML file
///
/// A relative `input.data` is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(data) = config.input.data.as_mut() {
        if data.is_relative() {
            if let Some(dir) = path.parent() {
                *data = dir.join(&*data);
            }
        }
    }

    config
        .report
        .validate()
        .with_context(|| format!("Invalid [report] section in {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            data = "/srv/places/other.parquet"

            [report]
            sample_rows = 3
            null_marker = "None"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.input.data,
            Some(PathBuf::from("/srv/places/other.parquet"))
        );
        assert_eq!(config.report.sample_rows, 3);
        assert_eq!(config.report.null_marker, "None");
        assert_eq!(config.report.truncate_at, 80);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.input.data.is_none());
        assert_eq!(config.report, ReportOptions::default());
    }

    #[test]
    fn test_load_config_resolves_relative_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[input]\ndata = \"samples.parquet\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.input.data, Some(dir.path().join("samples.parquet")));
    }

    #[test]
    fn test_load_config_rejects_invalid_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        fs::write(&path, "[report]\nbar_width = 0\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
