//! Parquet Dataset Report CLI
//!
//! Command-line front end of the parquet-report library. With no arguments
//! it inspects the conflation sample dataset bundled with the project and
//! prints the overview report to stdout. Diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use parquet_report::{default_dataset_path, Inspector, ReportOptions};
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod report;

use report::ReportWriter;

/// Parquet Report - Overview of a conflated places dataset
#[derive(Parser, Debug)]
#[command(name = "parquet-report")]
#[command(about = "Print schema, null, confidence and duplicate statistics of a Parquet dataset", long_about = None)]
#[command(version)]
struct Args {
    /// Dataset to inspect (default: <project>/data/project_a_samples.parquet)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Parquet Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using report library v{}", parquet_report::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let data_path = resolve_data_path(&args, config.input.data.as_deref());
    run(&data_path, &config.report)
}

/// `--data` beats the config file, which beats the bundled dataset
fn resolve_data_path(args: &Args, configured: Option<&Path>) -> PathBuf {
    if let Some(path) = &args.data {
        return path.clone();
    }
    if let Some(path) = configured {
        return path.to_path_buf();
    }
    default_dataset_path(Path::new(env!("CARGO_MANIFEST_DIR")))
}

/// Open the dataset, write the report to stdout, release the connection
fn run(data_path: &Path, options: &ReportOptions) -> Result<()> {
    let inspector = Inspector::open(data_path)
        .with_context(|| format!("Cannot open dataset {:?}", data_path))?;

    let stdout = io::stdout();
    ReportWriter::new(stdout.lock(), &inspector, options).write_report()?;

    inspector.close().context("Failed to close query engine connection")?;
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
