//! Batch driver: analyse a results directory and write one report document.

use std::path::{Path, PathBuf};

use chrono::Utc;
use jtlstat_core::results::export::ReportFormat;
use jtlstat_core::results::io::{analyze_dir, write_report};
use jtlstat_core::results::BatchReport;
use jtlstat_core::JtlStatError;

pub const RESULTS_DIR_NAME: &str = "results";
pub const REPORT_FILE_NAME: &str = "README_RESULTS.md";

/// Where to read result files from and where to write the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub results_dir: PathBuf,
    pub output: PathBuf,
}

impl Config {
    pub fn new(results_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            output: output.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_results_dir(), default_output())
    }
}

/// Root of the workspace this binary was built from.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

pub fn default_results_dir() -> PathBuf {
    workspace_root().join(RESULTS_DIR_NAME)
}

pub fn default_output() -> PathBuf {
    workspace_root().join(REPORT_FILE_NAME)
}

/// Analyse `config.results_dir` and write the report to `config.output`.
///
/// Nothing is written when the batch fails.
pub async fn run(config: &Config) -> Result<BatchReport, JtlStatError> {
    let meta = tokio::fs::metadata(&config.results_dir).await?;
    if !meta.is_dir() {
        return Err(JtlStatError::Config(format!(
            "{} is not a directory",
            config.results_dir.display()
        )));
    }

    tracing::info!("Analysing result files in {}", config.results_dir.display());
    let batch = analyze_dir(&config.results_dir).await?;

    let format = ReportFormat::from_path(&config.output);
    let contents = format.render(&batch, Utc::now())?;
    write_report(&config.output, &contents).await?;
    tracing::info!("Generated {}", config.output.display());

    Ok(batch)
}
