use std::path::{Path, PathBuf};

use crate::error::JtlStatError;
use crate::results::{analyze_content, BatchReport, FailedFile, FileReport};

/// Extension of the result files picked up from a results directory.
pub const RESULT_EXTENSION: &str = "jtl";

/// List the `*.jtl` files directly inside `dir`, sorted by file name.
pub async fn list_result_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, JtlStatError> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == RESULT_EXTENSION)
            && entry.file_type().await?.is_file()
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and summarise one result file.
///
/// A malformed row surfaces as [`JtlStatError::Parse`]; read failures as
/// [`JtlStatError::Io`].
pub async fn analyze_file(path: impl AsRef<Path>) -> Result<Option<FileReport>, JtlStatError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    analyze_content(&file_name, &content).map_err(|source| JtlStatError::Parse {
        file: path.to_path_buf(),
        source,
    })
}

/// Analyse every result file in `dir`, one after another.
///
/// A malformed file is recorded in [`BatchReport::failed`] and the batch moves
/// on. Any I/O failure aborts the whole batch.
pub async fn analyze_dir(dir: impl AsRef<Path>) -> Result<BatchReport, JtlStatError> {
    let dir = dir.as_ref();
    let files = list_result_files(dir).await?;
    tracing::debug!("Found {} result files in {}", files.len(), dir.display());

    let mut batch = BatchReport::default();
    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match analyze_file(&path).await {
            Ok(Some(report)) => {
                tracing::debug!(
                    "{}: {} requests, {} errors, {:.2} req/s",
                    file_name,
                    report.summary.total,
                    report.summary.errors,
                    report.summary.rps
                );
                batch.reports.push(report);
            }
            Ok(None) => {
                tracing::debug!("{file_name}: no data rows, skipping");
            }
            Err(JtlStatError::Parse { source, .. }) => {
                tracing::warn!("{file_name}: {source}; file left out of the report");
                batch.failed.push(FailedFile {
                    file_name,
                    error: source.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Analysed {} result files ({} failed)",
        batch.reports.len(),
        batch.failed.len()
    );
    Ok(batch)
}

/// Write a rendered report to disk.
pub async fn write_report(path: impl AsRef<Path>, contents: &str) -> Result<(), JtlStatError> {
    tokio::fs::write(path.as_ref(), contents).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
