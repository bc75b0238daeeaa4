pub mod export;
pub mod io;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::JtlError;
use crate::jtl::parse_records;
use crate::stats::{endpoint_breakdown, EndpointSummary, FileSummary};

// ---------------------------------------------------------------------------
// RunName — cosmetic metadata from the file name
// ---------------------------------------------------------------------------

/// Variant and scenario encoded in a result file name.
///
/// The convention is `{anything}-{variant}-{scenario}.{ext}`, e.g.
/// `variant-a-read-heavy.jtl` is variant `A`, scenario `read-heavy`. Names that
/// do not follow it degrade to empty or partial fields instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunName {
    pub variant: String,
    pub scenario: String,
}

impl RunName {
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        let parts: Vec<&str> = stem.split('-').collect();
        match parts.as_slice() {
            [scenario] => Self {
                variant: String::new(),
                scenario: scenario.to_string(),
            },
            [scenario, variant] => Self {
                variant: variant.to_string(),
                scenario: scenario.to_string(),
            },
            [_, variant, rest @ ..] => Self {
                variant: variant.to_uppercase(),
                scenario: rest.join("-"),
            },
            [] => Self::default(),
        }
    }

    /// Scenario with dashes shown as spaces, e.g. `read heavy`.
    pub fn scenario_title(&self) -> String {
        self.scenario.replace('-', " ")
    }
}

// ---------------------------------------------------------------------------
// FileReport / BatchReport
// ---------------------------------------------------------------------------

/// Everything computed for one result file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileReport {
    pub file_name: String,
    pub run: RunName,
    pub summary: FileSummary,
    /// Per-label statistics, ordered by label.
    pub endpoints: BTreeMap<String, EndpointSummary>,
}

/// A result file whose rows could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FailedFile {
    pub file_name: String,
    pub error: String,
}

/// Outcome of analysing a whole results directory.
///
/// Files without data rows leave no trace here; they are only logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchReport {
    /// Analysed files, ordered by file name.
    pub reports: Vec<FileReport>,
    /// Files abandoned because of a malformed row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// Reports whose file has at least one failed request.
    pub fn with_errors(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.summary.errors > 0)
    }
}

/// Parse and summarise the contents of one result file.
///
/// Returns `Ok(None)` for a file without data rows; such a file must not
/// appear in any report.
pub fn analyze_content(file_name: &str, content: &str) -> Result<Option<FileReport>, JtlError> {
    let set = parse_records(content)?;
    let Some(summary) = FileSummary::from_records(&set) else {
        return Ok(None);
    };
    let endpoints = endpoint_breakdown(&set, summary.window_seconds());
    Ok(Some(FileReport {
        file_name: file_name.to_string(),
        run: RunName::from_file_name(file_name),
        summary,
        endpoints,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
