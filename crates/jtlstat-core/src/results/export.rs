use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::results::{BatchReport, FileReport};

// ---------------------------------------------------------------------------
// ReportFormat
// ---------------------------------------------------------------------------

/// Output document format, picked from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    /// `.json` selects JSON; anything else is Markdown.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Markdown,
        }
    }

    pub fn render(
        self,
        batch: &BatchReport,
        generated_at: DateTime<Utc>,
    ) -> Result<String, serde_json::Error> {
        match self {
            ReportFormat::Markdown => Ok(export_markdown(batch, generated_at)),
            ReportFormat::Json => export_json(batch),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export a batch as pretty-printed JSON.
pub fn export_json(batch: &BatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(batch)
}

// ---------------------------------------------------------------------------
// Markdown export
// ---------------------------------------------------------------------------

const SCENARIO_DIR: &str = "jmeter/scenarios";
const RESULTS_DIR: &str = "results";

/// Render a batch as a Markdown report.
pub fn export_markdown(batch: &BatchReport, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("# Load-test results\n\n");
    let _ = writeln!(
        out,
        "Generated: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    out.push_str("## Analysed files\n\n");
    if batch.reports.is_empty() {
        out.push_str("No result file contained data.\n");
    }
    for r in &batch.reports {
        let _ = writeln!(out, "- {}", r.file_name);
    }
    out.push('\n');

    push_run_commands(&mut out, batch);
    push_results_table(&mut out, batch);
    for r in &batch.reports {
        push_endpoint_table(&mut out, r);
    }
    push_incidents(&mut out, batch);
    push_failed(&mut out, batch);

    out
}

fn push_run_commands(out: &mut String, batch: &BatchReport) {
    if batch.reports.is_empty() {
        return;
    }
    out.push_str("## Run commands\n\n");
    let _ = writeln!(
        out,
        "Scenario plans live in `{SCENARIO_DIR}/` and results are written to `{RESULTS_DIR}/`. \
         Each run was produced in non-GUI mode:\n"
    );
    out.push_str("```sh\n");
    for r in &batch.reports {
        let _ = writeln!(
            out,
            "jmeter -n -t {SCENARIO_DIR}/{}.jmx -l {RESULTS_DIR}/{}",
            r.run.scenario, r.file_name
        );
    }
    out.push_str("```\n\n");
}

fn push_results_table(out: &mut String, batch: &BatchReport) {
    out.push_str("## Results by run\n\n");
    out.push_str("| Scenario | Variant | RPS | p50 (ms) | p95 (ms) | p99 (ms) | Err % |\n");
    out.push_str("|---|---:|---:|---:|---:|---:|---:|\n");
    for r in &batch.reports {
        let s = &r.summary;
        let _ = writeln!(
            out,
            "| {} | {} | {:.2} | {} | {} | {} | {:.2} |",
            md_cell(&r.run.scenario_title()),
            md_cell(&r.run.variant),
            s.rps,
            fmt_ms(s.p50),
            fmt_ms(s.p95),
            fmt_ms(s.p99),
            s.error_pct,
        );
    }
    out.push('\n');
}

fn push_endpoint_table(out: &mut String, report: &FileReport) {
    let _ = writeln!(out, "## Endpoints: {}\n", report.file_name);
    out.push_str("| Endpoint | Requests | RPS | p50 (ms) | p95 (ms) | p99 (ms) | Err % |\n");
    out.push_str("|---|---:|---:|---:|---:|---:|---:|\n");
    for (label, ep) in &report.endpoints {
        let label = if label.is_empty() {
            "(no label)".to_string()
        } else {
            md_cell(label)
        };
        let _ = writeln!(
            out,
            "| {} | {} | {:.2} | {} | {} | {} | {:.2} |",
            label,
            ep.total,
            ep.rps,
            fmt_ms(ep.p50),
            fmt_ms(ep.p95),
            fmt_ms(ep.p99),
            ep.error_pct,
        );
    }
    out.push('\n');
}

fn push_incidents(out: &mut String, batch: &BatchReport) {
    out.push_str("## Incidents\n\n");
    let mut rows = batch.with_errors().peekable();
    if rows.peek().is_none() {
        out.push_str("No failed requests.\n\n");
        return;
    }
    out.push_str("| Run | Variant | Errors | Err % |\n");
    out.push_str("|---|---|---:|---:|\n");
    for r in rows {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.2} |",
            md_cell(&r.file_name),
            md_cell(&r.run.variant),
            r.summary.errors,
            r.summary.error_pct,
        );
    }
    out.push('\n');
}

fn push_failed(out: &mut String, batch: &BatchReport) {
    if batch.failed.is_empty() {
        return;
    }
    out.push_str("## Files that failed to parse\n\n");
    for f in &batch.failed {
        let _ = writeln!(out, "- `{}`: {}", f.file_name, f.error);
    }
    out.push('\n');
}

fn fmt_ms(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Escape a value for use inside a Markdown table cell.
fn md_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
