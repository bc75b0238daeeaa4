use serde::Serialize;

use crate::jtl::{Record, ResultSet};
use crate::stats::percentile::{round2, LatencyPercentiles};

// ---------------------------------------------------------------------------
// SampleAccumulator — shared by file and endpoint aggregation
// ---------------------------------------------------------------------------

/// Running counts and latency samples for a group of records.
#[derive(Debug, Clone, Default)]
pub(crate) struct SampleAccumulator {
    pub(crate) total: u64,
    pub(crate) successes: u64,
    pub(crate) elapsed: Vec<i64>,
}

impl SampleAccumulator {
    pub(crate) fn record(&mut self, record: &Record) {
        self.total += 1;
        if record.success {
            self.successes += 1;
        }
        self.elapsed.push(record.elapsed_ms);
    }

    pub(crate) fn errors(&self) -> u64 {
        self.total - self.successes
    }

    /// Error share in percent, 0 for an empty group.
    pub(crate) fn error_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round2(self.errors() as f64 * 100.0 / self.total as f64)
    }

    pub(crate) fn rps(&self, window_s: f64) -> f64 {
        round2(self.total as f64 / window_s)
    }

    pub(crate) fn latency(&self) -> LatencyPercentiles {
        LatencyPercentiles::from_samples(&self.elapsed)
    }
}

/// Observed test window in seconds: `max(timestamp) - min(timestamp)`.
///
/// A zero or negative span (single record, identical timestamps) is clamped to
/// a nominal one-second window so throughput stays finite and positive. The
/// span is taken in `i128` so extreme timestamps cannot overflow.
pub fn window_seconds(records: &[Record]) -> f64 {
    let min = records.iter().map(|r| r.timestamp_ms).min();
    let max = records.iter().map(|r| r.timestamp_ms).max();
    match (min, max) {
        (Some(min), Some(max)) if max > min => (max as i128 - min as i128) as f64 / 1000.0,
        _ => 1.0,
    }
}

// ---------------------------------------------------------------------------
// FileSummary
// ---------------------------------------------------------------------------

/// Aggregate statistics over every record of one result file.
///
/// Serialize-only: the unrounded window is not part of the output, so a
/// summary can only be built from records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileSummary {
    pub total: u64,
    pub successes: u64,
    pub errors: u64,
    /// Errors as a percentage of `total`, two decimals.
    pub error_pct: f64,
    /// Requests per second over the file's window.
    pub rps: f64,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    /// Observed window, rounded to two decimals for display.
    pub duration_s: f64,
    pub min_ms: i64,
    pub max_ms: i64,
    pub mean_ms: f64,
    /// Unrounded window; the denominator for endpoint throughput.
    #[serde(skip)]
    window_s: f64,
}

impl FileSummary {
    /// Summarise a result file. Returns `None` when it holds no records.
    pub fn from_records(set: &ResultSet) -> Option<Self> {
        let records = set.records();
        if records.is_empty() {
            return None;
        }

        let mut acc = SampleAccumulator::default();
        for record in records {
            acc.record(record);
        }

        let window_s = window_seconds(records);
        let latency = acc.latency();
        let sum: i128 = acc.elapsed.iter().map(|&e| e as i128).sum();

        Some(Self {
            total: acc.total,
            successes: acc.successes,
            errors: acc.errors(),
            error_pct: acc.error_pct(),
            rps: acc.rps(window_s),
            p50: latency.p50,
            p95: latency.p95,
            p99: latency.p99,
            duration_s: round2(window_s),
            min_ms: acc.elapsed.iter().copied().min().unwrap_or_default(),
            max_ms: acc.elapsed.iter().copied().max().unwrap_or_default(),
            mean_ms: round2(sum as f64 / acc.total as f64),
            window_s,
        })
    }

    /// The unrounded window (s) that `rps` was computed against.
    pub fn window_seconds(&self) -> f64 {
        self.window_s
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
