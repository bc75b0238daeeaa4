use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::jtl::ResultSet;
use crate::stats::aggregator::SampleAccumulator;

/// Statistics for the records of one label within a result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointSummary {
    pub total: u64,
    pub successes: u64,
    pub errors: u64,
    pub error_pct: f64,
    /// This label's share of the parent file's throughput.
    pub rps: f64,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

/// Group `set` by exact label and summarise each group.
///
/// `window_s` is the parent file's window: endpoint throughput is measured
/// against the whole test duration, not the label's own active span. An empty
/// label forms its own group. The map is ordered by label.
pub fn endpoint_breakdown(set: &ResultSet, window_s: f64) -> BTreeMap<String, EndpointSummary> {
    let mut groups: BTreeMap<String, SampleAccumulator> = BTreeMap::new();
    for record in set.records() {
        groups.entry(record.label.clone()).or_default().record(record);
    }

    groups
        .into_iter()
        .map(|(label, acc)| {
            let latency = acc.latency();
            let summary = EndpointSummary {
                total: acc.total,
                successes: acc.successes,
                errors: acc.errors(),
                error_pct: acc.error_pct(),
                rps: acc.rps(window_s),
                p50: latency.p50,
                p95: latency.p95,
                p99: latency.p99,
            };
            (label, summary)
        })
        .collect()
}
