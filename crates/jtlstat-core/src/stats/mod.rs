//! Statistics engine: percentiles, per-file aggregation and per-label breakdown.

pub mod aggregator;
pub mod endpoint;
pub mod percentile;

pub use aggregator::{window_seconds, FileSummary};
pub use endpoint::{endpoint_breakdown, EndpointSummary};
pub use percentile::{percentile, percentiles, round2, LatencyPercentiles, DEFAULT_PERCENTILES};
