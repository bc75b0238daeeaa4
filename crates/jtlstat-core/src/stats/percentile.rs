use serde::{Deserialize, Serialize};

/// Percentiles reported for every file and endpoint.
pub const DEFAULT_PERCENTILES: [f64; 3] = [50.0, 95.0, 99.0];

/// Round to two decimal places, sending exact halves to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Interpolated percentile of an already sorted slice.
///
/// Uses linear interpolation between the two closest ranks, so `p = 50` on an
/// even-length slice is the midpoint of the two middle values. `p` is clamped
/// to `[0, 100]`. Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 100.0);
    let k = (sorted.len() - 1) as f64 * (p / 100.0);
    let f = k.floor();
    let c = k.ceil();
    let value = if f == c {
        sorted[f as usize]
    } else {
        sorted[f as usize] * (c - k) + sorted[c as usize] * (k - f)
    };
    Some(round2(value))
}

/// Evaluate every target percentile over `samples`, which need not be sorted.
///
/// The result keeps the order of `targets`; each value is `None` when there
/// are no samples.
pub fn percentiles(samples: &[i64], targets: &[f64]) -> Vec<(f64, Option<f64>)> {
    let mut sorted: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    sorted.sort_by(f64::total_cmp);
    targets
        .iter()
        .map(|&p| (p, percentile(&sorted, p)))
        .collect()
}

/// The p50 / p95 / p99 triple for a set of latency samples (ms).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LatencyPercentiles {
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

impl LatencyPercentiles {
    pub fn from_samples(samples: &[i64]) -> Self {
        let values = percentiles(samples, &DEFAULT_PERCENTILES);
        Self {
            p50: values[0].1,
            p95: values[1].1,
            p99: values[2].1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(f64::total_cmp);
        v
    }

    // -----------------------------------------------------------------------
    // percentile
    // -----------------------------------------------------------------------

    #[test]
    fn one_to_five_interpolates() {
        let data = sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(percentile(&data, 50.0), Some(3.0));
        assert_eq!(percentile(&data, 95.0), Some(4.8));
        assert_eq!(percentile(&data, 99.0), Some(4.96));
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let data = [250.0];
        for p in [0.0, 1.0, 50.0, 95.0, 99.0, 100.0] {
            assert_eq!(percentile(&data, p), Some(250.0));
        }
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn even_length_median_is_midpoint() {
        let data = sorted(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(percentile(&data, 50.0), Some(25.0));
    }

    #[test]
    fn bounds_are_min_and_max() {
        let data = sorted(&[7.0, 3.0, 9.0]);
        assert_eq!(percentile(&data, 0.0), Some(3.0));
        assert_eq!(percentile(&data, 100.0), Some(9.0));
    }

    #[test]
    fn out_of_range_target_is_clamped() {
        let data = sorted(&[1.0, 2.0]);
        assert_eq!(percentile(&data, 150.0), Some(2.0));
        assert_eq!(percentile(&data, -5.0), Some(1.0));
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        // k = 2 * 0.333 = 0.666 -> 0 * 0.334 + 1 * 0.666
        let data = [0.0, 1.0, 2.0];
        assert_eq!(percentile(&data, 33.3), Some(0.67));
    }

    // -----------------------------------------------------------------------
    // percentiles
    // -----------------------------------------------------------------------

    #[test]
    fn percentiles_sorts_its_input() {
        let values = percentiles(&[5, 1, 4, 2, 3], &[50.0, 95.0]);
        assert_eq!(values, vec![(50.0, Some(3.0)), (95.0, Some(4.8))]);
    }

    #[test]
    fn percentiles_of_empty_is_none_for_every_target() {
        let values = percentiles(&[], &DEFAULT_PERCENTILES);
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn percentiles_handles_duplicates_zero_and_negatives() {
        let values = percentiles(&[0, -10, 0, 0], &[0.0, 50.0, 100.0]);
        assert_eq!(
            values,
            vec![(0.0, Some(-10.0)), (50.0, Some(0.0)), (100.0, Some(0.0))]
        );
    }

    // -----------------------------------------------------------------------
    // LatencyPercentiles
    // -----------------------------------------------------------------------

    #[test]
    fn latency_percentiles_from_samples() {
        let lp = LatencyPercentiles::from_samples(&[1, 2, 3, 4, 5]);
        assert_eq!(lp.p50, Some(3.0));
        assert_eq!(lp.p95, Some(4.8));
        assert_eq!(lp.p99, Some(4.96));
    }

    #[test]
    fn latency_percentiles_empty_is_all_none() {
        assert_eq!(
            LatencyPercentiles::from_samples(&[]),
            LatencyPercentiles::default()
        );
    }

    // -----------------------------------------------------------------------
    // round2
    // -----------------------------------------------------------------------

    #[test]
    fn round2_sends_halves_to_even() {
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(3.0), 3.0);
    }
}
