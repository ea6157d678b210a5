//! Equal-width and quantile binning.

use crate::MathError;

/// Histogram of a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` entries.
    pub edges: Vec<f64>,
    /// Per-bin counts.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Total number of observations across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Compute `n + 1` equal-width edges spanning `[min, max]`.
///
/// A degenerate range (`min == max`) still yields `n + 1` edges, all
/// equal, and every value lands in the first bin.
#[must_use]
pub fn equal_width_edges(min: f64, max: f64, n: usize) -> Vec<f64> {
    let width = (max - min) / n as f64;
    (0..=n).map(|i| min + width * i as f64).collect()
}

/// Map a value to its equal-width bin over `[min, max]` split into `n` bins.
///
/// The final bin is closed on the right so `max` itself is counted.
/// Returns `None` for NaN values or values outside the range.
#[must_use]
pub fn bin_index(value: f64, min: f64, max: f64, n: usize) -> Option<usize> {
    if n == 0 || value.is_nan() || value < min || value > max {
        return None;
    }
    let range = max - min;
    if range <= 0.0 {
        return Some(0);
    }
    let idx = ((value - min) / range * n as f64) as usize;
    Some(idx.min(n - 1))
}

/// Partition the finite values of a slice into `bins` equal-width bins
/// over the observed range.
///
/// NaN and infinite values are ignored; the sum of the returned counts
/// equals the number of finite inputs.
///
/// # Errors
/// Returns [`MathError::InvalidParameter`] for zero bins and
/// [`MathError::EmptyData`] when no finite values remain.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram, MathError> {
    if bins == 0 {
        return Err(MathError::InvalidParameter("bins must be positive".to_string()));
    }

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(MathError::EmptyData);
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut counts = vec![0u64; bins];
    for &v in &finite {
        if let Some(i) = bin_index(v, min, max, bins) {
            counts[i] += 1;
        }
    }

    Ok(Histogram { edges: equal_width_edges(min, max, bins), counts })
}

/// Compute equal-count (quantile) bin edges, dropping duplicates.
///
/// Edges are the `0/q, 1/q, ..., q/q` quantiles of the finite values
/// under linear interpolation. Low-cardinality inputs collapse duplicate
/// edges, so fewer than `q` bins may come back; callers inspect
/// `edges.len() - 1` for the effective bin count.
///
/// # Errors
/// Returns [`MathError::InvalidParameter`] for zero quantiles and
/// [`MathError::EmptyData`] when no finite values remain.
pub fn quantile_edges(values: &[f64], q: usize) -> Result<Vec<f64>, MathError> {
    if q == 0 {
        return Err(MathError::InvalidParameter("quantile count must be positive".to_string()));
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(MathError::EmptyData);
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mut edges = Vec::with_capacity(q + 1);
    for i in 0..=q {
        let pos = (n - 1) as f64 * i as f64 / q as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        edges.push(sorted[lo] * (1.0 - frac) + sorted[hi] * frac);
    }

    edges.dedup();
    Ok(edges)
}

/// Map a value to its quantile bin given edges from [`quantile_edges`].
///
/// Bins are closed on the left, the last bin closed on both sides.
/// Out-of-range values clamp into the nearest bin, matching how quantile
/// partitions assign the minimum and maximum observations.
#[must_use]
pub fn quantile_bin_index(value: f64, edges: &[f64]) -> Option<usize> {
    if value.is_nan() || edges.len() < 2 {
        return None;
    }
    let n_bins = edges.len() - 1;
    let mut idx = 0;
    for (i, window) in edges.windows(2).enumerate() {
        if value >= window[0] {
            idx = i;
        }
    }
    Some(idx.min(n_bins - 1))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn histogram_counts_sum_to_finite_count() {
        let values = [1.0, 2.0, f64::NAN, 3.0, 4.0, f64::INFINITY, 5.0];
        let hist = histogram(&values, 10).unwrap();
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.counts.len(), 10);
        assert_eq!(hist.edges.len(), 11);
    }

    #[rstest]
    #[case(10)]
    #[case(37)]
    #[case(100)]
    fn histogram_counts_sum_for_any_bin_count(#[case] bins: usize) {
        let values: Vec<f64> = (0..500).map(|i| (i as f64).sin() * 10.0).collect();
        let hist = histogram(&values, bins).unwrap();
        assert_eq!(hist.total(), 500);
        assert_eq!(hist.counts.len(), bins);
    }

    #[test]
    fn histogram_max_value_lands_in_last_bin() {
        let hist = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn histogram_single_value_degenerates_to_first_bin() {
        let hist = histogram(&[7.0, 7.0, 7.0], 5).unwrap();
        assert_eq!(hist.counts[0], 3);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn histogram_rejects_empty() {
        assert!(matches!(histogram(&[f64::NAN], 10), Err(MathError::EmptyData)));
    }

    #[test]
    fn equal_width_edges_span_range() {
        let edges = equal_width_edges(0.0, 10.0, 5);
        assert_eq!(edges.len(), 6);
        assert_relative_eq!(edges[0], 0.0);
        assert_relative_eq!(edges[5], 10.0);
        assert_relative_eq!(edges[1], 2.0);
    }

    #[test]
    fn quantile_edges_deciles_of_uniform() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let edges = quantile_edges(&values, 10).unwrap();
        assert_eq!(edges.len(), 11);
        assert_relative_eq!(edges[0], 0.0);
        assert_relative_eq!(edges[5], 50.0);
        assert_relative_eq!(edges[10], 100.0);
    }

    #[test]
    fn quantile_edges_drop_duplicates_on_low_cardinality() {
        // Two distinct values cannot support ten deciles.
        let values = [1.0, 1.0, 1.0, 1.0, 2.0];
        let edges = quantile_edges(&values, 10).unwrap();
        assert!(edges.len() < 11);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn quantile_bin_index_assigns_extremes() {
        let edges = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(quantile_bin_index(0.0, &edges), Some(0));
        assert_eq!(quantile_bin_index(3.0, &edges), Some(2));
        assert_eq!(quantile_bin_index(1.5, &edges), Some(1));
        // Out-of-range clamps rather than dropping.
        assert_eq!(quantile_bin_index(-1.0, &edges), Some(0));
        assert_eq!(quantile_bin_index(9.0, &edges), Some(2));
        assert_eq!(quantile_bin_index(f64::NAN, &edges), None);
    }
}
