//! Sentiment × complexity heatmap of mean excess return.

use filinglens_math::{bin_index, quantile_bin_index, quantile_edges};
use filinglens_primitives::schema;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartOutcome, extract};

/// Bins per axis. The grid is always exactly this size.
pub const HEATMAP_BINS: usize = 10;

/// Dense heatmap matrix with positional decile labels.
///
/// `z[row][col]` is the mean excess return for (sentiment decile `row`,
/// complexity bin `col`). Cells with no observations hold zero; an empty
/// cell is indistinguishable from a true zero-mean cell, a precision
/// loss inherited from the design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// Mean excess return per cell, 10×10.
    pub z: Vec<Vec<f64>>,
    /// Complexity-axis labels ("Decile 1".."Decile 10").
    pub x: Vec<String>,
    /// Sentiment-axis labels ("Decile 1".."Decile 10").
    pub y: Vec<String>,
}

impl HeatmapGrid {
    fn zeros() -> Self {
        let labels: Vec<String> = (1..=HEATMAP_BINS).map(|i| format!("Decile {i}")).collect();
        Self { z: vec![vec![0.0; HEATMAP_BINS]; HEATMAP_BINS], x: labels.clone(), y: labels }
    }
}

/// Cross-tabulate mean excess return over complexity bins × sentiment
/// deciles.
///
/// Complexity is split into 10 equal-width bins over its observed range;
/// the sentiment column into up to 10 equal-count bins with duplicate
/// quantile edges dropped. Subsets too degenerate to bin (empty, or a
/// sentiment column with fewer than 2 distinct values) degrade to an
/// all-zero grid with a warning.
///
/// # Errors
/// Returns [`ChartError::InvalidParameter`] for a column outside the
/// sentiment set, or [`ChartError::MissingColumn`] when a required
/// column is absent.
pub fn sentiment_heatmap(
    frame: &DataFrame,
    sentiment_column: &str,
) -> Result<ChartOutcome<HeatmapGrid>, ChartError> {
    if !schema::SENTIMENT_COLUMNS.contains(&sentiment_column) {
        return Err(ChartError::InvalidParameter(format!(
            "{sentiment_column} is not a sentiment column"
        )));
    }

    let ccti = extract::f64_column(frame, schema::CCTI)?;
    let sentiment = extract::f64_column(frame, sentiment_column)?;
    let excess = extract::f64_column(frame, schema::EXCESS_RET)?;

    // Keep rows where all three values are present and finite.
    let rows: Vec<(f64, f64, f64)> = ccti
        .into_iter()
        .zip(sentiment)
        .zip(excess)
        .filter_map(|((c, s), e)| match (c, s, e) {
            (Some(c), Some(s), Some(e)) if c.is_finite() && s.is_finite() && e.is_finite() => {
                Some((c, s, e))
            }
            _ => None,
        })
        .collect();

    if rows.is_empty() {
        return Ok(ChartOutcome::degraded(
            HeatmapGrid::zeros(),
            "no observations in the current selection",
        ));
    }

    let sentiment_values: Vec<f64> = rows.iter().map(|r| r.1).collect();
    let edges = quantile_edges(&sentiment_values, HEATMAP_BINS)?;
    if edges.len() < 2 {
        return Ok(ChartOutcome::degraded(
            HeatmapGrid::zeros(),
            format!("not enough distinct {sentiment_column} values to form deciles"),
        ));
    }

    let ccti_min = rows.iter().map(|r| r.0).fold(f64::INFINITY, f64::min);
    let ccti_max = rows.iter().map(|r| r.0).fold(f64::NEG_INFINITY, f64::max);

    let mut sums = vec![vec![0.0; HEATMAP_BINS]; HEATMAP_BINS];
    let mut counts = vec![vec![0u64; HEATMAP_BINS]; HEATMAP_BINS];

    for (c, s, e) in rows {
        let Some(col_idx) = bin_index(c, ccti_min, ccti_max, HEATMAP_BINS) else { continue };
        let Some(row_idx) = quantile_bin_index(s, &edges) else { continue };
        sums[row_idx][col_idx] += e;
        counts[row_idx][col_idx] += 1;
    }

    let mut grid = HeatmapGrid::zeros();
    for r in 0..HEATMAP_BINS {
        for c in 0..HEATMAP_BINS {
            if counts[r][c] > 0 {
                grid.z[r][c] = sums[r][c] / counts[r][c] as f64;
            }
        }
    }

    Ok(ChartOutcome::ok(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(n: usize) -> DataFrame {
        let ccti: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let negative: Vec<f64> = (0..n).map(|i| (i as f64 * 7.3) % 13.0).collect();
        let excess: Vec<f64> = (0..n).map(|i| (i as f64 / n as f64) - 0.5).collect();
        df! {
            schema::CCTI => ccti,
            schema::NEGATIVE => negative,
            schema::EXCESS_RET => excess,
        }
        .unwrap()
    }

    #[test]
    fn grid_is_always_ten_by_ten() {
        let outcome = sentiment_heatmap(&frame(500), schema::NEGATIVE).unwrap();
        assert_eq!(outcome.data.z.len(), 10);
        assert!(outcome.data.z.iter().all(|row| row.len() == 10));
        assert_eq!(outcome.data.x.len(), 10);
        assert_eq!(outcome.data.y.len(), 10);
    }

    #[test]
    fn grid_is_ten_by_ten_even_for_an_empty_subset() {
        let outcome = sentiment_heatmap(&frame(0), schema::NEGATIVE).unwrap();
        assert!(outcome.is_degraded());
        assert_eq!(outcome.data.z.len(), 10);
        assert!(outcome.data.z.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn constant_sentiment_degrades_with_warning() {
        let df = df! {
            schema::CCTI => &[1.0, 2.0, 3.0, 4.0],
            schema::NEGATIVE => &[5.0, 5.0, 5.0, 5.0],
            schema::EXCESS_RET => &[0.1, 0.2, 0.3, 0.4],
        }
        .unwrap();
        let outcome = sentiment_heatmap(&df, schema::NEGATIVE).unwrap();
        assert!(outcome.is_degraded());
        assert!(outcome.warning.as_deref().unwrap().contains("Negative"));
    }

    #[test]
    fn cell_means_are_correct_for_a_small_grid() {
        // All sentiment mass in the low decile, complexity split low/high.
        let df = df! {
            schema::CCTI => &[0.0, 0.0, 10.0, 10.0],
            schema::NEGATIVE => &[0.0, 1.0, 2.0, 3.0],
            schema::EXCESS_RET => &[0.1, 0.3, -0.2, -0.4],
        }
        .unwrap();
        let outcome = sentiment_heatmap(&df, schema::NEGATIVE).unwrap();
        // Lowest sentiment decile, lowest complexity bin: mean of 0.1.
        assert!((outcome.data.z[0][0] - 0.1).abs() < 1e-12);
        // Highest complexity bin holds -0.2 and -0.4 in their deciles.
        let col9: f64 = outcome.data.z.iter().map(|row| row[9]).sum();
        assert!((col9 - (-0.6)).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_sentiment_column() {
        assert!(matches!(
            sentiment_heatmap(&frame(10), schema::CCTI),
            Err(ChartError::InvalidParameter(_))
        ));
    }

    #[test]
    fn labels_are_positional_deciles() {
        let outcome = sentiment_heatmap(&frame(100), schema::NEGATIVE).unwrap();
        assert_eq!(outcome.data.x[0], "Decile 1");
        assert_eq!(outcome.data.y[9], "Decile 10");
    }

    #[test]
    fn grid_serializes_inside_the_outcome_envelope() {
        let outcome = sentiment_heatmap(&frame(100), schema::NEGATIVE).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["data"].get("z").is_some());
        assert!(json["data"].get("x").is_some());
        assert!(json["data"].get("y").is_some());
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn heatmap_is_deterministic() {
        let f = frame(300);
        let a = sentiment_heatmap(&f, schema::NEGATIVE).unwrap();
        let b = sentiment_heatmap(&f, schema::NEGATIVE).unwrap();
        assert_eq!(a, b);
    }
}
