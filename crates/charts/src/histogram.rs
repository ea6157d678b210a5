//! Distribution histogram over a numeric column.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartOutcome, extract};

/// Smallest supported bin count.
pub const MIN_BINS: usize = 10;

/// Largest supported bin count.
pub const MAX_BINS: usize = 100;

/// One histogram bar: the bin's lower edge as a label, and its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower edge of the bin, formatted to two decimals.
    pub bin: String,
    /// Number of observations in the bin.
    pub count: u64,
}

/// Partition a numeric column into equal-width bins over its observed
/// range.
///
/// `bins` is clamped to `[MIN_BINS, MAX_BINS]`. The sum of the returned
/// counts equals the number of non-missing values in the column. An empty
/// subset degrades to an empty series with a warning.
///
/// # Errors
/// Returns [`ChartError::MissingColumn`] when `column` is absent.
pub fn histogram(
    frame: &DataFrame,
    column: &str,
    bins: usize,
) -> Result<ChartOutcome<Vec<HistogramBin>>, ChartError> {
    let bins = bins.clamp(MIN_BINS, MAX_BINS);

    let values: Vec<f64> =
        extract::f64_column(frame, column)?.into_iter().flatten().filter(|v| v.is_finite()).collect();

    if values.is_empty() {
        return Ok(ChartOutcome::degraded(
            Vec::new(),
            format!("no observations of {column} in the current selection"),
        ));
    }

    let hist = filinglens_math::histogram(&values, bins)?;
    let bars = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin { bin: format!("{:.2}", hist.edges[i]), count })
        .collect();

    Ok(ChartOutcome::ok(bars))
}
