//! Summary metrics over a filtered subset.

use serde::{Deserialize, Serialize};

/// Headline metrics for the currently filtered subset.
///
/// An empty subset reports zero for every field rather than NaN, so the
/// presentation layer never has to special-case it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Number of filings in the subset.
    pub total_filings: usize,
    /// Mean complexity score.
    pub avg_ccti: f64,
    /// Mean 30-day excess return.
    pub avg_excess_ret: f64,
    /// Mean 30-day volatility.
    pub avg_vol: f64,
}
