//! Typed success-with-warning result for aggregations.

use serde::{Deserialize, Serialize};

/// An aggregation result that may have degraded gracefully.
///
/// Callers can distinguish "no data" from "error": degenerate inputs
/// still produce a well-shaped `data` payload, with `warning` explaining
/// what was missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOutcome<T> {
    /// The chart payload.
    pub data: T,
    /// Present when the result degraded (empty subset, too few distinct
    /// values, display cap applied).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> ChartOutcome<T> {
    /// A full-fidelity result.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self { data, warning: None }
    }

    /// A degraded result with a caller-visible explanation.
    #[must_use]
    pub fn degraded(data: T, warning: impl Into<String>) -> Self {
        Self { data, warning: Some(warning.into()) }
    }

    /// Whether this result degraded.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}
