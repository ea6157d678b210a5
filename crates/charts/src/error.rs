//! Error types for chart aggregations.

/// Errors that can occur while building a chart.
///
/// Degenerate data (empty subsets, too few distinct values) is not an
/// error; those cases come back as a degraded [`crate::ChartOutcome`]
/// with a warning. Errors here mean the request itself was unusable.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A required column is absent from the subset.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Invalid caller-supplied parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numeric kernel error.
    #[error("math error: {0}")]
    Math(#[from] filinglens_math::MathError),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ChartError::InvalidParameter("unknown sentiment column".to_string());
        assert!(err.to_string().contains("unknown sentiment column"));
    }
}
