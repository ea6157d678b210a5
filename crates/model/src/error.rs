//! Error types for model fitting and prediction.

use thiserror::Error;

/// Errors raised while fitting or querying the prediction model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No usable training rows remained after dropping missing values.
    #[error("no complete training rows available")]
    InsufficientData,

    /// A required column is absent from the training frame.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A query vector's length does not match the fitted feature count.
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Feature count the model was fitted with.
        expected: usize,
        /// Feature count supplied by the caller.
        actual: usize,
    },

    /// An underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}
