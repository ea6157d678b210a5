//! Error types for the dataset store.

/// Errors that can occur while loading or querying the filing dataset.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The source data file does not exist. Fatal at startup.
    #[error("dataset file not found: {0}")]
    SourceMissing(String),

    /// A column the store requires is absent from the source table.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// The dataset contains no rows.
    #[error("dataset is empty")]
    Empty,

    /// A designated numeric column has no parseable values, so the
    /// median is undefined and imputation cannot complete. Fatal at
    /// startup.
    #[error("column {0} has no usable numeric values")]
    ColumnUnusable(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
