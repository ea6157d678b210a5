//! Column extraction helpers shared by the chart builders.

use polars::prelude::*;

use crate::ChartError;

/// Extract a float column as `Option<f64>` per row, erroring with the
/// column name when absent.
pub(crate) fn f64_column(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ChartError> {
    if !has_column(frame, name) {
        return Err(ChartError::MissingColumn(name.to_string()));
    }
    Ok(frame.column(name)?.f64()?.into_iter().collect())
}

/// Extract a string column as owned values, empty string for nulls.
pub(crate) fn str_column(frame: &DataFrame, name: &str) -> Result<Vec<String>, ChartError> {
    if !has_column(frame, name) {
        return Err(ChartError::MissingColumn(name.to_string()));
    }
    Ok(frame
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string).unwrap_or_default())
        .collect())
}

pub(crate) fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame.get_column_names().iter().any(|c| c.as_str() == name)
}
