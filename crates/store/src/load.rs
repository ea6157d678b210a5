//! Dataset loading, coercion, and imputation.

use std::path::Path;

use chrono::Duration;
use filinglens_primitives::{Date, schema};
use polars::prelude::*;

use crate::StoreError;

/// In-memory filing dataset, loaded once per process.
///
/// Construction runs the full preparation pipeline: filing-date parsing,
/// year-month derivation, numeric coercion (invalid values become
/// missing), and whole-column median imputation. After construction no
/// designated numeric column contains missing values, and the frame is
/// never mutated again; all queries return new frames.
#[derive(Debug, Clone)]
pub struct FilingStore {
    frame: DataFrame,
}

impl FilingStore {
    /// Load the dataset from a CSV file.
    ///
    /// # Errors
    /// Returns [`StoreError::SourceMissing`] when the file does not
    /// exist; this is fatal and the caller must not continue serving.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::SourceMissing(path.display().to_string()));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        Self::from_frame(df)
    }

    /// Build a store from an already materialized frame, running the same
    /// preparation pipeline as [`FilingStore::load`].
    ///
    /// # Errors
    /// Returns [`StoreError::MissingColumn`] when the filing-date column
    /// is absent.
    pub fn from_frame(df: DataFrame) -> Result<Self, StoreError> {
        Ok(Self { frame: prepare(df)? })
    }

    /// The prepared dataset.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of filings in the dataset.
    #[must_use]
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Whether the optional market-regime column is present.
    #[must_use]
    pub fn has_market_condition(&self) -> bool {
        self.has_column(schema::MARKET_CONDITION)
    }

    pub(crate) fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_names().iter().any(|c| c.as_str() == name)
    }

    /// Earliest and latest filing dates in the dataset.
    ///
    /// # Errors
    /// Returns [`StoreError::Empty`] when the dataset has no rows.
    pub fn date_bounds(&self) -> Result<(Date, Date), StoreError> {
        let bounds = self
            .frame
            .clone()
            .lazy()
            .select([
                col(schema::FILING_DATE).min().alias("min_date"),
                col(schema::FILING_DATE).max().alias("max_date"),
            ])
            .collect()?;

        let min = date_from_any(bounds.column("min_date")?.get(0)?);
        let max = date_from_any(bounds.column("max_date")?.get(0)?);

        match (min, max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(StoreError::Empty),
        }
    }

    /// Distinct SIC codes, sorted ascending. Empty when the column is
    /// absent.
    ///
    /// # Errors
    /// Returns a polars error if the column cannot be read.
    pub fn unique_sics(&self) -> Result<Vec<f64>, StoreError> {
        if !self.has_column(schema::SIC) {
            return Ok(Vec::new());
        }

        let distinct = self
            .frame
            .clone()
            .lazy()
            .select([col(schema::SIC).cast(DataType::Float64).drop_nulls().unique()])
            .collect()?;

        let mut sics: Vec<f64> =
            distinct.column(schema::SIC)?.f64()?.into_no_null_iter().collect();
        sics.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(sics)
    }

    /// Distinct form types, sorted ascending. Empty when the column is
    /// absent.
    ///
    /// # Errors
    /// Returns a polars error if the column cannot be read.
    pub fn unique_forms(&self) -> Result<Vec<String>, StoreError> {
        if !self.has_column(schema::FORM_TYPE) {
            return Ok(Vec::new());
        }

        let distinct = self
            .frame
            .clone()
            .lazy()
            .select([col(schema::FORM_TYPE).drop_nulls().unique()])
            .collect()?;

        let mut forms: Vec<String> = distinct
            .column(schema::FORM_TYPE)?
            .str()?
            .into_no_null_iter()
            .map(str::to_string)
            .collect();
        forms.sort();
        Ok(forms)
    }

    /// Selectable market-regime flags: `[0, 1]` when the regime column
    /// exists, empty otherwise.
    #[must_use]
    pub fn market_conditions(&self) -> Vec<i64> {
        if self.has_market_condition() { vec![0, 1] } else { Vec::new() }
    }
}

/// Days between the Unix epoch and `date`, as polars stores `Date`.
pub(crate) fn days_since_epoch(date: Date) -> i32 {
    (date - Date::default()).num_days() as i32
}

fn date_from_any(value: AnyValue<'_>) -> Option<Date> {
    match value {
        AnyValue::Date(days) => Date::default().checked_add_signed(Duration::days(i64::from(days))),
        _ => None,
    }
}

fn prepare(df: DataFrame) -> Result<DataFrame, StoreError> {
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !names.iter().any(|n| n == schema::FILING_DATE) {
        return Err(StoreError::MissingColumn(schema::FILING_DATE.to_string()));
    }

    let date_is_string = df.column(schema::FILING_DATE)?.dtype() == &DataType::String;

    let mut lf = df.lazy();
    if date_is_string {
        lf = lf.with_column(col(schema::FILING_DATE).str().to_date(StrptimeOptions {
            format: Some("%Y-%m-%d".into()),
            strict: false,
            ..Default::default()
        }));
    }

    // Year-month grouping key, kept as a string for serialization.
    lf = lf.with_column(
        col(schema::FILING_DATE).dt().strftime("%Y-%m").alias(schema::YEAR_MONTH),
    );

    let numeric_present: Vec<&str> = schema::NUMERIC_COLUMNS
        .iter()
        .copied()
        .filter(|c| names.iter().any(|n| n == c))
        .collect();

    // Coerce to f64; unparseable values and NaN both become null.
    let coerced: Vec<Expr> = numeric_present
        .iter()
        .map(|&c| col(c).cast(DataType::Float64).fill_nan(lit(NULL)).alias(c))
        .collect();
    if !coerced.is_empty() {
        lf = lf.with_columns(coerced);
    }

    // Impute with the whole-column median, computed once over the full
    // dataset, never per filtered subset.
    let imputed: Vec<Expr> =
        numeric_present.iter().map(|&c| col(c).fill_null(col(c).median()).alias(c)).collect();
    if !imputed.is_empty() {
        lf = lf.with_columns(imputed);
    }

    let frame = lf.collect()?;

    // A column with zero parseable values has a null median, leaving its
    // nulls in place. Refuse the load rather than serve such a frame.
    for &c in &numeric_present {
        if frame.column(c)?.null_count() > 0 {
            return Err(StoreError::ColumnUnusable(c.to_string()));
        }
    }

    Ok(frame)
}
