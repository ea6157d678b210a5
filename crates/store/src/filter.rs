//! Boolean-mask filtering over the cached dataset.

use filinglens_primitives::{FilterSpec, SummaryMetrics, schema};
use polars::prelude::*;

use crate::load::days_since_epoch;
use crate::{FilingStore, StoreError};

impl FilingStore {
    /// Produce the subset of filings matching `spec`.
    ///
    /// Each constrained dimension narrows the mask: filing date within
    /// `[start, end]` inclusive, SIC code in the selection, form type in
    /// the selection, regime flag in the selection (applied only when the
    /// regime column exists). Unset or emptied selections match
    /// everything. An impossible filter yields a zero-row frame rather
    /// than an error; the cached dataset is never mutated.
    ///
    /// # Errors
    /// Returns a polars error if the mask cannot be evaluated.
    pub fn filter(&self, spec: &FilterSpec) -> Result<DataFrame, StoreError> {
        let mut lf = self.frame().clone().lazy();

        if let Some(start) = spec.start_date {
            lf = lf.filter(
                col(schema::FILING_DATE)
                    .gt_eq(lit(days_since_epoch(start)).cast(DataType::Date)),
            );
        }
        if let Some(end) = spec.end_date {
            lf = lf.filter(
                col(schema::FILING_DATE).lt_eq(lit(days_since_epoch(end)).cast(DataType::Date)),
            );
        }

        if let Some(sics) = spec.sic_selection() {
            lf = lf.filter(
                col(schema::SIC)
                    .cast(DataType::Float64)
                    .is_in(lit(Series::new("sics".into(), sics))),
            );
        }

        if let Some(forms) = spec.form_selection() {
            lf = lf.filter(
                col(schema::FORM_TYPE).is_in(lit(Series::new("forms".into(), forms.to_vec()))),
            );
        }

        if let Some(conditions) = spec.condition_selection() {
            if self.has_market_condition() {
                lf = lf.filter(
                    col(schema::MARKET_CONDITION)
                        .cast(DataType::Int64)
                        .is_in(lit(Series::new("conditions".into(), conditions))),
                );
            }
        }

        Ok(lf.collect()?)
    }
}

/// Headline metrics over a filtered subset.
///
/// An empty subset reports zeros across the board so the boundary never
/// sees NaN.
///
/// # Errors
/// Returns a polars error if a metric column cannot be read.
pub fn summary(frame: &DataFrame) -> Result<SummaryMetrics, StoreError> {
    if frame.height() == 0 {
        return Ok(SummaryMetrics::default());
    }

    let mean_of = |name: &str| -> Result<f64, StoreError> {
        Ok(frame.column(name)?.f64()?.mean().unwrap_or(0.0))
    };

    Ok(SummaryMetrics {
        total_filings: frame.height(),
        avg_ccti: mean_of(schema::CCTI)?,
        avg_excess_ret: mean_of(schema::EXCESS_RET)?,
        avg_vol: mean_of(schema::VOL_30D)?,
    })
}
