//! Complexity vs. excess-return scatter with LOESS trend.

use filinglens_math::{loess, sample_indices};
use filinglens_primitives::schema;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartOutcome, extract};

/// Display cap; larger candidate sets are subsampled with a fixed seed.
pub const SCATTER_POINT_CAP: usize = 2000;

/// Seed for the display subsample, fixed for reproducible charts.
const SAMPLE_SEED: u64 = 42;

/// LOESS bandwidth as a fraction of the sample.
const TREND_FRACTION: f64 = 0.1;

/// One scatter point with the descriptive columns surfaced on hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Complexity score.
    #[serde(rename = "CCTI")]
    pub ccti: f64,
    /// 30-day excess return.
    #[serde(rename = "ExcessRet")]
    pub excess_ret: f64,
    /// Company name.
    #[serde(rename = "CoName")]
    pub co_name: String,
    /// Filing date formatted `YYYY-MM-DD`.
    #[serde(rename = "FILING_DATE")]
    pub filing_date: String,
    /// Accession number.
    #[serde(rename = "ACC_NUM")]
    pub acc_num: String,
    /// 30-day volatility.
    #[serde(rename = "Vol_30d")]
    pub vol_30d: f64,
    /// 12-1 month momentum.
    #[serde(rename = "Momentum_12_1")]
    pub momentum_12_1: f64,
    /// Book-to-market factor.
    #[serde(rename = "BM_w")]
    pub bm_w: f64,
    /// Size factor.
    #[serde(rename = "Size_w")]
    pub size_w: f64,
    /// Negative sentiment ratio.
    #[serde(rename = "Negative")]
    pub negative: f64,
    /// Positive sentiment ratio.
    #[serde(rename = "Positive")]
    pub positive: f64,
    /// Form type.
    #[serde(rename = "FORM_TYPE")]
    pub form_type: String,
}

/// One vertex of the smoothed trend polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Complexity score.
    pub x: f64,
    /// Smoothed excess return.
    pub y: f64,
}

/// Scatter payload: points sorted by complexity plus the trend curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    /// Raw (possibly subsampled) points.
    pub points: Vec<ScatterPoint>,
    /// LOESS trend evaluated at each point's complexity.
    pub trend: Vec<TrendPoint>,
}

/// Build the scatter series for a filtered subset.
///
/// Rows with volatility above `vol_cutoff` are dropped first. If more
/// than [`SCATTER_POINT_CAP`] candidates remain, a fixed-seed random
/// sample of exactly the cap is rendered (noted in the warning). Points
/// are sorted by complexity and a LOESS curve (bandwidth 0.1) is fit
/// over (complexity, excess return). A cutoff below every row's
/// volatility yields zero points and an empty trend.
///
/// # Errors
/// Returns [`ChartError::MissingColumn`] when a descriptive column is
/// absent from the subset.
pub fn scatter(
    frame: &DataFrame,
    vol_cutoff: f64,
) -> Result<ChartOutcome<ScatterSeries>, ChartError> {
    let capped = frame
        .clone()
        .lazy()
        .filter(col(schema::VOL_30D).lt_eq(lit(vol_cutoff)))
        .with_column(stringified_date(frame))
        .collect()?;

    let candidates = capped.height();
    if candidates == 0 {
        return Ok(ChartOutcome::degraded(
            ScatterSeries { points: Vec::new(), trend: Vec::new() },
            "no filings below the volatility cutoff",
        ));
    }

    let ccti = extract::f64_column(&capped, schema::CCTI)?;
    let excess = extract::f64_column(&capped, schema::EXCESS_RET)?;
    let vol = extract::f64_column(&capped, schema::VOL_30D)?;
    let momentum = extract::f64_column(&capped, schema::MOMENTUM)?;
    let bm = extract::f64_column(&capped, schema::BOOK_TO_MARKET)?;
    let size = extract::f64_column(&capped, schema::SIZE)?;
    let negative = extract::f64_column(&capped, schema::NEGATIVE)?;
    let positive = extract::f64_column(&capped, schema::POSITIVE)?;
    let co_name = extract::str_column(&capped, schema::CO_NAME)?;
    let filing_date = extract::str_column(&capped, schema::FILING_DATE)?;
    let acc_num = extract::str_column(&capped, schema::ACC_NUM)?;
    let form_type = extract::str_column(&capped, schema::FORM_TYPE)?;

    let mut points: Vec<ScatterPoint> = sample_indices(candidates, SCATTER_POINT_CAP, SAMPLE_SEED)
        .into_iter()
        .filter_map(|i| {
            Some(ScatterPoint {
                ccti: ccti[i]?,
                excess_ret: excess[i]?,
                co_name: co_name[i].clone(),
                filing_date: filing_date[i].clone(),
                acc_num: acc_num[i].clone(),
                vol_30d: vol[i].unwrap_or(0.0),
                momentum_12_1: momentum[i].unwrap_or(0.0),
                bm_w: bm[i].unwrap_or(0.0),
                size_w: size[i].unwrap_or(0.0),
                negative: negative[i].unwrap_or(0.0),
                positive: positive[i].unwrap_or(0.0),
                form_type: form_type[i].clone(),
            })
        })
        .collect();

    points.sort_by(|a, b| a.ccti.partial_cmp(&b.ccti).unwrap_or(std::cmp::Ordering::Equal));

    let trend = if points.len() >= 2 {
        let xs: Vec<f64> = points.iter().map(|p| p.ccti).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.excess_ret).collect();
        loess(&xs, &ys, TREND_FRACTION)?
            .into_iter()
            .zip(&xs)
            .map(|(y, &x)| TrendPoint { x, y })
            .collect()
    } else {
        Vec::new()
    };

    let series = ScatterSeries { points, trend };
    if candidates > SCATTER_POINT_CAP {
        return Ok(ChartOutcome::degraded(
            series,
            format!("showing a random {SCATTER_POINT_CAP} of {candidates} points"),
        ));
    }
    Ok(ChartOutcome::ok(series))
}

/// Render the filing date as `YYYY-MM-DD` text so the payload is
/// serialization-safe regardless of the source dtype.
fn stringified_date(frame: &DataFrame) -> Expr {
    let is_temporal = frame
        .column(schema::FILING_DATE)
        .map(|c| c.dtype().is_temporal())
        .unwrap_or(false);
    if is_temporal {
        col(schema::FILING_DATE).dt().strftime("%Y-%m-%d").alias(schema::FILING_DATE)
    } else {
        col(schema::FILING_DATE).cast(DataType::String).alias(schema::FILING_DATE)
    }
}
