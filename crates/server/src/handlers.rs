//! HTTP request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use filinglens_charts::{
    ChartOutcome, HeatmapGrid, HistogramBin, ScatterSeries, histogram, scatter as scatter_chart,
    sentiment_heatmap,
};
use filinglens_model::{FeatureImportance, Prediction, PredictionInput};
use filinglens_primitives::schema;
use filinglens_primitives::{FilterSpec, SummaryMetrics};
use filinglens_store::{StoreError, export_csv, summary};

use crate::error::Result;
use crate::state::AppState;

/// Liveness probe with the loaded row count.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "filings": state.store.height() }))
}

/// Selectable values for every filter dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCatalog {
    /// Earliest filing date in the dataset, `YYYY-MM-DD`.
    pub min_date: Option<String>,
    /// Latest filing date in the dataset, `YYYY-MM-DD`.
    pub max_date: Option<String>,
    /// Distinct SIC codes, ascending.
    pub sics: Vec<f64>,
    /// Distinct form types, ascending.
    pub forms: Vec<String>,
    /// Selectable regime flags; empty when the regime column is absent.
    pub market_conditions: Vec<i64>,
}

/// Catalog of filter options, computed from the full dataset.
pub async fn init_filters(State(state): State<Arc<AppState>>) -> Result<Json<FilterCatalog>> {
    let (min_date, max_date) = match state.store.date_bounds() {
        Ok((min, max)) => (
            Some(min.format("%Y-%m-%d").to_string()),
            Some(max.format("%Y-%m-%d").to_string()),
        ),
        Err(StoreError::Empty) => (None, None),
        Err(e) => return Err(e.into()),
    };

    Ok(Json(FilterCatalog {
        min_date,
        max_date,
        sics: state.store.unique_sics()?,
        forms: state.store.unique_forms()?,
        market_conditions: state.store.market_conditions(),
    }))
}

/// Summary metrics for the filtered subset.
pub async fn metrics(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<SummaryMetrics>> {
    let subset = state.store.filter(&spec)?;
    debug!(rows = subset.height(), "computed filtered subset");
    Ok(Json(summary(&subset)?))
}

/// Query parameters for the distribution chart.
#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    /// Requested bin count; clamped server-side.
    pub bins: Option<usize>,
}

/// Complexity histogram over the filtered subset.
pub async fn distribution(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DistributionQuery>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<ChartOutcome<Vec<HistogramBin>>>> {
    let subset = state.store.filter(&spec)?;
    let outcome = histogram(&subset, schema::CCTI, query.bins.unwrap_or(50))?;
    if let Some(warning) = &outcome.warning {
        warn!(%warning, "distribution degraded");
    }
    Ok(Json(outcome))
}

/// Query parameters for the heatmap.
#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    /// Sentiment column for the vertical axis.
    pub sentiment_col: Option<String>,
}

/// Sentiment-by-complexity heatmap of mean excess return.
pub async fn heatmap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<ChartOutcome<HeatmapGrid>>> {
    let subset = state.store.filter(&spec)?;
    let column = query.sentiment_col.as_deref().unwrap_or(schema::NEGATIVE);
    let outcome = sentiment_heatmap(&subset, column)?;
    if let Some(warning) = &outcome.warning {
        warn!(%warning, "heatmap degraded");
    }
    Ok(Json(outcome))
}

/// Query parameters for the scatter chart.
#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    /// Maximum 30-day volatility to include; unbounded when omitted.
    pub vol_cutoff: Option<f64>,
}

/// Complexity vs. excess-return scatter with its LOESS trend.
pub async fn scatter(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScatterQuery>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<ChartOutcome<ScatterSeries>>> {
    let subset = state.store.filter(&spec)?;
    let cutoff = query.vol_cutoff.unwrap_or(f64::INFINITY);
    let outcome = scatter_chart(&subset, cutoff)?;
    if let Some(warning) = &outcome.warning {
        warn!(%warning, "scatter degraded");
    }
    Ok(Json(outcome))
}

/// Per-feature importances of the fitted forest.
pub async fn feature_importance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FeatureImportance>>> {
    Ok(Json(state.predictor.feature_importances()?))
}

/// Predict the excess return for a hypothetical filing.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PredictionInput>,
) -> Result<Json<Prediction>> {
    let prediction = state.predictor.predict(&input)?;
    info!(predicted = prediction.predicted_excess_return, "served prediction");
    Ok(Json(prediction))
}

/// Download the filtered subset as CSV.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<FilterSpec>,
) -> Result<impl IntoResponse> {
    let subset = state.store.filter(&spec)?;
    let bytes = export_csv(&subset)?;
    info!(rows = subset.height(), bytes = bytes.len(), "exported filtered subset");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"filtered_filings.csv\""),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use filinglens_store::FilingStore;
    use polars::prelude::*;
    use rstest::rstest;

    use super::*;

    fn test_state() -> Arc<AppState> {
        let n = 30usize;
        let acc: Vec<String> = (0..n).map(|i| format!("acc-{i}")).collect();
        let names: Vec<String> = (0..n).map(|i| format!("CO {i}")).collect();
        let dates: Vec<String> = (0..n).map(|i| format!("2021-03-{:02}", (i % 28) + 1)).collect();
        let forms: Vec<String> =
            (0..n).map(|i| if i % 2 == 0 { "10-K" } else { "10-Q" }.to_string()).collect();
        let sic: Vec<f64> = (0..n).map(|i| if i < 15 { 6021.0 } else { 7372.0 }).collect();
        let ccti: Vec<f64> = (0..n).map(|i| i as f64 / 3.0).collect();
        let ccti_sq: Vec<f64> = ccti.iter().map(|c| c * c).collect();
        let excess: Vec<f64> = (0..n).map(|i| (i as f64 - 15.0) / 100.0).collect();
        let zeros = vec![0.0; n];
        let df = df! {
            schema::ACC_NUM => acc,
            schema::CO_NAME => names,
            schema::FILING_DATE => dates,
            schema::FORM_TYPE => forms,
            schema::SIC => sic,
            schema::CCTI => ccti,
            schema::CCTI_SQ => ccti_sq,
            schema::EXCESS_RET => excess,
            schema::VOL_30D => zeros.clone(),
            schema::MOMENTUM => zeros.clone(),
            schema::BOOK_TO_MARKET => zeros.clone(),
            schema::SIZE => zeros.clone(),
            schema::NEGATIVE => zeros.clone(),
            schema::POSITIVE => zeros,
        }
        .unwrap();
        Arc::new(AppState::new(FilingStore::from_frame(df).unwrap()))
    }

    #[tokio::test]
    async fn init_filters_returns_the_full_catalog() {
        let state = test_state();
        let Json(catalog) = init_filters(State(state)).await.unwrap();
        assert_eq!(catalog.min_date.as_deref(), Some("2021-03-01"));
        assert_eq!(catalog.sics, vec![6021.0, 7372.0]);
        assert_eq!(catalog.forms, vec!["10-K", "10-Q"]);
        assert!(catalog.market_conditions.is_empty());
    }

    #[tokio::test]
    async fn metrics_cover_the_unconstrained_subset() {
        let state = test_state();
        let Json(m) = metrics(State(state), Json(FilterSpec::unconstrained())).await.unwrap();
        assert_eq!(m.total_filings, 30);
    }

    #[rstest]
    #[case("10-K", 15)]
    #[case("10-Q", 15)]
    #[case("S-1", 0)]
    #[tokio::test]
    async fn metrics_respect_form_filters(#[case] form: &str, #[case] expected: usize) {
        let state = test_state();
        let spec = FilterSpec { forms: Some(vec![form.to_string()]), ..Default::default() };
        let Json(m) = metrics(State(state), Json(spec)).await.unwrap();
        assert_eq!(m.total_filings, expected);
    }

    #[tokio::test]
    async fn distribution_defaults_to_fifty_bins() {
        let state = test_state();
        let Json(outcome) = distribution(
            State(state),
            Query(DistributionQuery { bins: None }),
            Json(FilterSpec::unconstrained()),
        )
        .await
        .unwrap();
        assert_eq!(outcome.data.len(), 50);
    }

    #[tokio::test]
    async fn heatmap_rejects_a_bogus_sentiment_column() {
        let state = test_state();
        let result = heatmap(
            State(state),
            Query(HeatmapQuery { sentiment_col: Some("CCTI".to_string()) }),
            Json(FilterSpec::unconstrained()),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn scatter_without_cutoff_keeps_every_row() {
        let state = test_state();
        let Json(outcome) = scatter(
            State(state),
            Query(ScatterQuery { vol_cutoff: None }),
            Json(FilterSpec::unconstrained()),
        )
        .await
        .unwrap();
        assert_eq!(outcome.data.points.len(), 30);
    }

    #[tokio::test]
    async fn predict_round_trips_through_the_service() {
        let state = test_state();
        let input = PredictionInput { ccti: Some(5.0), ..Default::default() };
        let Json(prediction) = predict(State(state), Json(input)).await.unwrap();
        assert_eq!(prediction.similar_filings.len(), 5);
        assert!(prediction.predicted_excess_return.is_finite());
    }
}
