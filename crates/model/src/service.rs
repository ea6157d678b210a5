//! Prediction service: fits the forest and neighbor index over the
//! filing frame and answers what-if queries.

use std::sync::OnceLock;

use ndarray::{Array1, Array2};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use filinglens_primitives::schema;
use filinglens_primitives::{AccessionNumber, FilingRef};

use crate::{ForestConfig, ModelError, NearestNeighbors, RandomForest};

/// Number of comparable historical filings returned per prediction.
const SIMILAR_K: usize = 5;

/// What-if feature values for a hypothetical filing.
///
/// Every field is optional; omitted values default to zero, except the
/// squared complexity term which is derived from the complexity score
/// when not given explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionInput {
    /// Text-complexity score.
    #[serde(rename = "CCTI")]
    pub ccti: Option<f64>,
    /// Squared complexity score; derived as `CCTI²` when omitted.
    #[serde(rename = "CCTI_sq")]
    pub ccti_sq: Option<f64>,
    /// 12-1 month momentum.
    #[serde(rename = "Momentum_12_1")]
    pub momentum_12_1: Option<f64>,
    /// 30-day volatility.
    #[serde(rename = "Vol_30d")]
    pub vol_30d: Option<f64>,
    /// Book-to-market factor.
    #[serde(rename = "BM_w")]
    pub bm_w: Option<f64>,
    /// Size factor.
    #[serde(rename = "Size_w")]
    pub size_w: Option<f64>,
    /// Negative sentiment ratio.
    #[serde(rename = "Negative")]
    pub negative: Option<f64>,
    /// Positive sentiment ratio.
    #[serde(rename = "Positive")]
    pub positive: Option<f64>,
}

impl PredictionInput {
    /// Materialize the feature vector in [`schema::FEATURE_COLUMNS`]
    /// order.
    pub(crate) fn to_features(&self) -> [f64; 8] {
        let ccti = self.ccti.unwrap_or(0.0);
        [
            ccti,
            self.ccti_sq.unwrap_or(ccti * ccti),
            self.momentum_12_1.unwrap_or(0.0),
            self.vol_30d.unwrap_or(0.0),
            self.bm_w.unwrap_or(0.0),
            self.size_w.unwrap_or(0.0),
            self.negative.unwrap_or(0.0),
            self.positive.unwrap_or(0.0),
        ]
    }
}

/// A prediction plus its nearest historical comparables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Forest estimate of the 30-day excess return.
    pub predicted_excess_return: f64,
    /// Up to five historical filings closest in feature space.
    pub similar_filings: Vec<FilingRef>,
}

/// One feature's share of the forest's total impurity reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature column name.
    pub feature: String,
    /// Normalized importance in `[0, 1]`.
    pub importance: f64,
}

#[derive(Debug)]
struct Fitted {
    forest: RandomForest,
    neighbors: NearestNeighbors,
    refs: Vec<FilingRef>,
}

/// Owns the filing frame and the lazily fitted model state.
///
/// The first call that needs the model fits it; subsequent calls reuse
/// the fit. The frame is never refit for the lifetime of the service.
#[derive(Debug)]
pub struct Predictor {
    frame: DataFrame,
    config: ForestConfig,
    fitted: OnceLock<Fitted>,
}

impl Predictor {
    /// Wrap a prepared filing frame with default hyperparameters.
    #[must_use]
    pub fn new(frame: DataFrame) -> Self {
        Self::with_config(frame, ForestConfig::default())
    }

    /// Wrap a prepared filing frame with explicit hyperparameters.
    #[must_use]
    pub fn with_config(frame: DataFrame, config: ForestConfig) -> Self {
        Self { frame, config, fitted: OnceLock::new() }
    }

    /// Fit eagerly. Useful at startup so the first request does not pay
    /// the training cost.
    ///
    /// # Errors
    /// Propagates any fitting failure, such as a missing column or an
    /// empty training set.
    pub fn fit(&self) -> Result<(), ModelError> {
        self.fitted().map(|_| ())
    }

    /// Predict the excess return for a hypothetical filing and return
    /// the five nearest historical filings in feature space.
    ///
    /// # Errors
    /// Propagates fitting failures on first use.
    pub fn predict(&self, input: &PredictionInput) -> Result<Prediction, ModelError> {
        let fitted = self.fitted()?;
        let features = Array1::from(input.to_features().to_vec());

        let predicted_excess_return = fitted.forest.predict(features.view())?;
        let similar_filings = fitted
            .neighbors
            .query(features.view(), SIMILAR_K)?
            .into_iter()
            .map(|i| fitted.refs[i].clone())
            .collect();

        Ok(Prediction { predicted_excess_return, similar_filings })
    }

    /// Per-feature importances in [`schema::FEATURE_COLUMNS`] order.
    ///
    /// # Errors
    /// Propagates fitting failures on first use.
    pub fn feature_importances(&self) -> Result<Vec<FeatureImportance>, ModelError> {
        let fitted = self.fitted()?;
        Ok(schema::FEATURE_COLUMNS
            .iter()
            .zip(fitted.forest.feature_importances())
            .map(|(feature, &importance)| FeatureImportance {
                feature: (*feature).to_string(),
                importance,
            })
            .collect())
    }

    fn fitted(&self) -> Result<&Fitted, ModelError> {
        if let Some(fitted) = self.fitted.get() {
            return Ok(fitted);
        }
        let fitted = Fitted::fit(&self.frame, &self.config)?;
        Ok(self.fitted.get_or_init(move || fitted))
    }
}

impl Fitted {
    fn fit(frame: &DataFrame, config: &ForestConfig) -> Result<Self, ModelError> {
        for required in schema::FEATURE_COLUMNS
            .iter()
            .chain([schema::TARGET, schema::CO_NAME, schema::FILING_DATE, schema::ACC_NUM].iter())
        {
            if !frame.get_column_names().iter().any(|c| c.as_str() == *required) {
                return Err(ModelError::MissingColumn((*required).to_string()));
            }
        }

        let subset: Vec<Expr> = schema::FEATURE_COLUMNS
            .iter()
            .chain(std::iter::once(&schema::TARGET))
            .map(|c| col(*c))
            .collect();

        let training = frame
            .clone()
            .lazy()
            .drop_nulls(Some(subset))
            .with_column(stringified_date(frame))
            .collect()?;

        let n = training.height();
        if n == 0 {
            return Err(ModelError::InsufficientData);
        }

        let mut x = Array2::zeros((n, schema::FEATURE_COLUMNS.len()));
        for (j, name) in schema::FEATURE_COLUMNS.iter().enumerate() {
            let values = training.column(name)?.f64()?;
            for (i, v) in values.into_iter().enumerate() {
                x[[i, j]] = v.unwrap_or(0.0);
            }
        }
        let y: Vec<f64> =
            training.column(schema::TARGET)?.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect();

        let co_name = str_values(&training, schema::CO_NAME)?;
        let filing_date = str_values(&training, schema::FILING_DATE)?;
        let acc_num = str_values(&training, schema::ACC_NUM)?;
        let ccti = training.column(schema::CCTI)?.f64()?;
        let excess = training.column(schema::TARGET)?.f64()?;

        let refs: Vec<FilingRef> = (0..n)
            .map(|i| FilingRef {
                co_name: co_name[i].clone(),
                filing_date: filing_date[i].clone(),
                acc_num: AccessionNumber::new(acc_num[i].clone()),
                excess_ret: excess.get(i).unwrap_or(0.0),
                ccti: ccti.get(i).unwrap_or(0.0),
            })
            .collect();

        let forest = RandomForest::fit(&x, &y, config)?;
        let neighbors = NearestNeighbors::fit(x)?;

        Ok(Self { forest, neighbors, refs })
    }
}

fn str_values(frame: &DataFrame, name: &str) -> Result<Vec<String>, ModelError> {
    Ok(frame
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string).unwrap_or_default())
        .collect())
}

/// Render the filing date as `YYYY-MM-DD` text for the comparables list.
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
