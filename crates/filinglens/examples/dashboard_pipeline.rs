//! Example: Full Dashboard Pipeline
//!
//! Demonstrates the complete filinglens workflow over a synthetic filing
//! dataset:
//! 1. Preparing the dataset (coercion, imputation, date parsing)
//! 2. Filtering and summary metrics
//! 3. Chart aggregations (histogram, heatmap, scatter)
//! 4. Excess-return prediction with comparable filings
//!
//! Run with: `cargo run --example dashboard_pipeline --features full`

use polars::prelude::*;

use filinglens::charts::{histogram, scatter, sentiment_heatmap};
use filinglens::model::{PredictionInput, Predictor};
use filinglens::primitives::schema;
use filinglens::primitives::FilterSpec;
use filinglens::store::{FilingStore, summary};

const FILINGS: usize = 500;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== filinglens dashboard pipeline ===\n");

    // Step 1: Prepare the dataset
    let store = FilingStore::from_frame(synthetic_filings())?;
    println!("Loaded {} filings", store.height());
    let (min, max) = store.date_bounds()?;
    println!("Filing dates: {min} .. {max}");
    println!("Form types:   {:?}\n", store.unique_forms()?);

    // Step 2: Filter to annual reports and summarize
    let spec = FilterSpec { forms: Some(vec!["10-K".to_string()]), ..Default::default() };
    let subset = store.filter(&spec)?;
    let metrics = summary(&subset)?;
    println!("10-K filings:          {}", metrics.total_filings);
    println!("Mean complexity:       {:.3}", metrics.avg_ccti);
    println!("Mean excess return:    {:+.4}", metrics.avg_excess_ret);
    println!("Mean 30-day vol:       {:.3}\n", metrics.avg_vol);

    // Step 3: Chart aggregations
    let hist = histogram(&subset, schema::CCTI, 20)?;
    println!("Histogram bins:        {}", hist.data.len());

    let heat = sentiment_heatmap(&subset, schema::NEGATIVE)?;
    println!("Heatmap grid:          {}x{}", heat.data.z.len(), heat.data.z[0].len());

    let points = scatter(&subset, 0.5)?;
    println!("Scatter points:        {}", points.data.points.len());
    println!("Trend vertices:        {}\n", points.data.trend.len());

    // Step 4: Predict the reaction to a hypothetical complex filing
    let predictor = Predictor::new(store.frame().clone());
    let prediction = predictor.predict(&PredictionInput {
        ccti: Some(4.0),
        vol_30d: Some(0.25),
        ..Default::default()
    })?;
    println!("Predicted excess return: {:+.4}", prediction.predicted_excess_return);
    println!("Closest historical filings:");
    for filing in &prediction.similar_filings {
        println!(
            "  {:<10} {}  CCTI {:.2}  ExcessRet {:+.4}",
            filing.acc_num, filing.filing_date, filing.ccti, filing.excess_ret
        );
    }

    println!("\nTop feature importances:");
    let mut importances = predictor.feature_importances()?;
    importances.sort_by(|a, b| b.importance.partial_cmp(&a.importance).unwrap());
    for fi in importances.iter().take(3) {
        println!("  {:<14} {:.3}", fi.feature, fi.importance);
    }

    Ok(())
}

/// Deterministic synthetic dataset shaped like the production CSV.
fn synthetic_filings() -> DataFrame {
    let acc: Vec<String> = (0..FILINGS).map(|i| format!("0000-{i:04}")).collect();
    let names: Vec<String> = (0..FILINGS).map(|i| format!("COMPANY {}", i % 50)).collect();
    let dates: Vec<String> = (0..FILINGS)
        .map(|i| format!("20{:02}-{:02}-{:02}", 18 + i % 5, (i % 12) + 1, (i % 28) + 1))
        .collect();
    let forms: Vec<String> =
        (0..FILINGS).map(|i| if i % 4 == 0 { "10-K" } else { "10-Q" }.to_string()).collect();
    let sic: Vec<f64> = (0..FILINGS).map(|i| [6021.0, 7372.0, 2834.0][i % 3]).collect();
    let ccti: Vec<f64> = (0..FILINGS).map(|i| ((i * 37) % 500) as f64 / 100.0).collect();
    let ccti_sq: Vec<f64> = ccti.iter().map(|c| c * c).collect();
    let vol: Vec<f64> = (0..FILINGS).map(|i| 0.05 + ((i * 13) % 60) as f64 / 100.0).collect();
    let excess: Vec<f64> =
        ccti.iter().zip(&vol).map(|(c, v)| 0.01 * c - 0.04 * v - 0.005).collect();
    let negative: Vec<f64> = (0..FILINGS).map(|i| ((i * 7) % 40) as f64 / 1000.0).collect();
    let positive: Vec<f64> = (0..FILINGS).map(|i| ((i * 11) % 30) as f64 / 1000.0).collect();
    let zeros = vec![0.0; FILINGS];

    df! {
        schema::ACC_NUM => acc,
        schema::CO_NAME => names,
        schema::FILING_DATE => dates,
        schema::FORM_TYPE => forms,
        schema::SIC => sic,
        schema::CCTI => ccti,
        schema::CCTI_SQ => ccti_sq,
        schema::EXCESS_RET => excess,
        schema::VOL_30D => vol,
        schema::MOMENTUM => zeros.clone(),
        schema::BOOK_TO_MARKET => zeros.clone(),
        schema::SIZE => zeros.clone(),
        schema::NEGATIVE => negative,
        schema::POSITIVE => positive,
    }
    .expect("static schema")
}
