#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod outcome;
pub use outcome::ChartOutcome;

mod histogram;
pub use histogram::{HistogramBin, MAX_BINS, MIN_BINS, histogram};

mod heatmap;
pub use heatmap::{HEATMAP_BINS, HeatmapGrid, sentiment_heatmap};

mod scatter;
pub use scatter::{SCATTER_POINT_CAP, ScatterPoint, ScatterSeries, TrendPoint, scatter};

mod error;
pub use error::ChartError;

pub(crate) mod extract;
