#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod tree;

mod forest;
pub use forest::{ForestConfig, RandomForest};

mod neighbors;
pub use neighbors::NearestNeighbors;

mod service;
pub use service::{FeatureImportance, Prediction, PredictionInput, Predictor};

mod error;
pub use error::ModelError;
