//! # filinglens
//!
//! Analytics for corporate securities filings: text-complexity scores,
//! market-reaction metrics, chart aggregations, and excess-return
//! prediction.
//!
//! This crate is a unified interface to the filinglens ecosystem.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Dataset schema, filter spec, and shared types
//! - `math`: Binning, LOESS smoothing, and sampling kernels
//! - `store`: Dataset loading, filtering, and CSV export
//! - `charts`: Histogram, heatmap, and scatter aggregations
//! - `model`: Excess-return prediction and comparable retrieval
//!
//! ## Example
//!
//! ```rust,ignore
//! // With default features (all components):
//! use filinglens::store::FilingStore;
//! use filinglens::model::Predictor;
//!
//! // Or with specific features only:
//! // [dependencies]
//! // filinglens = { version = "0.1", default-features = false, features = ["charts"] }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use filinglens_primitives as primitives;
#[cfg(feature = "math")]
#[doc(inline)]
pub use filinglens_math as math;
#[cfg(feature = "store")]
#[doc(inline)]
pub use filinglens_store as store;
#[cfg(feature = "charts")]
#[doc(inline)]
pub use filinglens_charts as charts;
#[cfg(feature = "model")]
#[doc(inline)]
pub use filinglens_model as model;
