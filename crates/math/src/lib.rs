#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod binning;
pub use binning::{Histogram, bin_index, equal_width_edges, histogram, quantile_bin_index, quantile_edges};

mod loess;
pub use loess::loess;

mod sample;
pub use sample::sample_indices;

mod error;
pub use error::MathError;
