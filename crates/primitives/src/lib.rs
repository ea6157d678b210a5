#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod schema;

mod filing;
pub use filing::{AccessionNumber, FilingRef};

mod filter;
pub use filter::FilterSpec;

mod metrics;
pub use metrics::SummaryMetrics;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
