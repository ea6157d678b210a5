#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod load;
pub use load::FilingStore;

mod filter;
pub use filter::summary;

mod export;
pub use export::export_csv;

mod error;
pub use error::StoreError;
