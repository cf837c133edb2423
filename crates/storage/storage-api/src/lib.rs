//! Collection of traits through which block validation reaches chain and state storage.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export used error types.
pub use assay_storage_errors as errors;

mod header;
pub use header::*;

mod state;
pub use state::*;
