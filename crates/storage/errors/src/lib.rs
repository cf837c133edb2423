//! Commonly used error types used when interacting with chain and state storage.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// Provider error
pub mod provider;
pub use provider::{ProviderError, ProviderResult};
