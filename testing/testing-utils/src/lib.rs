//! Testing utilities.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod generators;

mod chain;
pub use chain::{InMemoryChainStore, InMemoryWorldStateProvider, MockWorldState};

mod mocks;
pub use mocks::{MockBlockProcessor, MockBodyValidator, MockHeaderValidator, ProcessorResponse};
