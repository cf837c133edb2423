//! The contract of the state-transition executor: applying a block to a world state.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod error;
pub mod execute;

pub use error::BlockExecutionError;
pub use execute::{BlockProcessingResult, BlockProcessor};

// Re-export the output type for convenience.
pub use assay_execution_types::BlockExecutionOutput;
