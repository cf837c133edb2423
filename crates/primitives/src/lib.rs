//! Commonly used types in assay.
//!
//! This crate contains the block, header and receipt types that flow through the validation
//! pipeline, together with their RLP encoding and hashing.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod block;
pub mod constants;
mod error;
mod header;
pub mod proofs;
mod receipt;

pub use block::{Block, BlockBody, SealedBlock, Withdrawal};
pub use error::GotExpected;
pub use header::{Header, SealedHeader};
pub use receipt::Receipt;

// Re-exports
pub use alloy_primitives::{
    self, b256, keccak256, Address, BlockHash, BlockNumber, Bloom, Bytes, B256, B64, U256,
};
