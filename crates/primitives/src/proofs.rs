//! Helper function for calculating the roots committed to in a header.

use crate::{Header, Receipt};
use alloy_primitives::{keccak256, Bloom, B256};

/// Calculates the root hash of the ommers of a block.
pub fn calculate_ommers_root(ommers: &[Header]) -> B256 {
    let mut out = Vec::new();
    alloy_rlp::encode_list::<_, Header>(ommers, &mut out);
    keccak256(out)
}

/// Calculates the logs bloom of a block from its receipts.
pub fn calculate_logs_bloom<'a>(receipts: impl IntoIterator<Item = &'a Receipt>) -> Bloom {
    Receipt::aggregate_bloom(receipts)
}
