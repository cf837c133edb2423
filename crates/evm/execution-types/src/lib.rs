//! Commonly used types for block execution outputs.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use assay_primitives::{Bloom, Receipt, B256};

/// The output of executing a single block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockExecutionOutput {
    /// The receipts of the transactions in the block, in order.
    pub receipts: Vec<Receipt>,
    /// The total gas used by the block.
    pub gas_used: u64,
    /// The state root of the world state after the block was applied.
    pub state_root: B256,
}

impl BlockExecutionOutput {
    /// Returns the logs bloom the header has to commit to for these receipts.
    pub fn logs_bloom(&self) -> Bloom {
        Receipt::aggregate_bloom(&self.receipts)
    }
}
