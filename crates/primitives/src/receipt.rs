use alloy_primitives::Bloom;

/// Receipt containing result of transaction execution.
///
/// Only the fields the post-execution checks reconcile against the header are carried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    /// If transaction is executed successfully.
    pub success: bool,
    /// Gas used by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Bloom filter built from the logs emitted by this transaction.
    pub logs_bloom: Bloom,
}

impl Receipt {
    /// Aggregates the logs blooms of the given receipts, the value committed to by
    /// `Header::logs_bloom`.
    pub fn aggregate_bloom<'a>(receipts: impl IntoIterator<Item = &'a Self>) -> Bloom {
        let mut bloom = Bloom::ZERO;
        for receipt in receipts {
            bloom.accrue_bloom(&receipt.logs_bloom);
        }
        bloom
    }
}
