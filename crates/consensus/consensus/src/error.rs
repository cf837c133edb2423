use assay_primitives::{BlockHash, BlockNumber, Bloom, GotExpected, B256};
use assay_storage_api::errors::ProviderError;

/// Consensus Errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusError {
    /// Error when the parent of a block is not available locally.
    #[error("parent block {hash} is unknown")]
    ParentUnknown {
        /// The hash of the missing parent.
        hash: BlockHash,
    },

    /// Error when the parent of a block has already been recorded as bad.
    #[error("parent block {hash} is known to be bad")]
    ParentIsBad {
        /// The hash of the bad parent.
        hash: BlockHash,
    },

    /// A rule engine hit a storage fault while resolving what it needed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Error when the parent hash of a block does not match the expected parent hash.
    #[error("mismatched parent hash: {0}")]
    ParentHashMismatch(GotExpected<B256>),

    /// Error when the block number does not match the parent block number.
    #[error(
        "block number {block_number} does not match parent block number {parent_block_number}"
    )]
    ParentBlockNumberMismatch {
        /// The parent block number.
        parent_block_number: BlockNumber,
        /// The block number.
        block_number: BlockNumber,
    },

    /// Error when the block timestamp is in the past compared to the parent timestamp.
    #[error(
        "block timestamp {timestamp} is in the past compared to the parent timestamp {parent_timestamp}"
    )]
    TimestampIsInPast {
        /// The parent block's timestamp.
        parent_timestamp: u64,
        /// The block's timestamp.
        timestamp: u64,
    },

    /// Error when the gas used in the header exceeds the gas limit.
    #[error("block used gas ({gas_used}) is greater than gas limit ({gas_limit})")]
    HeaderGasUsedExceedsGasLimit {
        /// The gas used in the block header.
        gas_used: u64,
        /// The gas limit in the block header.
        gas_limit: u64,
    },

    /// Error when the extra data length exceeds the maximum allowed.
    #[error("extra data {len} exceeds max length")]
    ExtraDataExceedsMax {
        /// The length of the extra data.
        len: usize,
    },

    /// Error when the ommers hash in the header does not match the body.
    #[error("mismatched block ommer hash: {0}")]
    BodyOmmersHashDiff(GotExpected<B256>),

    /// Error when the withdrawals in the body do not match the presence of a withdrawals root.
    #[error("withdrawals root is {}, but the body {} withdrawals", if *.root_present { "present" } else { "missing" }, if *.body_present { "has" } else { "has no" })]
    WithdrawalsPresenceMismatch {
        /// Whether the header carries a withdrawals root.
        root_present: bool,
        /// Whether the body carries a withdrawals list.
        body_present: bool,
    },

    /// Error when the gas used by execution differs from the header.
    #[error("block gas used mismatch: {gas}")]
    BlockGasUsed {
        /// The gas diff.
        gas: GotExpected<u64>,
    },

    /// Error when the logs bloom computed from the receipts differs from the header.
    #[error("header bloom filter mismatch: {0}")]
    BodyBloomLogDiff(Box<GotExpected<Bloom>>),

    /// Error when the state root produced by execution differs from the header.
    #[error("mismatched block state root: {0}")]
    BodyStateRootDiff(GotExpected<B256>),

    /// Any other rule violation.
    #[error("{0}")]
    Other(String),
}

impl ConsensusError {
    /// Returns `true` if the error is a storage fault rather than a rule violation. Such errors
    /// say nothing about the validity of the block.
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Returns `true` if the error reports data that is missing locally rather than a rule
    /// violation.
    pub const fn is_missing_prerequisite(&self) -> bool {
        matches!(self, Self::ParentUnknown { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let fault = ConsensusError::from(ProviderError::Database("closed".into()));
        assert!(fault.is_infrastructure());
        assert!(!fault.is_missing_prerequisite());
        assert_eq!(fault.to_string(), "database error: closed");

        let missing = ConsensusError::ParentUnknown { hash: BlockHash::ZERO };
        assert!(missing.is_missing_prerequisite());
        assert!(!missing.is_infrastructure());

        let violation = ConsensusError::BodyStateRootDiff(GotExpected::new(B256::ZERO, B256::ZERO));
        assert!(!violation.is_infrastructure() && !violation.is_missing_prerequisite());
    }

    #[test]
    fn withdrawals_message() {
        let err =
            ConsensusError::WithdrawalsPresenceMismatch { root_present: true, body_present: false };
        assert_eq!(err.to_string(), "withdrawals root is present, but the body has no withdrawals");
    }
}
