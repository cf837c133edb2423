//! Collection of methods for block validation.

use crate::ConsensusError;
use assay_execution_types::BlockExecutionOutput;
use assay_primitives::{
    constants::MAXIMUM_EXTRA_DATA_SIZE, proofs, GotExpected, Header, SealedBlock, SealedHeader,
};

/// Gas used needs to be less than gas limit. Gas used is going to be checked after execution.
#[inline]
pub fn validate_header_gas(header: &Header) -> Result<(), ConsensusError> {
    if header.gas_used > header.gas_limit {
        return Err(ConsensusError::HeaderGasUsedExceedsGasLimit {
            gas_used: header.gas_used,
            gas_limit: header.gas_limit,
        })
    }
    Ok(())
}

/// Validates the header's extradata.
///
/// From yellow paper: extraData: An arbitrary byte array containing data relevant to this block.
/// This must be 32 bytes or fewer; formally Hx.
#[inline]
pub fn validate_header_extradata(header: &Header) -> Result<(), ConsensusError> {
    if header.extra_data.len() > MAXIMUM_EXTRA_DATA_SIZE {
        Err(ConsensusError::ExtraDataExceedsMax { len: header.extra_data.len() })
    } else {
        Ok(())
    }
}

/// Validates against the parent hash and number.
///
/// This function ensures that the header block number is sequential and that the hash of the parent
/// header matches the parent hash in the header.
#[inline]
pub fn validate_against_parent_hash_number(
    header: &SealedHeader,
    parent: &SealedHeader,
) -> Result<(), ConsensusError> {
    // Parent number is consistent.
    if parent.number.checked_add(1) != Some(header.number) {
        return Err(ConsensusError::ParentBlockNumberMismatch {
            parent_block_number: parent.number,
            block_number: header.number,
        })
    }

    if parent.hash() != header.parent_hash {
        return Err(ConsensusError::ParentHashMismatch(GotExpected {
            got: header.parent_hash,
            expected: parent.hash(),
        }))
    }

    Ok(())
}

/// Validates the timestamp against the parent to make sure it is in the future.
#[inline]
pub fn validate_against_parent_timestamp(
    header: &SealedHeader,
    parent: &SealedHeader,
) -> Result<(), ConsensusError> {
    if header.timestamp <= parent.timestamp {
        return Err(ConsensusError::TimestampIsInPast {
            parent_timestamp: parent.timestamp,
            timestamp: header.timestamp,
        })
    }
    Ok(())
}

/// Validates that `ommers` hash to the ommers root committed to by `header`.
pub fn validate_ommers_hash(header: &Header, ommers: &[Header]) -> Result<(), ConsensusError> {
    let ommers_hash = proofs::calculate_ommers_root(ommers);
    if header.ommers_hash != ommers_hash {
        return Err(ConsensusError::BodyOmmersHashDiff(GotExpected {
            got: ommers_hash,
            expected: header.ommers_hash,
        }))
    }
    Ok(())
}

/// Validates that the body carries withdrawals exactly when the header commits to them.
pub fn validate_withdrawals_presence(block: &SealedBlock) -> Result<(), ConsensusError> {
    let root_present = block.withdrawals_root.is_some();
    let body_present = block.body.withdrawals.is_some();
    if root_present != body_present {
        return Err(ConsensusError::WithdrawalsPresenceMismatch { root_present, body_present })
    }
    Ok(())
}

/// Validate a block without regard for state:
///
/// - Compares the ommer hash in the block header to the given ommers
/// - Checks that withdrawals are present exactly when the header commits to them
pub fn validate_block_pre_execution(
    block: &SealedBlock,
    ommers: &[Header],
) -> Result<(), ConsensusError> {
    validate_ommers_hash(&block.header, ommers)?;
    validate_withdrawals_presence(block)?;
    Ok(())
}

/// Validate a block with regard to the outputs of its execution:
///
/// - Compares the gas used by execution to the gas used in the header
/// - Compares the logs bloom of the receipts to the one in the header
/// - Compares the state root after execution to the one in the header
pub fn validate_block_post_execution(
    block: &SealedBlock,
    output: &BlockExecutionOutput,
) -> Result<(), ConsensusError> {
    if block.gas_used != output.gas_used {
        return Err(ConsensusError::BlockGasUsed {
            gas: GotExpected { got: output.gas_used, expected: block.gas_used },
        })
    }

    let logs_bloom = output.logs_bloom();
    if block.logs_bloom != logs_bloom {
        return Err(ConsensusError::BodyBloomLogDiff(
            GotExpected { got: logs_bloom, expected: block.logs_bloom }.into(),
        ))
    }

    if block.state_root != output.state_root {
        return Err(ConsensusError::BodyStateRootDiff(GotExpected {
            got: output.state_root,
            expected: block.state_root,
        }))
    }

    Ok(())
}
