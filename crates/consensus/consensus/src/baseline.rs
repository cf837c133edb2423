use crate::{
    validation::{
        validate_against_parent_hash_number, validate_against_parent_timestamp,
        validate_block_post_execution, validate_block_pre_execution, validate_header_extradata,
        validate_header_gas,
    },
    BodyValidator, ConsensusError, HeaderValidationMode, HeaderValidator, ProtocolContext,
};
use assay_execution_types::BlockExecutionOutput;
use assay_primitives::{Header, SealedBlock, SealedHeader};

/// The maximum distance between a block and the ommers it includes.
const MAX_OMMER_DEPTH: u64 = 6;

/// Header rules shared by every Ethereum fork: gas, extra data, and linkage to the parent.
///
/// In [`HeaderValidationMode::Full`] the parent must additionally be part of the local chain and
/// must not have been recorded as bad.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct BaselineHeaderValidator;

impl BaselineHeaderValidator {
    /// Creates the validator.
    pub const fn new() -> Self {
        Self
    }
}

impl HeaderValidator for BaselineHeaderValidator {
    fn validate_header_against_parent(
        &self,
        header: &SealedHeader,
        parent: &SealedHeader,
        ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        if mode.is_none() {
            return Ok(())
        }

        validate_header_gas(header)?;
        validate_header_extradata(header)?;
        validate_against_parent_hash_number(header, parent)?;
        validate_against_parent_timestamp(header, parent)?;

        if mode == HeaderValidationMode::Full {
            if ctx.bad_block_manager().is_bad(&parent.hash()) {
                return Err(ConsensusError::ParentIsBad { hash: parent.hash() })
            }
            if !ctx.chain().is_known(&parent.hash())? {
                return Err(ConsensusError::ParentUnknown { hash: parent.hash() })
            }
        }

        Ok(())
    }

    fn validate_header(
        &self,
        header: &SealedHeader,
        ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        if mode.is_none() {
            return Ok(())
        }
        let parent = ctx
            .chain()
            .header(&header.parent_hash)?
            .ok_or(ConsensusError::ParentUnknown { hash: header.parent_hash })?;
        self.validate_header_against_parent(header, &parent, ctx, mode)
    }
}

/// Body rules shared by every Ethereum fork.
///
/// The light checks reconcile the body with the commitments of the header, the full checks
/// additionally reconcile the header with the outputs of execution.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct BaselineBodyValidator;

impl BaselineBodyValidator {
    /// Creates the validator.
    pub const fn new() -> Self {
        Self
    }

    fn validate_ommers(
        &self,
        block: &SealedBlock,
        ommers: &[Header],
        ommer_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        if ommer_mode.is_none() {
            return Ok(())
        }
        for ommer in ommers {
            validate_header_gas(ommer)?;
            validate_header_extradata(ommer)?;
            if ommer.number >= block.number || block.number - ommer.number > MAX_OMMER_DEPTH {
                return Err(ConsensusError::Other(format!(
                    "ommer {} is not within {MAX_OMMER_DEPTH} blocks of block {}",
                    ommer.number, block.number
                )))
            }
        }
        Ok(())
    }
}

impl BodyValidator for BaselineBodyValidator {
    fn validate_body(
        &self,
        _ctx: &ProtocolContext,
        block: &SealedBlock,
        output: &BlockExecutionOutput,
        parent: &SealedHeader,
        ommer_mode: HeaderValidationMode,
        header_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        validate_block_pre_execution(block, &block.body.ommers)?;
        self.validate_ommers(block, &block.body.ommers, ommer_mode)?;
        if !header_mode.is_none() {
            validate_against_parent_hash_number(&block.header, parent)?;
        }
        validate_block_post_execution(block, output)
    }

    fn validate_body_light(
        &self,
        _ctx: &ProtocolContext,
        block: &SealedBlock,
        ommers: &[Header],
        ommer_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        validate_block_pre_execution(block, ommers)?;
        self.validate_ommers(block, ommers, ommer_mode)
    }
}
