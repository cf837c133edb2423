use assay_consensus::{
    BodyValidator, ConsensusError, HeaderValidationMode, HeaderValidator, ProtocolContext,
};
use assay_evm::{BlockExecutionOutput, BlockProcessingResult, BlockProcessor};
use assay_primitives::{BlockHash, Header, SealedBlock, SealedHeader, B256};
use assay_storage_api::{
    errors::{ProviderError, ProviderResult},
    HeaderProvider, MutableWorldState,
};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Default)]
struct HeaderScript {
    failures: HashMap<BlockHash, ConsensusError>,
    calls: Vec<(BlockHash, HeaderValidationMode)>,
}

/// A [`HeaderValidator`] that accepts every header except the ones it was told to reject.
///
/// The ancestor-resolving form looks the parent up in the chain store of the context and reports
/// [`ConsensusError::ParentUnknown`] if it is missing.
#[derive(Debug, Clone, Default)]
pub struct MockHeaderValidator {
    inner: Arc<Mutex<HeaderScript>>,
}

impl MockHeaderValidator {
    /// Rejects the header with the given hash with `err`.
    pub fn fail_for(&self, hash: BlockHash, err: ConsensusError) {
        self.inner.lock().failures.insert(hash, err);
    }

    /// Returns the validated header hashes and the mode they were validated with.
    pub fn calls(&self) -> Vec<(BlockHash, HeaderValidationMode)> {
        self.inner.lock().calls.clone()
    }
}

impl HeaderValidator for MockHeaderValidator {
    fn validate_header_against_parent(
        &self,
        header: &SealedHeader,
        _parent: &SealedHeader,
        _ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        let mut inner = self.inner.lock();
        inner.calls.push((header.hash(), mode));
        inner.failures.get(&header.hash()).cloned().map_or(Ok(()), Err)
    }

    fn validate_header(
        &self,
        header: &SealedHeader,
        ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        let parent = ctx
            .chain()
            .header(&header.parent_hash)?
            .ok_or(ConsensusError::ParentUnknown { hash: header.parent_hash })?;
        self.validate_header_against_parent(header, &parent, ctx, mode)
    }
}

#[derive(Debug, Default)]
struct BodyScript {
    full_failures: HashMap<BlockHash, ConsensusError>,
    light_failures: HashMap<BlockHash, ConsensusError>,
    full_calls: Vec<(BlockHash, BlockExecutionOutput)>,
    light_calls: Vec<BlockHash>,
}

/// A [`BodyValidator`] that accepts every body except the ones it was told to reject.
#[derive(Debug, Clone, Default)]
pub struct MockBodyValidator {
    inner: Arc<Mutex<BodyScript>>,
}

impl MockBodyValidator {
    /// Rejects the full check of the block with the given hash with `err`.
    pub fn fail_full_for(&self, hash: BlockHash, err: ConsensusError) {
        self.inner.lock().full_failures.insert(hash, err);
    }

    /// Rejects the light check of the block with the given hash with `err`.
    pub fn fail_light_for(&self, hash: BlockHash, err: ConsensusError) {
        self.inner.lock().light_failures.insert(hash, err);
    }

    /// Returns the blocks that went through the full check, with the outputs they were checked
    /// against.
    pub fn full_calls(&self) -> Vec<(BlockHash, BlockExecutionOutput)> {
        self.inner.lock().full_calls.clone()
    }

    /// Returns the blocks that went through the light check.
    pub fn light_calls(&self) -> Vec<BlockHash> {
        self.inner.lock().light_calls.clone()
    }
}

impl BodyValidator for MockBodyValidator {
    fn validate_body(
        &self,
        _ctx: &ProtocolContext,
        block: &SealedBlock,
        output: &BlockExecutionOutput,
        _parent: &SealedHeader,
        _ommer_mode: HeaderValidationMode,
        _header_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        let mut inner = self.inner.lock();
        inner.full_calls.push((block.hash(), output.clone()));
        inner.full_failures.get(&block.hash()).cloned().map_or(Ok(()), Err)
    }

    fn validate_body_light(
        &self,
        _ctx: &ProtocolContext,
        block: &SealedBlock,
        _ommers: &[Header],
        _ommer_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError> {
        let mut inner = self.inner.lock();
        inner.light_calls.push(block.hash());
        inner.light_failures.get(&block.hash()).cloned().map_or(Ok(()), Err)
    }
}

/// A scripted response of [`MockBlockProcessor`].
#[derive(Debug, Clone)]
pub enum ProcessorResponse {
    /// Return the given result.
    Result(BlockProcessingResult),
    /// Raise the given fault.
    Fault(ProviderError),
}

#[derive(Debug, Default)]
struct ProcessorScript {
    responses: HashMap<BlockHash, ProcessorResponse>,
    calls: Vec<(BlockHash, B256)>,
}

/// A [`BlockProcessor`] that returns scripted results.
///
/// Blocks without a scripted response execute successfully: the output commits to the gas used
/// and state root declared by the header, with no receipts.
#[derive(Debug, Clone, Default)]
pub struct MockBlockProcessor {
    inner: Arc<Mutex<ProcessorScript>>,
}

impl MockBlockProcessor {
    /// Scripts the response for the block with the given hash.
    pub fn respond(&self, hash: BlockHash, response: ProcessorResponse) {
        self.inner.lock().responses.insert(hash, response);
    }

    /// Makes the execution of the block with the given hash produce `output`.
    pub fn execute_with(&self, hash: BlockHash, output: BlockExecutionOutput) {
        self.respond(hash, ProcessorResponse::Result(BlockProcessingResult::Executed(output)));
    }

    /// Returns the executed block hashes, each with the root of the state it was executed on.
    pub fn calls(&self) -> Vec<(BlockHash, B256)> {
        self.inner.lock().calls.clone()
    }
}

impl BlockProcessor for MockBlockProcessor {
    fn process_block(
        &self,
        _ctx: &ProtocolContext,
        _chain: &dyn HeaderProvider,
        state: &mut dyn MutableWorldState,
        block: &SealedBlock,
    ) -> ProviderResult<BlockProcessingResult> {
        let mut inner = self.inner.lock();
        inner.calls.push((block.hash(), state.state_root()));
        match inner.responses.get(&block.hash()).cloned() {
            Some(ProcessorResponse::Result(result)) => Ok(result),
            Some(ProcessorResponse::Fault(fault)) => Err(fault),
            None => Ok(BlockProcessingResult::Executed(BlockExecutionOutput {
                receipts: Vec::new(),
                gas_used: block.gas_used,
                state_root: block.state_root,
            })),
        }
    }
}
