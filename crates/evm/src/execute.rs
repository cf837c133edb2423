//! Traits for executing a block against a world state.

use crate::BlockExecutionError;
use assay_consensus::ProtocolContext;
use assay_execution_types::BlockExecutionOutput;
use assay_primitives::SealedBlock;
use assay_storage_api::{errors::ProviderResult, HeaderProvider, MutableWorldState};

/// The outcome of applying a block to a world state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockProcessingResult {
    /// The block was applied, the world state now reflects its post-state.
    Executed(BlockExecutionOutput),
    /// The state transition is invalid.
    Failed,
    /// The state transition is invalid and the executor surfaced the reason.
    FailedWithCause(BlockExecutionError),
}

impl BlockProcessingResult {
    /// Returns `true` if the block was applied.
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Executed(_))
    }

    /// Returns the execution output if the block was applied.
    pub const fn output(&self) -> Option<&BlockExecutionOutput> {
        match self {
            Self::Executed(output) => Some(output),
            _ => None,
        }
    }

    /// Returns the surfaced cause of a failed transition, if any.
    pub const fn cause(&self) -> Option<&BlockExecutionError> {
        match self {
            Self::FailedWithCause(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<BlockExecutionOutput> for BlockProcessingResult {
    fn from(output: BlockExecutionOutput) -> Self {
        Self::Executed(output)
    }
}

/// A type that knows how to execute a block: the transactions, gas accounting and receipt
/// generation of a fork.
///
/// A block whose transition is invalid is reported through the returned
/// [`BlockProcessingResult`]. An `Err` is reserved for storage faults, which say nothing about
/// the block itself.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BlockProcessor: std::fmt::Debug + Send + Sync {
    /// Applies `block` to `state`, which is positioned at the post-state of its parent.
    ///
    /// `chain` resolves ancestor headers, e.g. for the `BLOCKHASH` opcode.
    fn process_block(
        &self,
        ctx: &ProtocolContext,
        chain: &dyn HeaderProvider,
        state: &mut dyn MutableWorldState,
        block: &SealedBlock,
    ) -> ProviderResult<BlockProcessingResult>;
}
