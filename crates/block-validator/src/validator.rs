use crate::{
    metrics::BlockValidatorMetrics, ProcessingResult, SyncValidationError, ValidateOptions,
};
use assay_bad_blocks::{BadBlockCause, BadBlockManager};
use assay_consensus::{
    BodyValidationMode, BodyValidator, ConsensusError, HeaderValidationMode, HeaderValidator,
    ProtocolContext,
};
use assay_evm::{BlockExecutionError, BlockProcessingResult, BlockProcessor};
use assay_primitives::{BlockHash, Header, SealedBlock, SealedHeader};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{debug, trace, warn};

/// Validates blocks and applies their state transitions.
///
/// A validator is bound to the rule engines of one fork segment and is immutable once built, see
/// [`BlockValidatorBuilder`](crate::BlockValidatorBuilder). It is cheap to clone and can be used
/// from any number of threads at once; every call runs to completion on the calling thread.
///
/// Failures fall into four classes, which decide both the result and whether the block is
/// recorded in the bad-block registry of the [`ProtocolContext`]:
///
/// | Class | Result | Recorded |
/// |---|---|---|
/// | protocol violation | [`ProcessingResult::Failed`] | yes, unless disabled per call |
/// | missing parent or parent world state | [`ProcessingResult::Failed`] | never |
/// | infrastructure fault | [`ProcessingResult::FailedExceptionally`] | never |
/// | unsupported syncing body mode | [`SyncValidationError`] | never |
#[derive(Debug, Clone)]
pub struct BlockValidator {
    pub(crate) header_validator: Arc<dyn HeaderValidator>,
    pub(crate) body_validator: Arc<dyn BodyValidator>,
    pub(crate) block_processor: Arc<dyn BlockProcessor>,
    pub(crate) max_rlp_block_size: Option<usize>,
    pub(crate) slow_block_threshold: Option<Duration>,
    pub(crate) metrics: BlockValidatorMetrics,
}

impl BlockValidator {
    /// Returns the maximum encoded size of a block, `None` if blocks are not bounded.
    pub const fn max_rlp_block_size(&self) -> Option<usize> {
        self.max_rlp_block_size
    }

    /// Validates `block`, applies its state transition and validates the outputs of the
    /// transition.
    ///
    /// `header_mode` is the strictness of the header validation, `ommer_mode` the strictness used
    /// for the ommers of the block.
    pub fn validate_and_process_block(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        header_mode: HeaderValidationMode,
        ommer_mode: HeaderValidationMode,
        options: ValidateOptions,
    ) -> ProcessingResult {
        let start = Instant::now();
        let result = self.process(ctx, block, header_mode, ommer_mode, options);
        let elapsed = start.elapsed();

        if result.is_successful() {
            self.metrics.valid.increment(1);
            trace!(
                target: "block_validator",
                number = block.number,
                hash = ?block.hash(),
                ?elapsed,
                "Block is valid"
            );
        }
        if let Some(threshold) = self.slow_block_threshold {
            if elapsed > threshold {
                warn!(
                    target: "block_validator",
                    number = block.number,
                    hash = ?block.hash(),
                    ?elapsed,
                    ?threshold,
                    "Slow block validation"
                );
            }
        }
        result
    }

    fn process(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        header_mode: HeaderValidationMode,
        ommer_mode: HeaderValidationMode,
        options: ValidateOptions,
    ) -> ProcessingResult {
        if let Some(max_rlp_block_size) = self.max_rlp_block_size {
            let rlp_length = block.rlp_length();
            if rlp_length > max_rlp_block_size {
                let message = format!(
                    "block exceeds maximum size: {rlp_length} bytes, \
                     limit is {max_rlp_block_size} bytes"
                );
                return self.invalid(
                    ctx,
                    block,
                    None,
                    BadBlockCause::from_validation_failure(&message),
                    message,
                    options,
                )
            }
        }

        let parent = match ctx.chain().header(&block.parent_hash) {
            Ok(Some(parent)) => parent,
            Ok(None) => {
                return self.unavailable(
                    block,
                    format!("Parent block with hash {} not present", block.parent_hash),
                )
            }
            Err(err) => {
                return self.fault(
                    block,
                    format!("Failed to look up parent block {}: {err}", block.parent_hash),
                    err.into(),
                )
            }
        };

        if let Err(err) = self.header_validator.validate_header_against_parent(
            &block.header,
            &parent,
            ctx,
            header_mode,
        ) {
            return self.rule_failure(
                ctx,
                block,
                &parent,
                format!("Header validation failed ({header_mode})"),
                err,
                options,
            )
        }

        let mut state = match ctx.world_state().world_state(&parent, options.persist) {
            Ok(Some(state)) => state,
            Ok(None) => {
                return self.unavailable(
                    block,
                    format!(
                        "Unable to process block because parent world state {} is not available",
                        parent.state_root
                    ),
                )
            }
            Err(err) => {
                return self.fault(
                    block,
                    format!(
                        "Unable to process block because parent world state {} \
                         could not be loaded: {err}",
                        parent.state_root
                    ),
                    err.into(),
                )
            }
        };

        let processed = self.block_processor.process_block(ctx, ctx.chain(), &mut *state, block);
        let output = match processed {
            Ok(BlockProcessingResult::Executed(output)) => output,
            Ok(BlockProcessingResult::Failed) => {
                return self.invalid(
                    ctx,
                    block,
                    Some(&parent),
                    BadBlockCause::from_validation_failure("processing failed"),
                    "processing failed".to_string(),
                    options,
                )
            }
            Ok(BlockProcessingResult::FailedWithCause(cause)) => {
                let message = format!("processing failed: {cause}");
                if cause.is_infrastructure() {
                    return self.fault(block, message, cause)
                }
                return self.invalid_exceptionally(ctx, block, &parent, message, cause, options)
            }
            Err(err) => {
                return self.fault(block, format!("Block processing aborted: {err}"), err.into())
            }
        };

        if let Err(err) =
            self.body_validator.validate_body(ctx, block, &output, &parent, ommer_mode, header_mode)
        {
            return self.rule_failure(
                ctx,
                block,
                &parent,
                "failed to validate output of imported block".to_string(),
                err,
                options,
            )
        }

        if options.persist {
            if let Err(err) = state.persist(&block.header) {
                return self.fault(
                    block,
                    format!("Failed to persist world state of block {}: {err}", block.hash()),
                    err.into(),
                )
            }
        }

        ProcessingResult::Successful(output)
    }

    /// Checks `block` before it is queued for import: the header, resolving its ancestors through
    /// the chain store, and the parts of the body that can be checked without executing it.
    ///
    /// Returns `Ok(false)` if the block is rejected or its ancestors are not available. Rejected
    /// blocks are always recorded as bad.
    ///
    /// Full body validation needs execution outputs, requesting it with
    /// [`BodyValidationMode::Full`] is an error.
    pub fn validate_block_for_syncing(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        ommers: &[Header],
        header_mode: HeaderValidationMode,
        ommer_mode: HeaderValidationMode,
        body_mode: BodyValidationMode,
    ) -> Result<bool, SyncValidationError> {
        if body_mode == BodyValidationMode::Full {
            return Err(SyncValidationError::UnsupportedBodyMode(body_mode))
        }

        if let Err(err) = self.header_validator.validate_header(&block.header, ctx, header_mode) {
            return self.sync_rule_failure(
                ctx,
                block,
                format!("Header validation failed ({header_mode})"),
                err,
            )
        }

        if let Err(err) = self.body_validator.validate_body_light(ctx, block, ommers, ommer_mode) {
            return self.sync_rule_failure(
                ctx,
                block,
                format!("Body validation failed ({body_mode})"),
                err,
            )
        }

        self.metrics.sync_valid.increment(1);
        Ok(true)
    }

    fn sync_rule_failure(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        context: String,
        err: ConsensusError,
    ) -> Result<bool, SyncValidationError> {
        let message = format!("{context}: {err}");
        match err {
            ConsensusError::Provider(err) => {
                warn!(
                    target: "block_validator",
                    number = block.number,
                    hash = ?block.hash(),
                    %message,
                    "Syncing check aborted"
                );
                Err(err.into())
            }
            err if err.is_missing_prerequisite() => {
                self.metrics.sync_unavailable.increment(1);
                debug!(
                    target: "block_validator",
                    number = block.number,
                    hash = ?block.hash(),
                    %message,
                    "Syncing check could not complete"
                );
                Ok(false)
            }
            err => {
                self.metrics.sync_invalid.increment(1);
                debug!(
                    target: "block_validator",
                    number = block.number,
                    hash = ?block.hash(),
                    %message,
                    "Syncing check rejected block"
                );
                ctx.bad_block_manager().add_bad_block(block, bad_block_cause(err, message));
                Ok(false)
            }
        }
    }

    /// Maps an error reported by a rule engine to a result according to its class.
    fn rule_failure(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        parent: &SealedHeader,
        context: String,
        err: ConsensusError,
        options: ValidateOptions,
    ) -> ProcessingResult {
        let message = format!("{context}: {err}");
        match err {
            ConsensusError::Provider(err) => self.fault(block, message, err.into()),
            err if err.is_missing_prerequisite() => self.unavailable(block, message),
            err => {
                let cause = bad_block_cause(err, message.clone());
                self.invalid(ctx, block, Some(parent), cause, message, options)
            }
        }
    }

    /// A protocol violation. `parent` is `None` when the block was rejected before its parent
    /// was resolved.
    fn invalid(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        parent: Option<&SealedHeader>,
        cause: BadBlockCause,
        message: String,
        options: ValidateOptions,
    ) -> ProcessingResult {
        self.metrics.invalid.increment(1);
        debug!(
            target: "block_validator",
            number = block.number,
            hash = ?block.hash(),
            %message,
            "Invalid block"
        );
        if options.record_bad_block {
            self.record_bad_block(ctx, block, parent, cause);
        }
        ProcessingResult::failed(message)
    }

    /// A protocol violation the executor surfaced with a cause.
    fn invalid_exceptionally(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        parent: &SealedHeader,
        message: String,
        cause: BlockExecutionError,
        options: ValidateOptions,
    ) -> ProcessingResult {
        self.metrics.invalid.increment(1);
        debug!(
            target: "block_validator",
            number = block.number,
            hash = ?block.hash(),
            %message,
            "Invalid block"
        );
        if options.record_bad_block {
            self.record_bad_block(
                ctx,
                block,
                Some(parent),
                BadBlockCause::from_processing_error(cause.clone()).with_description(&message),
            );
        }
        ProcessingResult::failed_exceptionally(message, cause)
    }

    /// A prerequisite of the block is not available locally.
    fn unavailable(&self, block: &SealedBlock, message: String) -> ProcessingResult {
        self.metrics.unavailable.increment(1);
        debug!(
            target: "block_validator",
            number = block.number,
            hash = ?block.hash(),
            %message,
            "Block cannot be processed"
        );
        ProcessingResult::failed(message)
    }

    /// An infrastructure fault.
    fn fault(
        &self,
        block: &SealedBlock,
        message: String,
        cause: BlockExecutionError,
    ) -> ProcessingResult {
        self.metrics.fault.increment(1);
        warn!(
            target: "block_validator",
            number = block.number,
            hash = ?block.hash(),
            %message,
            "Block processing aborted"
        );
        ProcessingResult::failed_exceptionally(message, cause)
    }

    fn record_bad_block(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        parent: Option<&SealedHeader>,
        cause: BadBlockCause,
    ) {
        let bad_blocks = ctx.bad_block_manager();
        bad_blocks.add_bad_block(block, cause);
        if let Some(latest_valid) = latest_valid_ancestor(bad_blocks, block, parent) {
            bad_blocks.add_latest_valid_hash(block.hash(), latest_valid);
        }
    }
}

/// Returns the cause to record for a block rejected with `err`.
fn bad_block_cause(err: ConsensusError, message: String) -> BadBlockCause {
    match err {
        ConsensusError::ParentIsBad { hash } => {
            BadBlockCause::from_bad_ancestor(hash).with_description(message)
        }
        err => BadBlockCause::from_processing_error(err).with_description(message),
    }
}

/// Returns the latest valid ancestor of a rejected block.
///
/// A parent that was itself rejected passes on its own latest valid ancestor. Otherwise the
/// parent qualifies if it was resolved from the chain store and is not known to be bad. Only the
/// registry is consulted, the chain store is never touched here.
fn latest_valid_ancestor(
    bad_blocks: &BadBlockManager,
    block: &SealedBlock,
    parent: Option<&SealedHeader>,
) -> Option<BlockHash> {
    if let Some(latest_valid) = bad_blocks.latest_valid_hash(&block.parent_hash) {
        return Some(latest_valid)
    }
    parent
        .filter(|parent| !bad_blocks.is_bad(&parent.hash()))
        .map(|parent| parent.hash())
}
